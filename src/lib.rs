//! # Edu Portal Core
//!
//! هسته سمت کلاینت یک پلتفرم آموزشی عربی (RTL): برچسب‌های مرحله و پایه،
//! تبدیل آدرس فایل‌ها و ویدیوها، و store داشبورد دانش‌آموز.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه - اینجا!
//! ├── main.rs         # نقطه ورود باینری
//! ├── config/         # مدیریت تنظیمات
//! ├── error/          # تعریف خطاها
//! ├── localization/   # کلید مرحله/پایه → برچسب عربی
//! ├── urls/           # asset و embed resolverها
//! ├── models/         # مدل‌های داده
//! ├── api/            # کلاینت REST
//! ├── store/          # store داشبورد
//! └── services/       # AppState و view modelها
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust,no_run
//! use edu_portal_core::{config::Config, services::AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = AppState::new(Config::from_env().unwrap()).unwrap();
//!     app.dashboard.fetch_dashboard_data().await;
//!     println!("{:?}", app.dashboard_view());
//! }
//! ```

// =====================================
// Module Declarations
// =====================================

/// ماژول مدیریت تنظیمات
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// ماژول برچسب‌های عربی
pub mod localization;

/// ماژول asset و embed resolverها
pub mod urls;

/// ماژول مدل‌های داده
pub mod models;

/// ماژول کلاینت REST
pub mod api;

/// ماژول store داشبورد
pub mod store;

/// ماژول AppState
pub mod services;

// =====================================
// Re-exports
// =====================================

/// نتیجه عملیات با خطای سفارشی ما
pub use error::Result;

/// خطای اصلی کتابخانه
pub use error::AppError;

// =====================================
// Prelude Module
// =====================================
/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
///
/// ```rust
/// use edu_portal_core::prelude::*;
///
/// assert_eq!(resolve_embed_url(Some("https://vimeo.com/1")), "https://player.vimeo.com/video/1");
/// ```
pub mod prelude {
    pub use crate::api::{ApiClient, DashboardApi};
    pub use crate::config::Config;
    pub use crate::error::{AppError, Result};
    pub use crate::localization::{format_grade_level, format_stage, label_for_key};
    pub use crate::models::*;
    pub use crate::services::AppState;
    pub use crate::store::{DashboardStore, FetchOutcome};
    pub use crate::urls::{resolve_asset_url, resolve_embed_url, AssetUrlResolver};
}
