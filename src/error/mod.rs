//! # ماژول مدیریت خطاها (Error Handling)
//!
//! این ماژول خطاهای لایه کلاینت رو تعریف میکنه.
//!
//! ## مفاهیم Rust:
//! - **Custom Error Types**: تعریف نوع خطای سفارشی
//! - **thiserror**: derive macro برای Error trait
//! - **From Trait**: تبدیل خودکار نوع‌ها
//! - **Result Type Alias**: alias برای ساده‌تر شدن کد
//!
//! ## کجا خطا داریم و کجا نداریم؟
//!
//! - پیدا نشدن کلید در جدول برچسب‌ها خطا نیست، خود ورودی برمیگرده
//! - URL ناشناخته در resolverها خطا نیست، قاعده پیش‌فرض اعمال میشه
//! - خطای شبکه و API اینجا تعریف میشه ولی store اون رو به state تبدیل میکنه

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// پیام پیش‌فرض وقتی سرور پیامی برنگردونده
pub const DEFAULT_FETCH_ERROR: &str = "Failed to fetch dashboard data";

// =====================================
// Result Type Alias
// =====================================
/// نوع Result سفارشی برنامه
///
/// به جای نوشتن `Result<DashboardStats, AppError>` میتونیم بنویسیم `Result<DashboardStats>`
pub type Result<T, E = AppError> = std::result::Result<T, E>;

// =====================================
// Custom Error Enum
// =====================================
/// خطای اصلی کتابخانه
///
/// # مفاهیم:
/// - `#[derive(Error)]`: از thiserror برای پیاده‌سازی Error trait
/// - `#[error("...")]`: پیام خطا برای هر نوع
/// - `#[from]`: تبدیل خودکار از نوع‌های دیگه
#[derive(Debug, Error)]
pub enum AppError {
    // ----------------------------------------
    // خطاهای برگشتی از API
    // ----------------------------------------

    /// پاسخ غیر 2xx از بک‌اند
    ///
    /// `message` همون فیلد `message` (یا `error`) بدنه JSON هست، اگه بود
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    /// داده رسیده شکل درستی نداره
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// خطای اعتبارسنجی روی رکوردهای دریافتی
    #[error("Validation error: {0}")]
    Validation(String),

    /// درخواست در زمان مجاز تموم نشد
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// خطای تنظیمات
    #[error("Configuration error: {0}")]
    Config(String),

    // ----------------------------------------
    // خطاهای تبدیل شده از کتابخانه‌ها
    // ----------------------------------------

    /// خطای شبکه / HTTP
    /// `#[from]` یعنی reqwest::Error خودکار به این تبدیل میشه
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// خطای JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// خطای URL
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl AppError {
    /// ساخت خطای API از status و پیام اختیاری
    #[must_use]
    pub fn api(status: StatusCode, message: Option<String>) -> Self {
        Self::Api { status, message }
    }

    /// پیامی که خود سرور فرستاده (اگه فرستاده)
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// پیامی که باید به کاربر نشون داده بشه
    ///
    /// اول پیام سرور، وگرنه پیام ثابت [`DEFAULT_FETCH_ERROR`]
    #[must_use]
    pub fn user_message(&self) -> String {
        self.server_message()
            .unwrap_or(DEFAULT_FETCH_ERROR)
            .to_string()
    }

    /// status code پاسخ، برای خطاهای HTTP
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    /// آیا مشکل از سمت سرور بوده؟ (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }
}

// =====================================
// From Implementations
// =====================================

// تبدیل validator error
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}
