//! # ماژول سرویس‌ها (Application State)
//!
//! همه وابستگی‌ها یک جا ساخته و به UI تزریق میشن.
//!
//! ## لایه‌بندی
//!
//! ```text
//! ┌──────────────────────┐
//! │        UI            │  <-- render، کامپوننت‌ها
//! ├──────────────────────┤
//! │  AppState (اینجا!)   │  <-- store + resolverها
//! ├──────────────────────┤
//! │     ApiClient        │  <-- reqwest
//! ├──────────────────────┤
//! │    REST Backend      │
//! └──────────────────────┘
//! ```
//!
//! ## مفاهیم Rust:
//! - **Dependency Injection**: به جای singleton سراسری
//! - **Arc<T>**: اشتراک امن بین taskها

use std::sync::Arc;

use crate::{
    api::{ApiClient, DashboardApi},
    config::Config,
    error::Result,
    models::{DashboardReadModel, EnrolledCourseSummary, FALLBACK_RANK, FALLBACK_STREAK},
    store::DashboardStore,
    urls::AssetUrlResolver,
};

// =====================================
// Application State
// =====================================
/// وضعیت برنامه که بین همه کامپوننت‌ها اشتراک‌گذاری میشه
///
/// `Clone` فقط Arcها رو کپی میکنه، نه داده رو.
pub struct AppState<A = ApiClient> {
    /// تنظیمات برنامه
    pub config: Arc<Config>,

    /// resolver آدرس فایل‌ها
    pub assets: Arc<AssetUrlResolver>,

    /// store داشبورد
    pub dashboard: Arc<DashboardStore<A>>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            assets: Arc::clone(&self.assets),
            dashboard: Arc::clone(&self.dashboard),
        }
    }
}

impl AppState<ApiClient> {
    /// ساخت AppState با کلاینت HTTP واقعی
    ///
    /// # Errors
    /// اگه کلاینت HTTP ساخته نشه
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(ApiClient::new(&config)?);
        Ok(Self::with_api(config, client))
    }
}

impl<A: DashboardApi> AppState<A> {
    /// ساخت AppState با هر پیاده‌سازی [`DashboardApi`] (مثلا mock در تست)
    #[must_use]
    pub fn with_api(config: Config, api: Arc<A>) -> Self {
        let assets = Arc::new(AssetUrlResolver::from_config(&config));
        let dashboard = Arc::new(DashboardStore::new(api, config.dashboard_timeout()));

        Self {
            config: Arc::new(config),
            assets,
            dashboard,
        }
    }

    /// دسترسی به config
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// نمای آماده نمایش از وضعیت فعلی داشبورد
    #[must_use]
    pub fn dashboard_view(&self) -> DashboardView {
        DashboardView::build(&self.dashboard.snapshot(), &self.assets)
    }
}

// =====================================
// View Models
// =====================================
/// کارت یک دوره با آدرس‌های resolve شده
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseCard {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub progress: f64,
    pub lessons_label: String,
    pub thumbnail_url: String,
}

impl CourseCard {
    fn build(course: &EnrolledCourseSummary, assets: &AssetUrlResolver) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title.clone(),
            instructor: course.instructor.clone(),
            progress: course.progress,
            lessons_label: format!("{}/{} حصص", course.completed_count, course.lessons_count),
            thumbnail_url: course.thumbnail_url(assets),
        }
    }
}

/// چیزی که صفحه داشبورد مستقیم render میکنه
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub is_loading: bool,
    pub error: Option<String>,
    pub rank: String,
    pub streak: String,
    pub xp: u32,
    pub courses: Vec<CourseCard>,
}

impl DashboardView {
    /// ساخت از روی read model
    ///
    /// rank و streak همون متنی هستن که سرور فرستاده؛ قبل از اولین بارگذاری
    /// برچسب‌های پیش‌فرض (`مبتدئ`، `جديد`) نشون داده میشن.
    #[must_use]
    pub fn build(model: &DashboardReadModel, assets: &AssetUrlResolver) -> Self {
        let stats = model.stats.as_ref();

        Self {
            is_loading: model.is_loading,
            error: model.error.clone(),
            rank: stats.map_or(FALLBACK_RANK, |s| s.rank.as_str()).to_string(),
            streak: stats.map_or(FALLBACK_STREAK, |s| s.streak.as_str()).to_string(),
            xp: stats.map_or(0, |s| s.xp),
            courses: model
                .courses
                .iter()
                .map(|c| CourseCard::build(c, assets))
                .collect(),
        }
    }
}
