//! # لایه API (کلاینت REST)
//!
//! این ماژول درخواست‌های HTTP به بک‌اند رو مدیریت میکنه.
//!
//! ## مفاهیم Rust + reqwest:
//! - **Client**: یک `reqwest::Client` برای همه درخواست‌ها (connection pool مشترک)
//! - **Default Headers**: `Accept` و `Authorization` یک بار تنظیم میشن
//! - **Generic Deserialize**: `get::<T>()` هر نوع `DeserializeOwned` رو برمیگردونه
//! - **Trait برای Abstraction**: store فقط [`DashboardApi`] رو میشناسه، پس تست با mock راحته
//!
//! ## مسیرهای استفاده شده:
//! - `GET /dashboard/stats` - آمار داشبورد
//! - `GET /student/courses` - دوره‌های ثبت‌نام شده

pub mod endpoints;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{
    config::Config,
    error::{AppError, Result},
    models::{ApiErrorBody, DashboardStats, EnrolledCourseSummary},
};

// =====================================
// DashboardApi Trait
// =====================================
/// دو درخواستی که داشبورد بهشون نیاز داره
///
/// # مفاهیم:
/// - `#[async_trait]`: macro برای async در traits
/// - `Send + Sync`: store اینو بین taskها share میکنه
/// - در تست‌ها `MockDashboardApi` (ساخته mockall) جاش میشینه
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// `GET /dashboard/stats`
    async fn fetch_stats(&self) -> Result<DashboardStats>;

    /// `GET /student/courses`
    async fn fetch_my_courses(&self) -> Result<Vec<EnrolledCourseSummary>>;
}

// =====================================
// ApiClient
// =====================================
/// کلاینت HTTP مشترک
///
/// clone کردنش ارزونه (`reqwest::Client` داخلش Arc هست).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_root: String,
}

impl ApiClient {
    /// ساخت کلاینت از روی تنظیمات
    ///
    /// # Errors
    /// - توکن شامل کاراکتر غیرمجاز برای header باشه
    /// - ساخت `reqwest::Client` شکست بخوره
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.api_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| AppError::Config("API_TOKEN contains invalid characters".to_string()))?;
            // توی لاگ‌های debug نمایش داده نشه
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_root: config.api_root().to_string(),
        })
    }

    /// آدرس کامل یک مسیر
    ///
    /// ```rust
    /// use edu_portal_core::{api::ApiClient, config::ConfigBuilder};
    ///
    /// let config = ConfigBuilder::new().api_base_url("http://host/api/").build();
    /// let client = ApiClient::new(&config).unwrap();
    /// assert_eq!(client.url("/dashboard/stats"), "http://host/api/dashboard/stats");
    /// ```
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    /// درخواست GET و تبدیل بدنه JSON به `T`
    ///
    /// # Errors
    /// - `Http`: خطای شبکه یا timeout
    /// - `Api`: پاسخ غیر 2xx (با پیام سرور اگه بود)
    /// - `InvalidPayload`: بدنه با `T` جور نیست
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.http.get(self.url(path)).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = ApiErrorBody::from_bytes(&body).and_then(|b| b.best_message());
            warn!(%status, path, message = message.as_deref().unwrap_or(""), "API request failed");
            return Err(AppError::api(status, message));
        }

        debug!(%status, path, bytes = body.len(), "API request succeeded");

        serde_json::from_slice(&body)
            .map_err(|e| AppError::InvalidPayload(format!("{path}: {e}")))
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn fetch_stats(&self) -> Result<DashboardStats> {
        self.get(endpoints::dashboard::STATS).await
    }

    async fn fetch_my_courses(&self) -> Result<Vec<EnrolledCourseSummary>> {
        self.get(endpoints::courses::MY_COURSES).await
    }
}
