//! # ماژول تنظیمات (Configuration)
//!
//! این ماژول مسئول خوندن و مدیریت تنظیمات کلاینت هست.
//!
//! ## مفاهیم Rust:
//! - **Structs**: ساختار داده‌ای برای نگهداری تنظیمات
//! - **Default Trait**: مقادیر پیش‌فرض
//! - **Serde**: سریالایز/دسریالایز
//! - **Builder Pattern**: ساخت تدریجی آبجکت

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// آدرس پیش‌فرض API در محیط توسعه
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";

/// تنظیمات اصلی کلاینت
///
/// # مثال
/// ```rust
/// use edu_portal_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.api_base_url, "http://localhost:8000/api");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// آدرس پایه API (مثلا `https://host/api`)
    pub api_base_url: String,

    /// توکن Bearer برای احراز هویت (اختیاری)
    #[serde(skip_serializing)]
    pub api_token: Option<String>,

    /// مهلت هر درخواست HTTP (ثانیه)
    pub request_timeout_secs: u64,

    /// مهلت کل بارگذاری داشبورد (هر دو درخواست با هم)
    pub dashboard_timeout_secs: u64,

    /// محیط اجرا (development, production)
    pub environment: Environment,
}

/// محیط اجرای برنامه
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// محیط توسعه
    #[default]
    Development,

    /// محیط تست
    Testing,

    /// محیط تولید
    Production,
}

impl Environment {
    /// آیا در محیط توسعه هستیم؟
    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// آیا در محیط تولید هستیم؟
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// تبدیل String به Environment
///
/// هر مقدار ناشناخته development حساب میشه
impl From<String> for Environment {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "testing" | "test" => Environment::Testing,
            _ => Environment::Development,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            request_timeout_secs: 30,
            dashboard_timeout_secs: 45,
            environment: Environment::Development,
        }
    }
}

impl Config {
    /// ساخت تنظیمات از متغیرهای محیطی
    ///
    /// متغیرها: `API_URL`، `API_TOKEN`، `REQUEST_TIMEOUT_SECS`،
    /// `DASHBOARD_TIMEOUT_SECS`، `ENVIRONMENT`. هر کدوم نبود، پیش‌فرض.
    ///
    /// # Errors
    /// خطا برمیگردونه اگه تنظیمات نهایی معتبر نباشن
    pub fn from_env() -> Result<Self> {
        let get_env = |key: &str, default: &str| -> String {
            env::var(key).unwrap_or_else(|_| default.to_string())
        };

        let parse_env = |key: &str, default: u64| -> u64 {
            env::var(key)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        // رشته خالی یعنی تنظیم نشده
        let api_base_url = env::var("API_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let config = Self {
            api_base_url,
            api_token: env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 30),
            dashboard_timeout_secs: parse_env("DASHBOARD_TIMEOUT_SECS", 45),
            environment: get_env("ENVIRONMENT", "development").into(),
        };

        config.validate()?;
        Ok(config)
    }

    /// اعتبارسنجی تنظیمات
    ///
    /// # Errors
    /// - آدرس API قابل parse نباشه یا http/https نباشه
    /// - یکی از مهلت‌ها صفر باشه
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.api_base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "API_URL must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        if self.request_timeout_secs == 0 || self.dashboard_timeout_secs == 0 {
            return Err(AppError::Config(
                "timeouts must be greater than 0".to_string()
            ));
        }

        if self.environment.is_production() && parsed.scheme() != "https" {
            tracing::warn!(api_base_url = %self.api_base_url, "Production API is not served over https");
        }

        Ok(())
    }

    /// آدرس API بدون `/` انتهایی
    #[must_use]
    pub fn api_root(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// آدرس سرور بدون پیشوند `/api`
    #[must_use]
    pub fn server_origin(&self) -> &str {
        let root = self.api_root();
        root.strip_suffix("/api").unwrap_or(root)
    }

    /// مهلت هر درخواست
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// مهلت کل بارگذاری داشبورد
    #[must_use]
    pub fn dashboard_timeout(&self) -> Duration {
        Duration::from_secs(self.dashboard_timeout_secs)
    }
}

// =====================================
// Builder Pattern
// =====================================
/// ساخت Config با Builder Pattern
///
/// # مثال
/// ```rust
/// use edu_portal_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .api_base_url("https://school.example/api")
///     .request_timeout_secs(10)
///     .build();
/// assert_eq!(config.server_origin(), "https://school.example");
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// ساخت builder جدید
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// تنظیم آدرس API
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_base_url = url.into();
        self
    }

    /// تنظیم توکن
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.config.api_token = Some(token.into());
        self
    }

    /// تنظیم مهلت درخواست
    #[must_use]
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    /// تنظیم مهلت داشبورد
    #[must_use]
    pub fn dashboard_timeout_secs(mut self, secs: u64) -> Self {
        self.config.dashboard_timeout_secs = secs;
        self
    }

    /// تنظیم محیط
    #[must_use]
    pub fn environment(mut self, env: Environment) -> Self {
        self.config.environment = env;
        self
    }

    /// ساخت Config نهایی
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }

    /// ساخت Config با اعتبارسنجی
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اعتبارسنجی fail بشه
    pub fn build_validated(self) -> Result<Config> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.api_token.is_none());
    }

    #[test]
    fn test_origin_and_root() {
        let config = ConfigBuilder::new()
            .api_base_url("http://host/api/")
            .build();

        assert_eq!(config.api_root(), "http://host/api");
        assert_eq!(config.server_origin(), "http://host");
    }

    #[test]
    fn test_origin_without_api_suffix() {
        let config = ConfigBuilder::new()
            .api_base_url("https://cdn.example.com/v2")
            .build();

        assert_eq!(config.server_origin(), "https://cdn.example.com/v2");
    }

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from("production".to_string()), Environment::Production);
        assert_eq!(Environment::from("TEST".to_string()), Environment::Testing);
        assert_eq!(Environment::from("whatever".to_string()), Environment::Development);
    }

    #[test]
    fn test_validation() {
        assert!(ConfigBuilder::new().build_validated().is_ok());
        assert!(ConfigBuilder::new().api_base_url("not a url").build_validated().is_err());
        assert!(ConfigBuilder::new().api_base_url("ftp://host/api").build_validated().is_err());
        assert!(ConfigBuilder::new().request_timeout_secs(0).build_validated().is_err());
    }

    #[test]
    fn test_token_is_not_serialized() {
        let config = ConfigBuilder::new().api_token("secret").build();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }
}
