//! # Asset URL Resolver
//!
//! تبدیل مسیر نسبی فایل به آدرس کامل.
//!
//! ## ترتیب قواعد (اولین قاعده‌ای که بخوره برنده‌ست)
//!
//! ```text
//! ""                       → ""
//! "http..."                → بدون تغییر
//! "api/..."                → {origin}/api/...
//! "avatars/" | "thumbnails/" | "documents/"
//!                          → {api_root}/files/...
//! بقیه                     → {api_root}/...
//! ```
//!
//! قبل از قاعده‌های نسبی حداکثر یک `/` از اول مسیر حذف میشه.

use crate::config::Config;

/// پیشوندهای ذخیره‌سازی که زیر `/files/` سرو میشن
pub const STORAGE_PREFIXES: [&str; 3] = ["avatars/", "thumbnails/", "documents/"];

// =====================================
// AssetPath
// =====================================
/// دسته‌بندی یک مسیر فایل
///
/// هر مسیر دقیقاً توی یکی از این حالت‌ها میفته. مسیرهای نسبی بدون `/` اول نگه داشته میشن.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetPath<'a> {
    /// ورودی خالی
    Empty,
    /// آدرس کامل (با `http` شروع میشه)
    Absolute(&'a str),
    /// مسیر API مثل `api/files/...`
    Api(&'a str),
    /// مسیر ذخیره‌سازی مثل `avatars/u1.png`
    Storage(&'a str),
    /// هر مسیر نسبی دیگه
    Relative(&'a str),
}

impl<'a> AssetPath<'a> {
    /// دسته‌بندی ورودی
    ///
    /// # مثال
    /// ```rust
    /// use edu_portal_core::urls::AssetPath;
    ///
    /// assert_eq!(AssetPath::classify("/avatars/a.png"), AssetPath::Storage("avatars/a.png"));
    /// assert_eq!(AssetPath::classify("api"), AssetPath::Relative("api"));
    /// ```
    #[must_use]
    pub fn classify(path: &'a str) -> Self {
        if path.is_empty() {
            return Self::Empty;
        }

        if path.starts_with("http") {
            return Self::Absolute(path);
        }

        let clean = path.strip_prefix('/').unwrap_or(path);

        if clean.starts_with("api/") {
            Self::Api(clean)
        } else if STORAGE_PREFIXES.iter().any(|p| clean.starts_with(p)) {
            Self::Storage(clean)
        } else {
            Self::Relative(clean)
        }
    }
}

// =====================================
// Resolver
// =====================================
/// resolver با آدرس‌های پایه از قبل محاسبه شده
///
/// یک بار از روی config ساخته میشه و برای همه renderها استفاده میشه.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrlResolver {
    /// آدرس API بدون `/` انتهایی (مثلا `http://host/api`)
    api_root: String,
    /// آدرس سرور بدون `/api` (مثلا `http://host`)
    origin: String,
}

impl AssetUrlResolver {
    /// ساخت resolver از آدرس پایه API
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        let api_root = api_base_url.trim_end_matches('/');
        let origin = api_root.strip_suffix("/api").unwrap_or(api_root);

        Self {
            api_root: api_root.to_string(),
            origin: origin.to_string(),
        }
    }

    /// ساخت از روی Config
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_base_url)
    }

    /// آدرس API بدون `/` انتهایی
    #[must_use]
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    /// آدرس سرور
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// تبدیل مسیر به آدرس کامل
    #[must_use]
    pub fn resolve(&self, path: Option<&str>) -> String {
        match AssetPath::classify(path.unwrap_or_default()) {
            AssetPath::Empty => String::new(),
            AssetPath::Absolute(url) => url.to_string(),
            AssetPath::Api(p) => format!("{}/{}", self.origin, p),
            AssetPath::Storage(p) => format!("{}/files/{}", self.api_root, p),
            AssetPath::Relative(p) => format!("{}/{}", self.api_root, p),
        }
    }
}

/// نسخه تابعی resolver برای یک بار استفاده
///
/// # مثال
/// ```rust
/// use edu_portal_core::urls::resolve_asset_url;
///
/// assert_eq!(
///     resolve_asset_url(Some("avatars/foo.png"), "http://host/api"),
///     "http://host/api/files/avatars/foo.png"
/// );
/// assert_eq!(resolve_asset_url(None, "http://host/api"), "");
/// ```
#[must_use]
pub fn resolve_asset_url(path: Option<&str>, api_base_url: &str) -> String {
    AssetUrlResolver::new(api_base_url).resolve(path)
}
