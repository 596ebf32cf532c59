//! # Embed URL Resolver
//!
//! لینک‌های معمولی YouTube و Vimeo رو به شکلی که توی iframe باز میشن تبدیل میکنه.

use once_cell::sync::Lazy;
use regex::Regex;

/// پیشوند embed یوتیوب
pub const YOUTUBE_EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// پیشوند player ویمئو
pub const VIMEO_EMBED_BASE: &str = "https://player.vimeo.com/video/";

// =====================================
// Lazy Statics (Regex patterns)
// =====================================
/// الگوی YouTube
///
/// شکل‌های پشتیبانی شده:
/// `youtube.com/<seg>/<seg>/ID`، `youtube.com/v/ID`، `youtube.com/e/ID`،
/// `youtube.com/embed/ID`، `youtube.com/...?v=ID`، `...&v=ID`، `youtu.be/ID`.
/// شناسه ۱۱ کاراکتره.
pub static YOUTUBE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("Invalid regex pattern")
});

/// الگوی Vimeo (شناسه عددی)
pub static VIMEO_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:vimeo\.com/|player\.vimeo\.com/video/)([0-9]+)")
        .expect("Invalid regex pattern")
});

// =====================================
// VideoSource
// =====================================
/// منبع ویدیو بعد از تشخیص
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    /// ویدیوی یوتیوب با شناسه ۱۱ کاراکتری
    YouTube(String),
    /// ویدیوی ویمئو با شناسه عددی
    Vimeo(String),
    /// هر لینک دیگه (فایل مستقیم، پلتفرم ناشناخته، ...)
    Other,
}

impl VideoSource {
    /// تشخیص منبع از روی لینک
    ///
    /// اول YouTube چک میشه، بعد Vimeo.
    #[must_use]
    pub fn parse(url: &str) -> Self {
        if let Some(caps) = YOUTUBE_PATTERN.captures(url) {
            return Self::YouTube(caps[1].to_string());
        }

        if let Some(caps) = VIMEO_PATTERN.captures(url) {
            return Self::Vimeo(caps[1].to_string());
        }

        Self::Other
    }

    /// آدرس embed، یا `None` برای منبع ناشناخته
    #[must_use]
    pub fn embed_url(&self) -> Option<String> {
        match self {
            Self::YouTube(id) => Some(format!("{YOUTUBE_EMBED_BASE}{id}")),
            Self::Vimeo(id) => Some(format!("{VIMEO_EMBED_BASE}{id}")),
            Self::Other => None,
        }
    }
}

/// تبدیل لینک ویدیو به لینک embed
///
/// لینک ناشناخته بدون تغییر برمیگرده (فرض میشه خودش قابل embed هست).
///
/// # مثال
/// ```rust
/// use edu_portal_core::urls::resolve_embed_url;
///
/// assert_eq!(
///     resolve_embed_url(Some("https://youtu.be/dQw4w9WgXcQ")),
///     "https://www.youtube.com/embed/dQw4w9WgXcQ"
/// );
/// assert_eq!(resolve_embed_url(None), "");
/// ```
#[must_use]
pub fn resolve_embed_url(url: Option<&str>) -> String {
    match url {
        None | Some("") => String::new(),
        Some(raw) => VideoSource::parse(raw)
            .embed_url()
            .unwrap_or_else(|| raw.to_string()),
    }
}
