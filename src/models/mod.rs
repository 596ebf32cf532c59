//! # ماژول مدل‌ها (Domain Models)
//!
//! رکوردهای تایپ‌شده‌ای که از API میرسن یا به UI داده میشن.
//!
//! ## مفاهیم Rust:
//! - **Derive Macros**: تولید خودکار کد
//! - **Serialize/Deserialize**: تبدیل JSON (فیلدها در JSON به صورت camelCase هستن)
//! - **Validation**: اعتبارسنجی داده با `validator`
//! - **Newtype Pattern**: کپسوله کردن نوع‌ها
//!
//! داده‌ای که شکل درستی نداره همون لحظه رد میشه؛ هیچ فیلدی نصفه‌نیمه به UI نمیرسه.

mod dashboard;
mod dto;

pub use dashboard::*;
pub use dto::*;

use serde::{Deserialize, Deserializer, Serialize};

// =====================================
// Common Types (Newtype Pattern)
// =====================================
/// شناسه دوره
///
/// بک‌اند گاهی عدد و گاهی رشته برمیگردونه؛ هر دو اینجا به رشته تبدیل میشن.
///
/// # مثال
/// ```rust
/// use edu_portal_core::models::CourseId;
///
/// let a: CourseId = serde_json::from_str("42").unwrap();
/// let b: CourseId = serde_json::from_str("\"42\"").unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// ساخت از string موجود
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// گرفتن به عنوان &str
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CourseId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(Self(n.to_string())),
            Raw::Text(s) if !s.trim().is_empty() => Ok(Self(s)),
            Raw::Text(_) => Err(serde::de::Error::custom("course id must not be empty")),
        }
    }
}

impl From<u64> for CourseId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
