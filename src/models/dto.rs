//! # Data Transfer Objects (DTOs)
//!
//! شکل بدنه خطایی که بک‌اند برمیگردونه

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// بدنه JSON پاسخ‌های خطا
///
/// ```json
/// { "message": "...", "error": "...", "errors": { "field": ["..."] }, "code": "..." }
/// ```
///
/// همه فیلدها اختیاری هستن چون endpointهای مختلف شکل‌های مختلف برمیگردونن.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,

    /// خطاهای اعتبارسنجی فرم (422)
    #[serde(default)]
    pub errors: Option<HashMap<String, Vec<String>>>,

    #[serde(default)]
    pub code: Option<String>,
}

impl ApiErrorBody {
    /// پیام قابل نمایش: اول `message`، بعد `error`
    #[must_use]
    pub fn best_message(&self) -> Option<String> {
        [&self.message, &self.error]
            .into_iter()
            .flatten()
            .map(|m| m.trim())
            .find(|m| !m.is_empty())
            .map(str::to_string)
    }

    /// parse بدنه خام؛ بدنه غیر JSON یعنی پیامی نداریم
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}
