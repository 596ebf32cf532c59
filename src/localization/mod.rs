//! # ماژول برچسب‌های عربی (Localization Mapper)
//!
//! بک‌اند مرحله و پایه تحصیلی رو به صورت کلید برمیگردونه (`"prep"`، `"7"`،
//! `"first_prep"`). این ماژول اون کلیدها رو به برچسب عربی قابل نمایش تبدیل میکنه.
//!
//! ## قوانین
//! - ورودی خالی یا `None` همیشه [`NOT_SPECIFIED`] میشه
//! - کلید قبل از جستجو lowercase و trim میشه
//! - کلید ناشناخته خطا نیست: خود ورودی، دست‌نخورده، برمیگرده
//!
//! فقط یک جدول وجود داره ([`GRADE_LABELS`])؛ همه توابع این ماژول از همون استفاده میکنن.

mod grades;

pub use grades::*;

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// برچسب "مشخص نشده"
pub const NOT_SPECIFIED: &str = "غير محدد";

// =====================================
// Canonical Table
// =====================================
/// جدول کلید → برچسب
///
/// فقط مرحله‌ها و پایه‌های عددی ۱ تا ۱۲ اینجا هستن. کلیدهای قدیمی مثل
/// `first_prep` یا `first_sec` اول با [`normalize_grade_key`] به کلید عددی
/// میرسن و بعد برچسب میگیرن، پس نگاشت قدیمی → عددی فقط یک جا تعریف شده.
pub const GRADE_LABELS: &[(&str, &str)] = &[
    // Stages
    ("primary", "المرحلة الابتدائية"),
    ("prep", "المرحلة الإعدادية"),
    ("secondary", "المرحلة الثانوية"),
    // Grades
    ("1", "الصف الأول الابتدائي"),
    ("2", "الصف الثاني الابتدائي"),
    ("3", "الصف الثالث الابتدائي"),
    ("4", "الصف الرابع الابتدائي"),
    ("5", "الصف الخامس الابتدائي"),
    ("6", "الصف السادس الابتدائي"),
    ("7", "الصف الأول الإعدادي"),
    ("8", "الصف الثاني الإعدادي"),
    ("9", "الصف الثالث الإعدادي"),
    ("10", "الصف الأول الثانوي"),
    ("11", "الصف الثاني الثانوي"),
    ("12", "الصف الثالث الثانوي"),
];

/// نسخه HashMap جدول برای جستجوی سریع
///
/// `Lazy` یعنی فقط بار اول ساخته میشه
static LABEL_INDEX: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| GRADE_LABELS.iter().copied().collect());

// =====================================
// Lookup
// =====================================
/// تبدیل کلید بک‌اند به برچسب عربی
///
/// # مثال
/// ```rust
/// use edu_portal_core::localization::{label_for_key, NOT_SPECIFIED};
///
/// assert_eq!(label_for_key(Some(" PREP ")), "المرحلة الإعدادية");
/// assert_eq!(label_for_key(Some("Grade-X")), "Grade-X");
/// assert_eq!(label_for_key(None), NOT_SPECIFIED);
/// ```
#[must_use]
pub fn label_for_key(key: Option<&str>) -> String {
    let Some(raw) = key.filter(|k| !k.is_empty()) else {
        return NOT_SPECIFIED.to_string();
    };

    lookup(raw).unwrap_or(raw).to_string()
}

/// فقط جستجو؛ `None` یعنی کلید نه توی جدول هست نه alias یک پایه
#[must_use]
pub fn lookup(key: &str) -> Option<&'static str> {
    let normalized = key.trim().to_lowercase();
    if let Some(label) = LABEL_INDEX.get(normalized.as_str()) {
        return Some(label);
    }

    let canonical = normalize_grade_key(&normalized)?;
    LABEL_INDEX.get(canonical.as_str()).copied()
}

/// برچسب پایه تحصیلی (مثلا `grade_level` کاربر)
#[must_use]
pub fn format_grade_level(level: Option<&str>) -> String {
    label_for_key(level)
}

/// برچسب مرحله تحصیلی (مثلا `education_stage` کاربر)
#[must_use]
pub fn format_stage(stage: Option<&str>) -> String {
    label_for_key(stage)
}

/// برچسب یک پایه عددی
#[must_use]
pub fn label_for_grade(grade: u8) -> String {
    label_for_key(Some(grade.to_string().as_str()))
}
