//! # مراحل و پایه‌های تحصیلی
//!
//! ساختار سه مرحله (ابتدایی، اعدادی، ثانوی) و نرمال‌سازی کلیدهای پایه.
//! بک‌اند برای یک پایه چند کلید مختلف قبول میکنه (`"7"`، `"first_prep"`)؛
//! [`normalize_grade_key`] همه رو به کلید عددی `"1"`..`"12"` میبره.

use serde::{Deserialize, Serialize};

/// کلیدهای قدیمی → کلید عددی
///
/// تنها جایی که نگاشت کلید قدیمی به پایه تعریف شده.
pub const GRADE_ALIASES: &[(&str, &str)] = &[
    ("first_primary", "1"),
    ("second_primary", "2"),
    ("third_primary", "3"),
    ("fourth_primary", "4"),
    ("fifth_primary", "5"),
    ("sixth_primary", "6"),
    ("first_prep", "7"),
    ("second_prep", "8"),
    ("third_prep", "9"),
    ("first_sec", "10"),
    ("second_sec", "11"),
    ("third_sec", "12"),
    ("first_secondary", "10"),
    ("second_secondary", "11"),
    ("third_secondary", "12"),
];

// =====================================
// Education Stage
// =====================================
/// مرحله تحصیلی
///
/// # مثال
/// ```rust
/// use edu_portal_core::localization::EducationStage;
///
/// assert_eq!(EducationStage::for_grade(8), Some(EducationStage::Prep));
/// assert_eq!(EducationStage::Prep.grades(), 7..=9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationStage {
    Primary,
    Prep,
    Secondary,
}

impl EducationStage {
    /// همه مراحل به ترتیب
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Primary, Self::Prep, Self::Secondary]
    }

    /// کلیدی که بک‌اند استفاده میکنه
    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Prep => "prep",
            Self::Secondary => "secondary",
        }
    }

    /// برچسب عربی مرحله
    #[must_use]
    pub fn label(&self) -> &'static str {
        super::lookup(self.key()).unwrap_or(super::NOT_SPECIFIED)
    }

    /// پایه‌هایی که توی این مرحله هستن
    #[must_use]
    pub const fn grades(&self) -> std::ops::RangeInclusive<u8> {
        match self {
            Self::Primary => 1..=6,
            Self::Prep => 7..=9,
            Self::Secondary => 10..=12,
        }
    }

    /// پیدا کردن مرحله از روی کلید (حساس به حروف بزرگ نیست)
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::all().into_iter().find(|s| s.key() == key)
    }

    /// مرحله‌ای که این پایه بهش تعلق داره
    #[must_use]
    pub fn for_grade(grade: u8) -> Option<Self> {
        Self::all().into_iter().find(|s| s.grades().contains(&grade))
    }
}

impl std::fmt::Display for EducationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =====================================
// Grade Normalization
// =====================================
/// تبدیل هر شکلی از کلید پایه به کلید عددی
///
/// - رشته خالی → `None`
/// - عدد ۱ تا ۱۲ یا کلید قدیمی → کلید عددی
/// - هر چیز دیگه → خود ورودی (trim شده)
///
/// # مثال
/// ```rust
/// use edu_portal_core::localization::normalize_grade_key;
///
/// assert_eq!(normalize_grade_key("First_Prep").as_deref(), Some("7"));
/// assert_eq!(normalize_grade_key("10").as_deref(), Some("10"));
/// assert_eq!(normalize_grade_key("").as_deref(), None);
/// ```
#[must_use]
pub fn normalize_grade_key(grade: &str) -> Option<String> {
    let trimmed = grade.trim();
    if trimmed.is_empty() {
        return None;
    }

    let key = trimmed.to_lowercase();
    if let Some(n) = parse_grade_number(&key) {
        return Some(n.to_string());
    }

    let normalized = GRADE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or(trimmed, |(_, canonical)| *canonical);

    Some(normalized.to_string())
}

/// همه کلیدهایی که به همون پایه میرسن
///
/// کلید عددی اول میاد، بعد aliasها به ترتیب جدول، بدون تکرار.
/// برای ساخت فیلتر `IN (...)` سمت بک‌اند استفاده میشه.
#[must_use]
pub fn grade_variations(grade: &str) -> Vec<String> {
    let Some(canonical) = normalize_grade_key(grade) else {
        return Vec::new();
    };

    let mut variations = vec![canonical.clone()];
    for (alias, target) in GRADE_ALIASES {
        if *target == canonical && !variations.iter().any(|v| v == alias) {
            variations.push((*alias).to_string());
        }
    }
    variations
}

/// پایه عددی (اگه کلید عدد معتبر ۱ تا ۱۲ باشه)
#[must_use]
pub fn parse_grade_number(key: &str) -> Option<u8> {
    key.trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (1..=12).contains(n))
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_grades_are_contiguous() {
        let all: Vec<u8> = EducationStage::all()
            .iter()
            .flat_map(|s| s.grades())
            .collect();
        assert_eq!(all, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_stage_from_key() {
        assert_eq!(EducationStage::from_key(" PREP"), Some(EducationStage::Prep));
        assert_eq!(EducationStage::from_key("college"), None);
    }

    #[test]
    fn test_stage_label() {
        assert_eq!(EducationStage::Secondary.label(), "المرحلة الثانوية");
        assert_eq!(EducationStage::Primary.to_string(), "المرحلة الابتدائية");
    }

    #[test]
    fn test_for_grade_bounds() {
        assert_eq!(EducationStage::for_grade(1), Some(EducationStage::Primary));
        assert_eq!(EducationStage::for_grade(6), Some(EducationStage::Primary));
        assert_eq!(EducationStage::for_grade(10), Some(EducationStage::Secondary));
        assert_eq!(EducationStage::for_grade(0), None);
        assert_eq!(EducationStage::for_grade(13), None);
    }

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(normalize_grade_key("fourth_primary").as_deref(), Some("4"));
        assert_eq!(normalize_grade_key("first_sec").as_deref(), Some("10"));
        assert_eq!(normalize_grade_key("THIRD_SECONDARY").as_deref(), Some("12"));
        assert_eq!(normalize_grade_key(" 07 ").as_deref(), Some("7"));
    }

    #[test]
    fn test_normalize_unknown_is_passed_through() {
        assert_eq!(normalize_grade_key("kg2").as_deref(), Some("kg2"));
        assert_eq!(normalize_grade_key("13").as_deref(), Some("13"));
        assert_eq!(normalize_grade_key("   "), None);
    }

    #[test]
    fn test_variations() {
        assert_eq!(
            grade_variations("10"),
            vec!["10", "first_sec", "first_secondary"]
        );
        assert_eq!(grade_variations("second_prep"), vec!["8", "second_prep"]);
        assert_eq!(grade_variations("kg2"), vec!["kg2"]);
        assert!(grade_variations("").is_empty());
    }
}
