//! # مدل‌های داشبورد دانش‌آموز
//!
//! - [`DashboardStats`]: آمار کلی (از `GET /dashboard/stats`)
//! - [`EnrolledCourseSummary`]: خلاصه هر دوره ثبت‌نام شده (از `GET /student/courses`)
//! - [`DashboardReadModel`]: چیزی که UI میخونه

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::CourseId;
use crate::urls::AssetUrlResolver;

/// برچسب streak وقتی داده‌ای نیست ("جدید")
pub const FALLBACK_STREAK: &str = "جديد";

/// برچسب rank وقتی داده‌ای نیست ("مبتدی")
pub const FALLBACK_RANK: &str = "مبتدئ";

// =====================================
// DashboardStats
// =====================================
/// آمار کلی داشبورد
///
/// همیشه یکجا جایگزین میشه، هیچ‌وقت فیلد به فیلد تغییر نمیکنه.
/// شمارنده‌ها unsigned هستن پس عدد منفی موقع deserialize رد میشه.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub enrolled_courses_count: u32,
    pub total_exams_score: u32,
    pub learning_hours: u32,
    pub streak: String,

    /// درصد فهم مطالب (۰ تا ۱۰۰)
    #[validate(range(min = 0.0, max = 100.0))]
    pub understanding_rate: f64,

    /// سطح عملکرد (۰ تا ۱۰۰)
    #[validate(range(min = 0.0, max = 100.0))]
    pub performance_level: f64,

    /// دقت پاسخ‌ها (۰ تا ۱۰۰)
    #[validate(range(min = 0.0, max = 100.0))]
    pub accuracy: f64,

    pub xp: u32,
    pub rank: String,
}

impl DashboardStats {
    /// آمار جایگزین بعد از شکست بارگذاری
    ///
    /// همه عددها صفر، streak و rank برچسب‌های پیش‌فرض
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            enrolled_courses_count: 0,
            total_exams_score: 0,
            learning_hours: 0,
            streak: FALLBACK_STREAK.to_string(),
            understanding_rate: 0.0,
            performance_level: 0.0,
            accuracy: 0.0,
            xp: 0,
            rank: FALLBACK_RANK.to_string(),
        }
    }
}

// =====================================
// EnrolledCourseSummary
// =====================================
/// خلاصه یک دوره ثبت‌نام شده
///
/// `completed_count <= lessons_count` انتظار میره ولی اجبار نمیشه.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourseSummary {
    pub id: CourseId,

    #[validate(length(min = 1))]
    pub title: String,

    pub instructor: String,

    /// درصد پیشرفت (۰ تا ۱۰۰)
    #[validate(range(min = 0.0, max = 100.0))]
    pub progress: f64,

    pub lessons_count: u32,
    pub completed_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl EnrolledCourseSummary {
    /// آیا دوره تموم شده؟
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.progress >= 100.0
    }

    /// تعداد درس‌های باقی‌مونده (هیچ‌وقت منفی نمیشه)
    #[must_use]
    pub fn remaining_lessons(&self) -> u32 {
        self.lessons_count.saturating_sub(self.completed_count)
    }

    /// آدرس کامل تصویر دوره، یا رشته خالی
    #[must_use]
    pub fn thumbnail_url(&self, resolver: &AssetUrlResolver) -> String {
        resolver.resolve(self.thumbnail.as_deref())
    }
}

// =====================================
// DashboardReadModel
// =====================================
/// وضعیت داشبورد که UI میخونه
///
/// فقط store اینو مینویسه. حالت‌های ممکن:
///
/// ```text
/// اولیه:   stats=None           courses=[]   is_loading=false  error=None
/// لودینگ:  (قبلی)               (قبلی)       is_loading=true   error=None
/// موفق:    stats=Some(fetched)  courses=..   is_loading=false  error=None
/// شکست:    stats=Some(fallback) courses=[]   is_loading=false  error=Some(msg)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReadModel {
    pub stats: Option<DashboardStats>,
    pub courses: Vec<EnrolledCourseSummary>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl DashboardReadModel {
    /// وضعیت بعد از بارگذاری موفق
    #[must_use]
    pub fn loaded(stats: DashboardStats, courses: Vec<EnrolledCourseSummary>) -> Self {
        Self {
            stats: Some(stats),
            courses,
            is_loading: false,
            error: None,
        }
    }

    /// وضعیت بعد از شکست
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            stats: Some(DashboardStats::fallback()),
            courses: Vec::new(),
            is_loading: false,
            error: Some(message.into()),
        }
    }

    /// آیا حداقل یک بار بارگذاری تموم شده؟
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.is_loading && self.stats.is_some()
    }
}
