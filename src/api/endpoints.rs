//! # مسیرهای API
//!
//! همه مسیرها نسبت به `api_base_url` هستن و با `/` شروع میشن.

/// مسیرهای داشبورد
pub mod dashboard {
    /// آمار کلی دانش‌آموز
    pub const STATS: &str = "/dashboard/stats";
}

/// مسیرهای دوره‌ها
pub mod courses {
    /// دوره‌های ثبت‌نام شده کاربر فعلی
    pub const MY_COURSES: &str = "/student/courses";
}
