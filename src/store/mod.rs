//! # Dashboard Aggregation Store
//!
//! وضعیت داشبورد دانش‌آموز رو نگه میداره و با دو درخواست همزمان پرش میکنه.
//!
//! ## جریان کار
//!
//! ```text
//! fetch_dashboard_data()
//!   ├─ is_loading = true, error = None
//!   ├─ try_join!(fetch_stats, fetch_my_courses)   (با timeout)
//!   ├─ validate هر دو
//!   ├─ موفق → stats + courses یکجا جایگزین میشن
//!   └─ شکست → stats جایگزین، courses خالی، error پر
//! ```
//!
//! ## مفاهیم Rust:
//! - **watch channel**: یک نویسنده، چند خواننده؛ هر خواننده آخرین وضعیت رو میبینه
//! - **try_join!**: اجرای همزمان؛ اولین خطا کل عملیات رو fail میکنه
//! - **Mutex<()>**: جلوگیری از دو fetch همزمان
//! - **Drop guard**: fetchی که وسط کار cancel بشه هم وضعیت نهایی منتشر میکنه
//!
//! ## همزمانی و reset
//! - شمارنده `completed` تشخیص میده منتظر پشت قفل واقعا یک fetch تموم شده رو دیده
//!   یا فقط پشت یک منتظر دیگه بوده؛ در حالت دوم خودش fetch میکنه.
//! - `reset` وسط fetch برنده‌ست: نتیجه fetch قدیمی منتشر نمیشه.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::{
    api::DashboardApi,
    error::{AppError, Result, DEFAULT_FETCH_ERROR},
    models::{DashboardReadModel, DashboardStats, EnrolledCourseSummary},
};

/// نتیجه یک بار صدا زدن [`DashboardStore::fetch_dashboard_data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// هر دو درخواست موفق بودن
    Loaded,
    /// حداقل یکی شکست خورد؛ وضعیت جایگزین منتشر شد
    Failed,
    /// یه fetch دیگه در جریان بود؛ درخواست جدیدی فرستاده نشد
    Coalesced,
    /// وسط fetch، `reset` صدا زده شد؛ نتیجه منتشر نشد
    Discarded,
}

// =====================================
// DashboardStore
// =====================================
/// نگهدارنده وضعیت داشبورد
///
/// به جای singleton سراسری، هر نمونه از طریق [`crate::services::AppState`]
/// تزریق میشه. `reset` وضعیت رو به حالت اولیه برمیگردونه.
pub struct DashboardStore<A> {
    api: Arc<A>,
    timeout: Duration,
    state: watch::Sender<DashboardReadModel>,
    in_flight: Mutex<()>,
    /// تعداد fetchهایی که تا آخر رفتن
    completed: AtomicU64,
    /// با هر `reset` یکی زیاد میشه
    epoch: AtomicU64,
}

impl<A: DashboardApi> DashboardStore<A> {
    /// ساخت store با وضعیت اولیه خالی
    ///
    /// `timeout` سقف زمان کل fetch (هر دو درخواست با هم) هست.
    #[must_use]
    pub fn new(api: Arc<A>, timeout: Duration) -> Self {
        let (state, _) = watch::channel(DashboardReadModel::default());

        Self {
            api,
            timeout,
            state,
            in_flight: Mutex::new(()),
            completed: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
        }
    }

    /// کپی وضعیت فعلی
    #[must_use]
    pub fn snapshot(&self) -> DashboardReadModel {
        self.state.borrow().clone()
    }

    /// گرفتن receiver برای دنبال کردن تغییرات
    ///
    /// هر کامپوننت نمایشی میتونه receiver خودش رو داشته باشه.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardReadModel> {
        self.state.subscribe()
    }

    /// آیا الان در حال بارگذاری هستیم؟
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// برگشت به وضعیت اولیه (برای logout یا جدا کردن تست‌ها)
    ///
    /// اگه fetchی در جریان باشه، نتیجه‌اش دور ریخته میشه.
    pub fn reset(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.state.send_replace(DashboardReadModel::default());
    }

    /// بارگذاری آمار و دوره‌ها
    ///
    /// هیچ‌وقت خطا برنمیگردونه؛ هر شکستی به وضعیت جایگزین تبدیل میشه.
    /// اگه fetch دیگه‌ای در جریان باشه، منتظر تموم شدنش میمونه و
    /// [`FetchOutcome::Coalesced`] برمیگردونه. اگه future وسط کار drop بشه،
    /// وضعیت شکست منتشر میشه.
    #[instrument(skip(self))]
    pub async fn fetch_dashboard_data(&self) -> FetchOutcome {
        let seen = self.completed.load(Ordering::Acquire);

        let _lock = match self.in_flight.try_lock() {
            Ok(lock) => lock,
            Err(_) => {
                debug!("Dashboard fetch already in flight, waiting for it");
                let lock = self.in_flight.lock().await;
                if self.completed.load(Ordering::Acquire) != seen {
                    return FetchOutcome::Coalesced;
                }
                // قبلی cancel شد یا قفل دست یک منتظر دیگه بود
                lock
            }
        };

        let pending = PendingFetch::start(&self.state, &self.epoch);

        let (model, outcome) = match self.load().await {
            Ok((stats, courses)) => {
                info!(courses = courses.len(), xp = stats.xp, "Dashboard data loaded");
                (DashboardReadModel::loaded(stats, courses), FetchOutcome::Loaded)
            }
            Err(err) => {
                warn!(error = %err, "Failed to load dashboard data, using fallback");
                (DashboardReadModel::failed(err.user_message()), FetchOutcome::Failed)
            }
        };

        let published = pending.finish(model);
        self.completed.fetch_add(1, Ordering::AcqRel);

        if published {
            outcome
        } else {
            debug!("Store was reset during fetch, result dropped");
            FetchOutcome::Discarded
        }
    }

    /// دو درخواست همزمان + اعتبارسنجی
    async fn load(&self) -> Result<(DashboardStats, Vec<EnrolledCourseSummary>)> {
        let joined = async {
            tokio::try_join!(self.api.fetch_stats(), self.api.fetch_my_courses())
        };

        let (stats, courses) = tokio::time::timeout(self.timeout, joined)
            .await
            .map_err(|_| AppError::Timeout(self.timeout))??;

        stats.validate()?;
        for course in &courses {
            course.validate()?;
        }

        Ok((stats, courses))
    }
}

// =====================================
// PendingFetch
// =====================================
/// fetchی که `is_loading` رو روشن کرده و هنوز نتیجه نداده
///
/// اگه قبل از `finish` drop بشه (task abort، `select!`)، وضعیت شکست منتشر میکنه
/// تا هیچ خواننده‌ای برای همیشه `is_loading = true` نبینه.
struct PendingFetch<'a> {
    state: &'a watch::Sender<DashboardReadModel>,
    epoch: &'a AtomicU64,
    started_at: u64,
    finished: bool,
}

impl<'a> PendingFetch<'a> {
    fn start(state: &'a watch::Sender<DashboardReadModel>, epoch: &'a AtomicU64) -> Self {
        let started_at = epoch.load(Ordering::Acquire);
        state.send_modify(|s| {
            s.is_loading = true;
            s.error = None;
        });

        Self {
            state,
            epoch,
            started_at,
            finished: false,
        }
    }

    fn is_current(&self) -> bool {
        self.epoch.load(Ordering::Acquire) == self.started_at
    }

    /// انتشار نتیجه؛ `false` یعنی بین شروع و پایان `reset` شده
    fn finish(mut self, model: DashboardReadModel) -> bool {
        self.finished = true;
        if !self.is_current() {
            return false;
        }
        self.state.send_replace(model);
        true
    }
}

impl Drop for PendingFetch<'_> {
    fn drop(&mut self) {
        if !self.finished && self.is_current() {
            warn!("Dashboard fetch cancelled before completion");
            self.state
                .send_replace(DashboardReadModel::failed(DEFAULT_FETCH_ERROR));
        }
    }
}

// =====================================
// Tests
// =====================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{api::MockDashboardApi, models::CourseId};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn stats() -> DashboardStats {
        DashboardStats {
            enrolled_courses_count: 2,
            total_exams_score: 180,
            learning_hours: 12,
            streak: "3 أيام".to_string(),
            understanding_rate: 75.0,
            performance_level: 68.0,
            accuracy: 90.0,
            xp: 640,
            rank: "متوسط".to_string(),
        }
    }

    fn courses() -> Vec<EnrolledCourseSummary> {
        vec![EnrolledCourseSummary {
            id: CourseId::from(1u64),
            title: "الكيمياء العضوية".to_string(),
            instructor: "أ. سارة".to_string(),
            progress: 50.0,
            lessons_count: 8,
            completed_count: 4,
            thumbnail: Some("thumbnails/chem.png".to_string()),
        }]
    }

    fn store(mock: MockDashboardApi) -> DashboardStore<MockDashboardApi> {
        DashboardStore::new(Arc::new(mock), TIMEOUT)
    }

    /// fake دستی که کند جواب میده و تعداد صدا زدن‌ها رو میشمره
    struct SlowApi {
        delay: Duration,
        stats_calls: AtomicUsize,
        course_calls: AtomicUsize,
    }

    impl SlowApi {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                stats_calls: AtomicUsize::new(0),
                course_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl DashboardApi for SlowApi {
        async fn fetch_stats(&self) -> Result<DashboardStats> {
            self.stats_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(stats())
        }

        async fn fetch_my_courses(&self) -> Result<Vec<EnrolledCourseSummary>> {
            self.course_calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(courses())
        }
    }

    #[test]
    fn test_initial_state() {
        let store = store(MockDashboardApi::new());
        assert_eq!(store.snapshot(), DashboardReadModel::default());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_success_replaces_state() {
        let mut mock = MockDashboardApi::new();
        mock.expect_fetch_stats().times(1).returning(|| Ok(stats()));
        mock.expect_fetch_my_courses().times(1).returning(|| Ok(courses()));
        let store = store(mock);

        assert_eq!(store.fetch_dashboard_data().await, FetchOutcome::Loaded);

        let state = store.snapshot();
        assert_eq!(state, DashboardReadModel::loaded(stats(), courses()));
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
    }

    #[tokio::test]
    async fn test_one_failure_discards_both() {
        let mut mock = MockDashboardApi::new();
        mock.expect_fetch_stats().returning(|| Ok(stats()));
        mock.expect_fetch_my_courses().returning(|| {
            Err(AppError::api(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some("الخادم غير متاح".to_string()),
            ))
        });
        let store = store(mock);

        assert_eq!(store.fetch_dashboard_data().await, FetchOutcome::Failed);

        let state = store.snapshot();
        assert_eq!(state.stats, Some(DashboardStats::fallback()));
        assert!(state.courses.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("الخادم غير متاح"));
    }

    #[tokio::test]
    async fn test_failure_without_server_message_uses_default() {
        let mut mock = MockDashboardApi::new();
        mock.expect_fetch_stats()
            .returning(|| Err(AppError::api(StatusCode::BAD_GATEWAY, None)));
        mock.expect_fetch_my_courses().returning(|| Ok(courses()));
        let store = store(mock);

        store.fetch_dashboard_data().await;

        assert_eq!(store.snapshot().error.as_deref(), Some(DEFAULT_FETCH_ERROR));
    }

    #[tokio::test]
    async fn test_invalid_payload_fails_closed() {
        let mut mock = MockDashboardApi::new();
        mock.expect_fetch_stats().returning(|| {
            let mut bad = stats();
            bad.understanding_rate = 250.0;
            Ok(bad)
        });
        mock.expect_fetch_my_courses().returning(|| Ok(courses()));
        let store = store(mock);

        assert_eq!(store.fetch_dashboard_data().await, FetchOutcome::Failed);
        assert_eq!(store.snapshot(), DashboardReadModel::failed(DEFAULT_FETCH_ERROR));
    }

    #[tokio::test]
    async fn test_success_after_failure_clears_error() {
        let mut mock = MockDashboardApi::new();
        let mut seq = mockall::Sequence::new();
        mock.expect_fetch_stats()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(AppError::InvalidPayload("x".to_string())));
        mock.expect_fetch_stats()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(stats()));
        mock.expect_fetch_my_courses().returning(|| Ok(courses()));
        let store = store(mock);

        assert_eq!(store.fetch_dashboard_data().await, FetchOutcome::Failed);
        assert_eq!(store.fetch_dashboard_data().await, FetchOutcome::Loaded);
        assert_eq!(store.snapshot().error, None);
        assert_eq!(store.snapshot().courses, courses());
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_coalesced() {
        let api = Arc::new(SlowApi::new(Duration::from_millis(50)));
        let store = DashboardStore::new(api.clone(), TIMEOUT);

        let (first, second) = tokio::join!(
            store.fetch_dashboard_data(),
            store.fetch_dashboard_data()
        );

        assert_eq!(first, FetchOutcome::Loaded);
        assert_eq!(second, FetchOutcome::Coalesced);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.course_calls.load(Ordering::SeqCst), 1);

        // بعد از تموم شدن، fetch بعدی دوباره هر دو درخواست رو میفرسته
        assert_eq!(store.fetch_dashboard_data().await, FetchOutcome::Loaded);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_loading_flag_is_visible_to_subscribers() {
        let api = Arc::new(SlowApi::new(Duration::from_millis(100)));
        let store = DashboardStore::new(api, TIMEOUT);
        let rx = store.subscribe();

        let observe = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            rx.borrow().is_loading
        };
        let (_, was_loading) = tokio::join!(store.fetch_dashboard_data(), observe);

        assert!(was_loading);
        assert!(!rx.borrow().is_loading);
    }

    #[tokio::test]
    async fn test_hung_request_times_out() {
        let api = Arc::new(SlowApi::new(Duration::from_secs(30)));
        let store = DashboardStore::new(api, Duration::from_millis(20));

        assert_eq!(store.fetch_dashboard_data().await, FetchOutcome::Failed);

        let state = store.snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(DEFAULT_FETCH_ERROR));
    }

    #[tokio::test]
    async fn test_reset_restores_initial_state() {
        let mut mock = MockDashboardApi::new();
        mock.expect_fetch_stats().returning(|| Ok(stats()));
        mock.expect_fetch_my_courses().returning(|| Ok(courses()));
        let store = store(mock);

        store.fetch_dashboard_data().await;
        store.reset();

        assert_eq!(store.snapshot(), DashboardReadModel::default());
    }

    #[tokio::test]
    async fn test_aborted_fetch_does_not_stay_loading() {
        let api = Arc::new(SlowApi::new(Duration::from_secs(30)));
        let store = Arc::new(DashboardStore::new(api, TIMEOUT));

        let task = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.fetch_dashboard_data().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.is_loading());

        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        assert_eq!(store.snapshot(), DashboardReadModel::failed(DEFAULT_FETCH_ERROR));
    }

    #[tokio::test]
    async fn test_waiter_behind_cancelled_fetch_runs_its_own() {
        let api = Arc::new(SlowApi::new(Duration::from_millis(100)));
        let store = Arc::new(DashboardStore::new(api.clone(), TIMEOUT));

        let first = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.fetch_dashboard_data().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        let second = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.fetch_dashboard_data().await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        first.abort();

        assert_eq!(second.await.unwrap(), FetchOutcome::Loaded);
        assert_eq!(api.stats_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.snapshot().courses, courses());
    }

    #[tokio::test]
    async fn test_reset_during_fetch_wins() {
        let api = Arc::new(SlowApi::new(Duration::from_millis(100)));
        let store = DashboardStore::new(api, TIMEOUT);

        let reset_midway = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            store.reset();
        };
        let (outcome, ()) = tokio::join!(store.fetch_dashboard_data(), reset_midway);

        assert_eq!(outcome, FetchOutcome::Discarded);
        assert_eq!(store.snapshot(), DashboardReadModel::default());
    }
}
