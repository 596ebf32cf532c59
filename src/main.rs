//! # Edu Portal Core - نقطه ورود باینری
//!
//! یک بار داشبورد رو از بک‌اند میگیره و نمای آماده نمایش رو به صورت JSON چاپ میکنه.
//! برای چک کردن سریع تنظیمات (`API_URL`، `API_TOKEN`) بدون اجرای UI کاربرد داره.

use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use edu_portal_core::{
    config::Config,
    error::Result,
    services::AppState,
    store::FetchOutcome,
};

#[tokio::main]
async fn main() -> Result<()> {
    // اگه فایل .env نباشه اوکیه
    dotenvy::dotenv().ok();

    init_tracing();

    let config = Config::from_env()?;
    info!(api = %config.api_base_url, environment = ?config.environment, "Configuration loaded");

    let app = AppState::new(config)?;

    match app.dashboard.fetch_dashboard_data().await {
        FetchOutcome::Loaded => info!("Dashboard loaded"),
        FetchOutcome::Failed => warn!("Dashboard fell back to empty state"),
        FetchOutcome::Coalesced | FetchOutcome::Discarded => {}
    }

    let view = app.dashboard_view();
    println!("{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}

/// راه‌اندازی سیستم tracing برای لاگینگ
///
/// لاگ‌ها روی stderr میرن تا خروجی JSON روی stdout تمیز بمونه.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("edu_portal_core=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_level(true),
        )
        .init();
}
