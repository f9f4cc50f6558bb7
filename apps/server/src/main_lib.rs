use std::sync::Arc;

use calendar_core::calendar::{CalendarService, CalendarServiceTrait};
use calendar_storage_sqlite::{
    create_pool, events::seed_demo_event, events::EventRepository, init, run_migrations,
    spawn_writer, DbPool,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{auth::AuthManager, config::Config};

pub struct AppState {
    pub calendar_service: Arc<dyn CalendarServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
    pub pool: Arc<DbPool>,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.as_ref().clone());

    if config.seed_demo_data {
        let today = chrono::Local::now().date_naive();
        seed_demo_event(&writer, today).await;
    }

    let repository = Arc::new(EventRepository::new(pool.clone(), writer));
    let calendar_service = Arc::new(CalendarService::new(repository));
    let auth = Arc::new(AuthManager::new(&config.auth));

    Ok(Arc::new(AppState {
        calendar_service,
        auth,
        pool,
    }))
}
