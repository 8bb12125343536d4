use axum::extract::FromRef;
use axum::routing::{get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod models;
mod moderation;
mod routes;
mod schema;
mod services;

use config::AppConfig;
use moderation::{ModerationError, ModerationService, PgStore};
use pethub_shared::clients::db::{create_pool, DbPool};
use pethub_shared::errors::AppError;
use pethub_shared::middleware::metrics_middleware;
use pethub_shared::types::auth::JwtSecret;

pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub jwt: JwtSecret,
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// A moderation service bound to a freshly checked-out connection.
    pub fn moderation(&self) -> Result<ModerationService<PgStore>, AppError> {
        let store = PgStore::checkout(&self.db).map_err(ModerationError::from)?;
        Ok(ModerationService::new(store, self.config.cascade_mode))
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    use routes::{auth, listings, moderation, shelters, stats};

    let admin_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/shelters", get(listings::all_shelters))
        .route("/shelters/pending", get(listings::pending_shelters))
        .route("/shelters/blocked", get(listings::blocked_shelters))
        .route("/shelters/registration", post(moderation::decide_registration))
        .route("/shelters/status", post(moderation::set_shelter_status))
        .route("/shelters/:id/approve", put(moderation::approve_shelter))
        .route("/shelters/:id/block", put(moderation::block_shelter))
        .route("/shelters/:id/unblock", put(moderation::unblock_shelter))
        .route("/adopters", get(listings::all_adopters))
        .route("/adopters/inactive", get(listings::inactive_adopters))
        .route("/adopters/status", post(moderation::set_adopter_status))
        .route("/adopters/:id/activate", put(moderation::activate_adopter))
        .route("/reports", get(listings::reported_shelters))
        .route("/reports/:id/status", put(moderation::set_report_status))
        .route("/stats", get(stats::get_stats));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .route("/api/shelters", get(shelters::list_shelters))
        .route("/api/shelters/:id", get(shelters::get_shelter))
        .nest("/api/admin", admin_routes)
        .layer(axum::middleware::from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pethub_shared::middleware::init_tracing("pethub-admin");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = create_pool(&config.database_url, config.db_pool_size)?;
    let metrics = pethub_shared::middleware::init_metrics()?;
    metrics::describe_counter!(
        "moderation_transitions_total",
        "Moderation operations by outcome (applied, invalid_value, not_found, conflict, store_error, cascade_failed)"
    );
    let jwt = JwtSecret::new(&config.jwt_secret);

    tracing::info!(cascade_mode = ?config.cascade_mode, "moderation configured");

    let state = Arc::new(AppState { db, config, jwt, metrics });
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "pethub-admin starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
const TEST_SECRET: &str = "test-secret";

/// State whose pool never connects; handlers that reach the database fail.
#[cfg(test)]
pub(crate) fn test_state() -> Arc<AppState> {
    use diesel::pg::PgConnection;
    use diesel::r2d2::{ConnectionManager, Pool};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::time::Duration;

    let manager = ConnectionManager::<PgConnection>::new("postgres://nobody@127.0.0.1:1/none");
    let db = Pool::builder()
        .max_size(1)
        .min_idle(Some(0))
        .connection_timeout(Duration::from_millis(200))
        .build_unchecked(manager);

    let config: AppConfig = serde_json::from_value(serde_json::json!({})).unwrap();

    Arc::new(AppState {
        db,
        config,
        jwt: JwtSecret::new(TEST_SECRET),
        metrics: PrometheusBuilder::new().build_recorder().handle(),
    })
}

#[cfg(test)]
pub(crate) fn test_token() -> String {
    services::auth_service::create_access_token(1, &JwtSecret::new(TEST_SECRET), 300)
        .unwrap()
        .token
}
