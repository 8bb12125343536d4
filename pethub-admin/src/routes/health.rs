use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use std::time::Duration;

use pethub_shared::types::api::{HealthCheck, HealthResponse};

use crate::AppState;

const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match state.db.get_timeout(DB_CHECK_TIMEOUT) {
        Ok(_) => HealthCheck::healthy("database"),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not reach the database");
            HealthCheck::unhealthy("database", e.to_string())
        }
    };

    Json(HealthResponse::new("pethub-admin", env!("CARGO_PKG_VERSION"), vec![database]))
}

/// Prometheus text exposition.
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics.render()
}
