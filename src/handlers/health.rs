use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::handlers::AppState;

const SERVICE_NAME: &str = "accounts-api";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    pub service: String,
    pub version: String,
}

/// Liveness probe. Reports unhealthy when the configured backend is invalid;
/// the store itself is probed with an active-only listing.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = match state.config.backend_kind() {
        Ok(_) => HealthStatus::Healthy,
        Err(e) => {
            warn!("Invalid repository backend configuration: {}", e);
            HealthStatus::Unhealthy
        }
    };

    // Repository connectivity probe. The in-memory backend cannot fail this;
    // a future persistent backend can.
    let active_accounts = state.repository.get_all(true).await;
    debug!(
        "Health probe saw {} active account(s)",
        active_accounts.len()
    );

    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            timestamp: Utc::now().to_rfc3339(),
            service: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Creates the router for the health endpoint
pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}
