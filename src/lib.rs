/*!
 * # Accounts API
 *
 * A small accounts management service: CRUD over account records with
 * soft-delete semantics, backed by a pluggable repository. The in-memory
 * backend is the reference implementation; database and redis backends are
 * recognized by configuration but intentionally deferred.
 */

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;

use std::sync::Arc;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use handlers::AppState;

/// Builds the full application router over shared state: health probe plus
/// the account CRUD surface, with HTTP tracing and CORS applied.
pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(handlers::health::health_routes())
        .nest("/accounts", handlers::accounts::account_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
