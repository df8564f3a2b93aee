use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::common::{
    account_not_found, created_response, no_content_response, success_response, validate_input,
};
use crate::{
    errors::ApiError,
    handlers::AppState,
    models::account::{AccountPatch, AccountResponse, NewAccount},
};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// When true, soft-deleted accounts are excluded from the listing.
    #[serde(default)]
    pub active_only: bool,
}

/// Create a new account. The server assigns the id.
async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAccount>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let account = state.repository.create(payload.normalized()).await;

    info!("Account created: {}", account.id);

    Ok(created_response(AccountResponse::from(account)))
}

/// List accounts, optionally filtered to active ones.
async fn list_accounts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let accounts = state.repository.get_all(params.active_only).await;

    let views: Vec<AccountResponse> = accounts.into_iter().map(AccountResponse::from).collect();

    Ok(success_response(views))
}

/// Get a specific account by id; 404 for unknown or soft-deleted ids.
async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .repository
        .get_by_id(account_id)
        .await
        .ok_or_else(|| account_not_found(account_id))?;

    Ok(success_response(AccountResponse::from(account)))
}

/// Full replacement of an account's mutable fields.
async fn update_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<u64>,
    Json(payload): Json<NewAccount>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let account = state
        .repository
        .update(account_id, payload.normalized())
        .await
        .ok_or_else(|| account_not_found(account_id))?;

    info!("Account updated: {}", account_id);

    Ok(success_response(AccountResponse::from(account)))
}

/// Partial update: only provided fields are overwritten.
async fn partial_update_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<u64>,
    Json(payload): Json<AccountPatch>,
) -> Result<impl IntoResponse, ApiError> {
    validate_input(&payload)?;

    let account = state
        .repository
        .partial_update(account_id, payload)
        .await
        .ok_or_else(|| account_not_found(account_id))?;

    info!("Account partially updated: {}", account_id);

    Ok(success_response(AccountResponse::from(account)))
}

/// Soft-delete an account; 404 only for ids that were never created.
async fn delete_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<u64>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.repository.delete(account_id).await {
        return Err(account_not_found(account_id));
    }

    info!("Account deleted: {}", account_id);

    Ok(no_content_response())
}

/// Creates the router for account endpoints
pub fn account_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(create_account))
        .route("/", get(list_accounts))
        .route("/:id", get(get_account))
        .route("/:id", put(update_account))
        .route("/:id", patch(partial_update_account))
        .route("/:id", delete(delete_account))
}
