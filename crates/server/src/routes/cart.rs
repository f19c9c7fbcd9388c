//! Cart route handlers.
//!
//! Each add is its own line; confirming moves every `Submitted` line of the
//! calling customer to `Pending` in one statement. Status assignment on
//! individual lines is an admin operation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use cornershop_core::policy;
use cornershop_core::types::{CartLineId, CartStatus, ProductId};

use crate::db::cart::CartRepository;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Status-assignment form data.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: CartStatus,
}

/// List cart lines: everything for admins, own lines for customers.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, AppError> {
    let repo = CartRepository::new(state.pool());
    let lines = if user.actor().is_admin() {
        repo.list_all().await?
    } else {
        repo.list_for(&user.username).await?
    };
    Ok(Json(lines))
}

/// Add a line to the caller's cart.
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<AddRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be a positive integer".to_owned(),
        ));
    }

    // The product must exist at add time; the line itself stores only the
    // reference.
    state.products().get(request.product_id).await?;

    let repo = CartRepository::new(state.pool());
    let line = repo
        .add(&user.username, request.product_id, request.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(line)))
}

/// Confirm the caller's submitted lines, returning the transitioned set.
#[instrument(skip(state))]
pub async fn confirm(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, AppError> {
    let repo = CartRepository::new(state.pool());
    let lines = repo.confirm_submitted(&user.username).await?;
    Ok(Json(json!({ "confirmed": lines })))
}

/// Assign a line status. Admin only.
#[instrument(skip(state, request), fields(line_id = %id))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<CartLineId>,
    Json(request): Json<StatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require_admin(&user.actor())?;

    let repo = CartRepository::new(state.pool());
    repo.update_status(id, &request.status).await?;
    let line = repo.get(id).await?.ok_or(AppError::Repository(
        crate::db::RepositoryError::NotFound,
    ))?;
    Ok(Json(line))
}

/// Remove a line. Owner or admin.
#[instrument(skip(state), fields(line_id = %id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<CartLineId>,
) -> Result<impl IntoResponse, AppError> {
    let repo = CartRepository::new(state.pool());
    let line = repo
        .get(id)
        .await?
        .ok_or(AppError::Repository(crate::db::RepositoryError::NotFound))?;
    policy::authorize_owner(&user.actor(), &line.customer_username)?;

    repo.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
