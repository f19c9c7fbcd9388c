//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use cornershop_core::storage::Etag;
use cornershop_core::types::{CustomerId, OrderId, OrderStatus, ProductId};
use cornershop_core::workflow::{OrderDraft, OrderUpdate};

use super::Versioned;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Create form data.
#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    /// Target customer. Required for admins, ignored for customers.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Update form data; carries the version tag from the last read.
#[derive(Debug, Deserialize)]
pub struct OrderUpdateRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    /// New status. Admin only; a non-admin supplying one is rejected.
    #[serde(default)]
    pub status: Option<OrderStatus>,
    pub etag: String,
}

/// Status-assignment form data.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// List orders visible to the actor.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, AppError> {
    let orders = state.orders().list(&user.actor()).await?;
    let views: Vec<_> = orders
        .into_iter()
        .map(|(order, etag)| Versioned::new(order, etag))
        .collect();
    Ok(Json(views))
}

/// Place an order.
#[instrument(skip(state, request), fields(product_id = %request.product_id))]
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<OrderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let draft = OrderDraft {
        customer_id: request.customer_id,
        product_id: request.product_id,
        quantity: request.quantity,
    };
    let order = state.orders().create(draft, &user.actor()).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Fetch one order.
pub async fn get_one(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse, AppError> {
    let (order, etag) = state.orders().get(id, &user.actor()).await?;
    Ok(Json(Versioned::new(order, etag)))
}

/// Edit an order, guarded by the submitted version tag.
#[instrument(skip(state, request), fields(order_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
    Json(request): Json<OrderUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let changes = OrderUpdate {
        product_id: request.product_id,
        quantity: request.quantity,
        status: request.status,
    };
    let etag = Etag::from(request.etag);
    let order = state
        .orders()
        .update(id, changes, etag, &user.actor())
        .await?;
    Ok(Json(order))
}

/// Assign an order status. Admin only.
#[instrument(skip(state, request), fields(order_id = %id))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
    Json(request): Json<StatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let order = state
        .orders()
        .set_status(id, request.status, &user.actor())
        .await?;
    Ok(Json(order))
}

/// Delete an order.
#[instrument(skip(state), fields(order_id = %id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<impl IntoResponse, AppError> {
    state.orders().delete(id, &user.actor()).await?;
    Ok(StatusCode::NO_CONTENT)
}
