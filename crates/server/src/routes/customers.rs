//! Customer profile route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use cornershop_core::storage::Etag;
use cornershop_core::types::CustomerId;
use cornershop_core::workflow::CustomerDraft;

use super::Versioned;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Create/update form data.
#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub shipping_address: String,
}

impl CustomerRequest {
    fn into_draft(self) -> CustomerDraft {
        CustomerDraft {
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            shipping_address: self.shipping_address,
        }
    }
}

/// Update form data; carries the version tag from the last read.
#[derive(Debug, Deserialize)]
pub struct CustomerUpdateRequest {
    #[serde(flatten)]
    pub fields: CustomerRequest,
    pub etag: String,
}

/// List customer profiles visible to the actor.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, AppError> {
    let customers = state.customers().list(&user.actor()).await?;
    let views: Vec<_> = customers
        .into_iter()
        .map(|(customer, etag)| Versioned::new(customer, etag))
        .collect();
    Ok(Json(views))
}

/// Create a customer profile.
#[instrument(skip(state, request), fields(username = %request.username))]
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<CustomerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let customer = state
        .customers()
        .create(request.into_draft(), &user.actor())
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Fetch one customer profile.
pub async fn get_one(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<CustomerId>,
) -> Result<impl IntoResponse, AppError> {
    let (customer, etag) = state.customers().get(id, &user.actor()).await?;
    Ok(Json(Versioned::new(customer, etag)))
}

/// Update a customer profile, guarded by the submitted version tag.
#[instrument(skip(state, request), fields(customer_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<CustomerId>,
    Json(request): Json<CustomerUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let etag = Etag::from(request.etag);
    let customer = state
        .customers()
        .update(id, request.fields.into_draft(), etag, &user.actor())
        .await?;
    Ok(Json(customer))
}

/// Delete a customer profile.
#[instrument(skip(state), fields(customer_id = %id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<CustomerId>,
) -> Result<impl IntoResponse, AppError> {
    state.customers().delete(id, &user.actor()).await?;
    Ok(StatusCode::NO_CONTENT)
}
