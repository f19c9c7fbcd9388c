//! Product catalog route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use cornershop_core::storage::Etag;
use cornershop_core::types::ProductId;
use cornershop_core::workflow::ProductDraft;

use super::Versioned;
use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Create/update form data.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
    /// URL of a freshly uploaded image; omit to keep the stored one.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProductRequest {
    fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image_url: self.image_url,
        }
    }
}

/// Update form data; carries the version tag from the last read.
#[derive(Debug, Deserialize)]
pub struct ProductUpdateRequest {
    #[serde(flatten)]
    pub fields: ProductRequest,
    pub etag: String,
}

/// List the catalog.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<impl IntoResponse, AppError> {
    let products = state.products().list().await?;
    let views: Vec<_> = products
        .into_iter()
        .map(|(product, etag)| Versioned::new(product, etag))
        .collect();
    Ok(Json(views))
}

/// Create a product. Admin only.
#[instrument(skip(state, request), fields(name = %request.name))]
pub async fn create(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<ProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .products()
        .create(request.into_draft(), &user.actor())
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Fetch one product.
pub async fn get_one(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    let (product, etag) = state.products().get(id).await?;
    Ok(Json(Versioned::new(product, etag)))
}

/// Update a product, guarded by the submitted version tag. Admin only.
#[instrument(skip(state, request), fields(product_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let etag = Etag::from(request.etag);
    let product = state
        .products()
        .update(id, request.fields.into_draft(), etag, &user.actor())
        .await?;
    Ok(Json(product))
}

/// Delete a product. Admin only.
#[instrument(skip(state), fields(product_id = %id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(id): Path<ProductId>,
) -> Result<impl IntoResponse, AppError> {
    state.products().delete(id, &user.actor()).await?;
    Ok(StatusCode::NO_CONTENT)
}
