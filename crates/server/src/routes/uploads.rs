//! Payment-proof upload route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use tracing::instrument;

use cornershop_core::policy;

use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Largest accepted proof document, in bytes.
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Body limit for the upload route.
///
/// Axum's built-in limit (2 MB) is smaller than [`MAX_DOCUMENT_BYTES`], so
/// the route must raise it or large proofs never reach the handler.
pub fn body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(MAX_DOCUMENT_BYTES)
}

/// Store a payment proof from a multipart form.
///
/// Expects a single file field named `file`; responds with the generated
/// stored name the client can reference later.
#[instrument(skip(state, multipart))]
pub async fn store(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let (original_name, bytes) = read_proof_field(multipart).await?;
    let stored = state.documents().save(&original_name, &bytes).await?;
    Ok((StatusCode::CREATED, Json(json!({ "file_name": stored }))))
}

/// Pull the `file` field out of the form and enforce the content bounds.
async fn read_proof_field(mut multipart: Multipart) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field
            .file_name()
            .map_or_else(|| "upload".to_owned(), ToOwned::to_owned);
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?;

        validate_proof(&bytes)?;
        return Ok((original_name, bytes));
    }

    Err(AppError::BadRequest(
        "multipart form must contain a 'file' field".to_owned(),
    ))
}

fn validate_proof(bytes: &[u8]) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::BadRequest("uploaded file is empty".to_owned()));
    }
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(AppError::BadRequest(
            "uploaded file exceeds the size limit".to_owned(),
        ));
    }
    Ok(())
}

/// List stored documents. Admin only.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, AppError> {
    policy::require_admin(&user.actor())?;
    let names = state.documents().list().await?;
    Ok(Json(json!({ "documents": names })))
}

/// Download a stored document. Admin only.
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    policy::require_admin(&user.actor())?;
    let bytes = state.documents().get(&name).await?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        bytes,
    ))
}
