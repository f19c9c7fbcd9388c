//! Auth route handlers.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use cornershop_core::{WorkflowError, policy, types::Role};

use crate::error::AppError;
use crate::middleware::RequireUser;
use crate::middleware::auth::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired login name.
    pub username: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
    /// Requested role. Defaults to `Customer`.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Register a new user.
///
/// Anonymous callers always get the customer role; only an authenticated
/// admin may grant the admin role. Self-registration also logs the new
/// user in, while an admin creating an account keeps their own session.
#[instrument(skip(state, session, request), fields(username = %request.username))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registrar: Option<CurrentUser> = session
        .get(session_keys::CURRENT_USER)
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;

    let role = request.role.unwrap_or(Role::Customer);
    authorize_role_grant(role, registrar.as_ref())?;

    let service = AuthService::new(state.pool());
    let user = service
        .register(&request.username, &request.password, role)
        .await?;

    if registrar.is_none() {
        let claims = CurrentUser::from(&user);
        set_current_user(&session, &claims)
            .await
            .map_err(|err| AppError::Internal(err.to_string()))?;
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "username": user.username, "role": user.role })),
    ))
}

/// Reject admin-role grants from anyone but an authenticated admin.
fn authorize_role_grant(role: Role, registrar: Option<&CurrentUser>) -> Result<(), AppError> {
    if role == Role::Admin {
        let registrar = registrar.ok_or(WorkflowError::Unauthorized)?;
        policy::require_admin(&registrar.actor())?;
    }
    Ok(())
}

/// Verify credentials and establish the session.
#[instrument(skip(state, session, request), fields(username = %request.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = AuthService::new(state.pool());
    let user = service.login(&request.username, &request.password).await?;

    // Rotate the session ID so a pre-login cookie cannot be replayed
    session
        .cycle_id()
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;

    let claims = CurrentUser::from(&user);
    set_current_user(&session, &claims)
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;

    Ok(Json(json!({ "username": user.username, "role": user.role })))
}

/// Clear the session.
pub async fn logout(session: Session) -> Result<impl IntoResponse, AppError> {
    clear_current_user(&session)
        .await
        .map_err(|err| AppError::Internal(err.to_string()))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Return the current session claims.
pub async fn me(RequireUser(user): RequireUser) -> impl IntoResponse {
    Json(json!({ "username": user.username, "role": user.role }))
}
