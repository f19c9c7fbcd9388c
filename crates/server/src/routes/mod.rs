//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /ready                      - Readiness check (database ping)
//!
//! # Auth
//! POST /api/auth/register          - Register a user (admin role grants
//!                                    require an admin session)
//! POST /api/auth/login             - Login, establishes the session
//! POST /api/auth/logout            - Logout, clears the session
//! GET  /api/auth/me                - Current session claims
//!
//! # Customers (session required)
//! GET    /api/customers            - List (admin all, customer own)
//! POST   /api/customers            - Create a profile
//! GET    /api/customers/{id}       - Fetch one
//! PUT    /api/customers/{id}       - Update (etag-guarded)
//! DELETE /api/customers/{id}       - Delete
//!
//! # Products (list/get public to any session; mutations admin-only)
//! GET    /api/products             - List
//! POST   /api/products             - Create
//! GET    /api/products/{id}        - Fetch one
//! PUT    /api/products/{id}        - Update (etag-guarded)
//! DELETE /api/products/{id}        - Delete
//!
//! # Orders (session required)
//! GET    /api/orders               - List (admin all, customer own)
//! POST   /api/orders               - Create
//! GET    /api/orders/{id}          - Fetch one
//! PUT    /api/orders/{id}          - Update (etag-guarded)
//! POST   /api/orders/{id}/status   - Set status (admin)
//! DELETE /api/orders/{id}          - Delete
//!
//! # Cart (session required)
//! GET    /api/cart                 - List own lines (admin: all)
//! POST   /api/cart                 - Add a line
//! POST   /api/cart/confirm         - Confirm submitted lines
//! POST   /api/cart/{id}/status     - Set line status (admin)
//! DELETE /api/cart/{id}            - Remove a line
//!
//! # Uploads (session required)
//! POST /api/uploads                - Store a payment proof (multipart)
//! GET  /api/uploads                - List stored documents (admin)
//! GET  /api/uploads/{name}         - Download a document (admin)
//! ```

pub mod auth;
pub mod cart;
pub mod customers;
pub mod orders;
pub mod products;
pub mod uploads;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::Serialize;
use serde_json::json;

use crate::state::AppState;

/// Response wrapper pairing an entity with its version tag.
#[derive(Debug, Serialize)]
pub struct Versioned<T> {
    /// The entity body.
    #[serde(flatten)]
    pub body: T,
    /// Version tag to echo back on the next update.
    pub etag: String,
}

impl<T> Versioned<T> {
    fn new(body: T, etag: cornershop_core::storage::Etag) -> Self {
        Self {
            body,
            etag: etag.to_string(),
        }
    }
}

/// Build the full application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .nest("/api/auth", auth_routes())
        .nest("/api/customers", customer_routes())
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/uploads", upload_routes())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route(
            "/{id}",
            get(customers::get_one)
                .put(customers::update)
                .delete(customers::remove),
        )
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route(
            "/{id}",
            get(products::get_one)
                .put(products::update)
                .delete(products::remove),
        )
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route(
            "/{id}",
            get(orders::get_one)
                .put(orders::update)
                .delete(orders::remove),
        )
        .route("/{id}/status", post(orders::set_status))
}

fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::list).post(cart::add))
        .route("/confirm", post(cart::confirm))
        .route("/{id}/status", post(cart::set_status))
        .route("/{id}", delete(cart::remove))
}

fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(uploads::store).get(uploads::list))
        .route("/{name}", get(uploads::download))
        .layer(uploads::body_limit())
}

/// Liveness check.
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Readiness check: pings the database.
async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => (StatusCode::OK, Json(json!({ "status": "ready" }))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded" })),
        ),
    }
}
