//! Server-side services.

pub mod auth;
pub mod documents;
