//! Domain models local to the server: auth users, cart lines, and the
//! session claims the extractors work with.

pub mod cart;
pub mod user;

pub use cart::CartLine;
pub use user::{CurrentUser, User, session_keys};
