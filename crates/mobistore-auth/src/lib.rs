//! Session authentication for the storefront.
//!
//! Provides the local session the checkout flow consults, plus a
//! file-backed store that keeps it between runs.

mod error;
mod session;
mod store;

pub use error::AuthError;
pub use session::{LocalSession, SessionToken};
pub use store::SessionStore;
