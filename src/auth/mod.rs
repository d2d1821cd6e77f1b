//! Authentication module for the ChatEch server
//!
//! Registration, login and stateless bearer-token verification.

mod extractor;
pub mod handlers;
mod service;

pub use extractor::AuthenticatedUser;
pub use service::{AuthService, AuthSession, Claims};
