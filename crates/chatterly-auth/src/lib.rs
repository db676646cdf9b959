//! Authentication core for chatterly
//!
//! This crate ties the building blocks together:
//! - [`authenticate_tokens`]: the per-request gate, refreshing an expired
//!   access token from a valid refresh token
//! - [`AuthService`]: registration through an OAuth provider, request
//!   authentication, username assignment and channel-token issuance
//!
//! Expiry is the only failure that triggers a remedial action. Everything
//! else is reported to the caller as-is.

#![warn(clippy::all)]

pub mod errors;
pub mod gate;
pub mod service;
pub mod traits;
pub mod types;
pub mod validation;

// Re-exports
pub use errors::{AuthError, Result};
pub use gate::authenticate_tokens;
pub use service::AuthService;
pub use traits::AuthOrchestrator;
pub use types::*;
