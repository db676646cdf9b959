//! # chatterly-sessions
//!
//! Self-contained, HMAC-signed credentials.
//!
//! - [`SessionTokenProvider`] issues and verifies the access/refresh pair a
//!   client presents on every request.
//! - [`ChannelTokenProvider`] issues and verifies a short-lived token scoped
//!   to one real-time channel session.
//!
//! Verification has exactly three outcomes: claims, [`SessionError::TokenExpired`]
//! or [`SessionError::TokenInvalid`]. Callers refresh only on expiry.

#![warn(clippy::all)]

pub mod errors;
mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use errors::*;
pub use service::{ChannelTokenProvider, SessionTokenProvider};
pub use types::*;
