//! # chatterly-oauth
//!
//! Federation of external OAuth 2.0 identity providers.
//!
//! The supported providers form a closed set ([`ProviderKind`]). Each one
//! has its own user-info payload shape, normalized into a single
//! [`chatterly_identity::Identity`].
//!
//! # Security Note
//! Provider access tokens are used once to fetch the user-info document and
//! then dropped. Neither they nor authorization codes are logged.

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod errors;
pub mod federator;
pub mod providers;

pub use client::OAuthClient;
pub use config::ProviderConfig;
pub use errors::{OAuthError, Result};
pub use federator::IdentityFederator;
pub use providers::ProviderKind;
