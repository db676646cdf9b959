//! # chatterly-identity
//!
//! User records and the directory that owns them.
//!
//! - [`Identity`]: what an identity provider tells us about a person
//! - [`User`]: the persisted record, de-duplicated by (email, provider)
//! - [`UserDirectory`]: the narrow interface the authentication core uses
//! - [`UserDirectoryService`]: the directory over a [`chatterly_storage::Storage`]

#![warn(clippy::all)]

pub mod errors;
pub mod service;
pub mod traits;
pub mod types;

pub use errors::{DirectoryError, Result};
pub use service::UserDirectoryService;
pub use traits::UserDirectory;
pub use types::*;
