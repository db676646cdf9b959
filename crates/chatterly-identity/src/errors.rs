//! User directory error types.

use thiserror::Error;

/// User directory errors
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No user with this id
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Identity cannot be persisted (missing email or provider)
    #[error("Invalid user record: {0}")]
    InvalidUser(String),

    /// Query against the backing store failed
    #[error("Directory query failed: {0}")]
    QueryFailed(#[from] chatterly_storage::StorageError),
}

/// Result type for directory operations
pub type Result<T> = std::result::Result<T, DirectoryError>;
