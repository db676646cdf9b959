//! Authentication error types.

use chatterly_identity::DirectoryError;
use chatterly_oauth::OAuthError;
use chatterly_sessions::SessionError;
use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// No usable credential: missing, tampered, or expired beyond refresh
    #[error("Unauthenticated")]
    Unauthenticated,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    TokenInvalid,

    #[error("Failed to issue token: {0}")]
    TokenIssueFailed(String),

    #[error("Unsupported OAuth provider: {0}")]
    UnsupportedProvider(String),

    #[error("OAuth exchange failed: {0}")]
    OAuthExchangeFailed(String),

    #[error("Failed to fetch user info: {0}")]
    UserInfoFetchFailed(String),

    #[error("Failed to decode user info: {0}")]
    UserInfoDecodeFailed(String),

    /// Credentials were valid but the user they name no longer exists
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Directory query failed: {0}")]
    DirectoryQueryFailed(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<SessionError> for AuthError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::TokenExpired => AuthError::TokenExpired,
            SessionError::TokenInvalid => AuthError::TokenInvalid,
            SessionError::InvalidConfig(msg) => AuthError::InvalidConfig(msg),
            SessionError::JwtEncodingError(e) => AuthError::TokenIssueFailed(e.to_string()),
        }
    }
}

impl From<OAuthError> for AuthError {
    fn from(err: OAuthError) -> Self {
        match err {
            OAuthError::UnsupportedProvider(name) => AuthError::UnsupportedProvider(name),
            OAuthError::ExchangeFailed(msg) => AuthError::OAuthExchangeFailed(msg),
            OAuthError::UserInfoFetchFailed(msg) => AuthError::UserInfoFetchFailed(msg),
            OAuthError::UserInfoDecodeFailed(msg) => AuthError::UserInfoDecodeFailed(msg),
            OAuthError::InvalidConfig(msg) => AuthError::InvalidConfig(msg),
        }
    }
}

impl From<DirectoryError> for AuthError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::UserNotFound(id) => AuthError::UserNotFound(id),
            other => AuthError::DirectoryQueryFailed(other.to_string()),
        }
    }
}

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;
