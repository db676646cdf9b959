use thiserror::Error;

#[derive(Error, Debug)]
pub enum OAuthError {
    /// Unknown provider name, or a known provider with no configuration
    #[error("Unsupported OAuth provider: {0}")]
    UnsupportedProvider(String),

    #[error("OAuth code exchange failed: {0}")]
    ExchangeFailed(String),

    /// Transport failure or non-200 answer from the user-info endpoint
    #[error("Failed to fetch user info: {0}")]
    UserInfoFetchFailed(String),

    #[error("Failed to decode user info: {0}")]
    UserInfoDecodeFailed(String),

    #[error("Invalid OAuth configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, OAuthError>;
