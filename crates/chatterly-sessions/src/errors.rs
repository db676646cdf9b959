use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    /// Well-formed, correctly signed, but past its expiry.
    /// An empty session credential is reported the same way.
    #[error("Token expired")]
    TokenExpired,

    /// Malformed, tampered, or signed with an unexpected algorithm
    #[error("Invalid token")]
    TokenInvalid,

    #[error("Invalid token configuration: {0}")]
    InvalidConfig(String),

    #[error("JWT encoding error: {0}")]
    JwtEncodingError(#[from] jsonwebtoken::errors::Error),
}

impl SessionError {
    pub fn is_expired(&self) -> bool {
        matches!(self, SessionError::TokenExpired)
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
