use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chatterly_auth::AuthError;
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unsupported OAuth provider: {0}")]
    UnsupportedProvider(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Identity provider or directory failure; details are logged, not returned
    #[error("Temporarily unavailable: {0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated | AuthError::TokenExpired | AuthError::TokenInvalid => {
                ApiError::Unauthorized
            }
            AuthError::UnsupportedProvider(name) => ApiError::UnsupportedProvider(name),
            AuthError::InvalidUsername(msg) => ApiError::InvalidRequest(msg),
            AuthError::UserNotFound(id) => ApiError::NotFound(format!("user {}", id)),
            AuthError::OAuthExchangeFailed(_)
            | AuthError::UserInfoFetchFailed(_)
            | AuthError::UserInfoDecodeFailed(_)
            | AuthError::DirectoryQueryFailed(_) => ApiError::Unavailable(err.to_string()),
            AuthError::TokenIssueFailed(_) | AuthError::InvalidConfig(_) => {
                ApiError::Internal(anyhow::Error::new(err))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Missing or invalid credentials".to_string(),
            ),
            ApiError::UnsupportedProvider(name) => (
                StatusCode::BAD_REQUEST,
                "UNSUPPORTED_PROVIDER",
                format!("Unsupported OAuth provider: {}", name),
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Unavailable(detail) => {
                tracing::error!(error = %detail, "Upstream failure");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "TEMPORARILY_UNAVAILABLE",
                    "Temporarily unavailable, try again later".to_string(),
                )
            }
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}
