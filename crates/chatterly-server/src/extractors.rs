use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use chatterly_auth::AuthOrchestrator;
use chatterly_identity::User;
use std::sync::Arc;

use crate::{cookies, error::ApiError, state::AppState};

/// The user behind an authenticated request.
///
/// Only available on routes behind [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Authenticate the request from its credential cookies.
///
/// A refreshed pair is written back as cookies, unless the handler already
/// set its own (logout clears them).
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let pair = cookies::read_token_pair(req.headers());

    let authenticated = state.auth_service.authenticate(&pair).await.map_err(|e| {
        tracing::debug!(error = %e, "Request authentication failed");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(CurrentUser(authenticated.user));
    let mut response = next.run(req).await;

    if let Some(refreshed) = authenticated.refreshed {
        let headers = response.headers_mut();
        if !headers.contains_key(axum::http::header::SET_COOKIE) {
            cookies::CookieSettings::apply(headers, state.cookies.store(&refreshed));
        }
    }

    Ok(response)
}
