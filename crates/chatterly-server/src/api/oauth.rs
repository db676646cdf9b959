use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    response::Json,
};
use chatterly_auth::AuthOrchestrator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{cookies::CookieSettings, error::ApiError, state::AppState};

#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct CallbackRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// GET /api/oauth/:provider
pub async fn oauth_redirect(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
) -> Result<Json<RedirectResponse>, ApiError> {
    let url = state.auth_service.redirect_url(&provider)?;

    Ok(Json(RedirectResponse { url }))
}

/// POST /api/oauth/:provider/callback
pub async fn oauth_callback(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    body: Result<Json<CallbackRequest>, JsonRejection>,
) -> Result<(HeaderMap, Json<MessageResponse>), ApiError> {
    let Json(req) =
        body.map_err(|_| ApiError::InvalidRequest("corrupted request body".to_string()))?;
    if req.code.is_empty() {
        return Err(ApiError::InvalidRequest("empty code".to_string()));
    }

    let pair = state.auth_service.register(&provider, &req.code).await?;

    let mut headers = HeaderMap::new();
    CookieSettings::apply(&mut headers, state.cookies.store(&pair));

    Ok((headers, Json(MessageResponse { message: "user signed in" })))
}
