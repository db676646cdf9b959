use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    response::Json,
};
use chatterly_auth::AuthOrchestrator;
use chatterly_identity::User;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    api::oauth::MessageResponse, cookies::CookieSettings, error::ApiError,
    extractors::CurrentUser, state::AppState,
};

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub struct UsernameRequest {
    pub username: String,
}

/// GET /api/user/info
pub async fn user_info(CurrentUser(user): CurrentUser) -> Json<UserInfoResponse> {
    Json(UserInfoResponse { user })
}

/// POST /api/user/logout
pub async fn logout(State(state): State<Arc<AppState>>) -> (HeaderMap, Json<MessageResponse>) {
    let mut headers = HeaderMap::new();
    CookieSettings::apply(&mut headers, state.cookies.clear());

    (headers, Json(MessageResponse { message: "user logged out" }))
}

/// POST /api/user/username
pub async fn set_username(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    body: Result<Json<UsernameRequest>, JsonRejection>,
) -> Result<Json<UserInfoResponse>, ApiError> {
    let Json(req) =
        body.map_err(|_| ApiError::InvalidRequest("corrupted request body".to_string()))?;

    state
        .auth_service
        .set_username(&user.id, &req.username)
        .await?;

    Ok(Json(UserInfoResponse {
        user: User {
            username: req.username,
            ..user
        },
    }))
}
