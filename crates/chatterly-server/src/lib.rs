//! HTTP transport for chatterly authentication.
//!
//! Credentials travel as cookies; the [`extractors::require_auth`]
//! middleware guards everything under `/api/user`.

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

pub mod api;
pub mod config;
pub mod cookies;
pub mod error;
pub mod extractors;
pub mod state;

pub use config::Config;
pub use state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    let user_routes = Router::new()
        .route("/api/user/info", get(api::user::user_info))
        .route("/api/user/logout", post(api::user::logout))
        .route("/api/user/username", post(api::user::set_username))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            extractors::require_auth,
        ));

    Router::new()
        .route("/api/health", get(api::health::health_check))
        .route("/api/oauth/:provider", get(api::oauth::oauth_redirect))
        .route("/api/oauth/:provider/callback", post(api::oauth::oauth_callback))
        .merge(user_routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(cors_layer(&state.config.allow_origins))
        .with_state(state)
}

fn cors_layer(allow_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60))
}
