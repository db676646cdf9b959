use anyhow::{Context, Result};
use chatterly_auth::AuthService;
use chatterly_identity::UserDirectoryService;
use chatterly_oauth::IdentityFederator;
use chatterly_sessions::{ChannelTokenProvider, SessionTokenProvider};
use chatterly_storage::RocksDbStorage;
use std::sync::Arc;

use crate::config::Config;
use crate::cookies::CookieSettings;

pub type Directory = UserDirectoryService<RocksDbStorage>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub auth_service: Arc<AuthService<Directory>>,
    pub cookies: CookieSettings,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self> {
        // Initialize storage
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let storage = Arc::new(RocksDbStorage::open(&config.database_path).with_context(|| {
            format!("failed to open database at {}", config.database_path.display())
        })?);
        let directory = Arc::new(UserDirectoryService::new(storage));

        // Initialize token providers
        let sessions = Arc::new(
            SessionTokenProvider::new(config.user_tokens.clone())
                .context("invalid user token settings")?,
        );
        let channels = Arc::new(
            ChannelTokenProvider::new(config.chat_tokens.clone())
                .context("invalid chat token settings")?,
        );

        let federator = Arc::new(
            IdentityFederator::new(config.providers.clone(), config.request_timeout)
                .context("invalid OAuth provider settings")?,
        );
        if config.providers.is_empty() {
            tracing::warn!("No OAuth provider configured; sign-in is disabled");
        }

        let auth_service = Arc::new(AuthService::new(federator, sessions, channels, directory));

        Ok(Self::with_service(config, auth_service))
    }

    /// State around an already-built service
    pub fn with_service(config: Config, auth_service: Arc<AuthService<Directory>>) -> Self {
        let cookies = CookieSettings {
            domain: config.cookie_domain.clone(),
            access_max_age: auth_service.sessions().access_token_ttl(),
            refresh_max_age: auth_service.sessions().refresh_token_ttl(),
        };

        AppState {
            config,
            auth_service,
            cookies,
        }
    }
}
