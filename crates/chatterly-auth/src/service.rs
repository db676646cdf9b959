//! Authentication service implementation.

use crate::{errors::*, gate::authenticate_tokens, traits::AuthOrchestrator, types::*, validation};
use async_trait::async_trait;
use chatterly_identity::UserDirectory;
use chatterly_oauth::IdentityFederator;
use chatterly_sessions::{ChannelTokenProvider, SessionTokenProvider, TokenPair};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// [`AuthOrchestrator`] over a [`UserDirectory`]
pub struct AuthService<D: UserDirectory> {
    federator: Arc<IdentityFederator>,
    sessions: Arc<SessionTokenProvider>,
    channels: Arc<ChannelTokenProvider>,
    directory: Arc<D>,
}

impl<D: UserDirectory> AuthService<D> {
    /// Create a new authentication service
    pub fn new(
        federator: Arc<IdentityFederator>,
        sessions: Arc<SessionTokenProvider>,
        channels: Arc<ChannelTokenProvider>,
        directory: Arc<D>,
    ) -> Self {
        Self {
            federator,
            sessions,
            channels,
            directory,
        }
    }

    pub fn sessions(&self) -> &SessionTokenProvider {
        &self.sessions
    }

    pub fn channels(&self) -> &ChannelTokenProvider {
        &self.channels
    }
}

#[async_trait]
impl<D: UserDirectory + 'static> AuthOrchestrator for AuthService<D> {
    fn redirect_url(&self, provider: &str) -> Result<String> {
        Ok(self.federator.redirect_url(provider)?)
    }

    async fn register(&self, provider: &str, code: &str) -> Result<TokenPair> {
        let identity = self.federator.exchange(provider, code).await?;

        let user_id = self
            .directory
            .upsert_by_email_provider(&identity, provider)
            .await
            .map_err(|e| {
                warn!(provider = %provider, error = %e, "User upsert failed");
                AuthError::from(e)
            })?;

        let pair = self.sessions.issue(&user_id, &identity.email)?;

        info!(user_id = %user_id, provider = %provider, "User signed in");
        Ok(pair)
    }

    async fn authenticate(&self, pair: &TokenPair) -> Result<AuthenticatedUser> {
        let outcome = authenticate_tokens(&self.sessions, pair)?;

        let user = self.directory.get_by_id(&outcome.user_id).await.map_err(|e| {
            debug!(user_id = %outcome.user_id, error = %e, "Authenticated user lookup failed");
            AuthError::from(e)
        })?;

        Ok(AuthenticatedUser {
            user,
            refreshed: outcome.refreshed,
        })
    }

    fn issue_channel_token(&self, user_id: &str, session_id: &str) -> Result<String> {
        Ok(self.channels.issue(user_id, session_id)?)
    }

    async fn set_username(&self, user_id: &str, username: &str) -> Result<()> {
        validation::validate_username(username)?;
        self.directory.set_username(user_id, username).await?;

        info!(user_id = %user_id, "Username updated");
        Ok(())
    }
}
