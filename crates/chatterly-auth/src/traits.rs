//! Authentication orchestration trait.

use crate::{errors::Result, types::*};
use async_trait::async_trait;
use chatterly_sessions::TokenPair;

/// Operations the transport layer drives
#[async_trait]
pub trait AuthOrchestrator: Send + Sync {
    /// Authorization URL to send the browser to for `provider`
    fn redirect_url(&self, provider: &str) -> Result<String>;

    /// Complete an OAuth callback and start a session.
    ///
    /// Exchanges the code, upserts the user by (email, provider) and issues
    /// a fresh pair. Nothing is issued if any step fails.
    async fn register(&self, provider: &str, code: &str) -> Result<TokenPair>;

    /// Authenticate a request and load its user.
    ///
    /// A user that vanished after its tokens were issued is reported as
    /// `UserNotFound`, not as an authentication failure.
    async fn authenticate(&self, pair: &TokenPair) -> Result<AuthenticatedUser>;

    /// Short-lived token for one real-time channel session
    fn issue_channel_token(&self, user_id: &str, session_id: &str) -> Result<String>;

    /// Validate and assign a username
    async fn set_username(&self, user_id: &str, username: &str) -> Result<()>;
}
