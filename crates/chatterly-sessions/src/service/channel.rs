use super::tokens;
use crate::{errors::*, types::*};
use tracing::debug;
use uuid::Uuid;

/// Issues and verifies short-lived tokens bound to one channel session.
///
/// Uses its own secret, so a session token never verifies as a channel
/// token and vice versa.
#[derive(Debug, Clone)]
pub struct ChannelTokenProvider {
    secret: SigningSecret,
    algorithm: jsonwebtoken::Algorithm,
    token_ttl: u64, // seconds
}

impl ChannelTokenProvider {
    pub fn new(config: ChannelTokenConfig) -> Result<Self> {
        if config.secret.is_empty() {
            return Err(SessionError::InvalidConfig(
                "secret key must not be empty".to_string(),
            ));
        }
        if config.token_ttl == 0 {
            return Err(SessionError::InvalidConfig(
                "channel token ttl must be positive".to_string(),
            ));
        }
        tokens::expires_at(current_timestamp(), config.token_ttl)?;
        tokens::ensure_hmac(config.algorithm)?;

        Ok(Self {
            secret: config.secret,
            algorithm: config.algorithm,
            token_ttl: config.token_ttl,
        })
    }

    pub fn token_ttl(&self) -> u64 {
        self.token_ttl
    }

    pub fn issue(&self, user_id: &str, session_id: &str) -> Result<String> {
        let now = current_timestamp();
        let claims = ChannelClaims {
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            iat: now,
            exp: tokens::expires_at(now, self.token_ttl)?,
            jti: Uuid::new_v4().to_string(),
        };

        let token = tokens::sign(&self.secret, self.algorithm, &claims)?;
        debug!(user_id = %user_id, session_id = %session_id, "Issued channel token");
        Ok(token)
    }

    /// Unlike session tokens, an empty channel token is simply invalid:
    /// there is no refresh path to fall back on.
    pub fn verify(&self, token: &str) -> Result<ChannelClaims> {
        if token.is_empty() {
            return Err(SessionError::TokenInvalid);
        }
        tokens::verify(&self.secret, token)
    }
}
