//! Token providers.

mod channel;
mod tokens;

pub use channel::ChannelTokenProvider;

use crate::{errors::*, types::*};
use tracing::debug;
use uuid::Uuid;

/// Issues and verifies the access/refresh pair.
///
/// Both tokens carry the same claim shape and are signed with the same
/// secret; only their lifetimes differ. Holds no state beyond its
/// configuration, so it is safe to share across tasks.
#[derive(Debug, Clone)]
pub struct SessionTokenProvider {
    secret: SigningSecret,
    algorithm: jsonwebtoken::Algorithm,
    access_token_ttl: u64,  // seconds
    refresh_token_ttl: u64, // seconds
}

impl SessionTokenProvider {
    /// Build a provider, rejecting configurations that could never produce
    /// a usable pair.
    pub fn new(config: SessionTokenConfig) -> Result<Self> {
        if config.secret.is_empty() {
            return Err(SessionError::InvalidConfig(
                "secret key must not be empty".to_string(),
            ));
        }
        if config.access_token_ttl == 0 {
            return Err(SessionError::InvalidConfig(
                "access token ttl must be positive".to_string(),
            ));
        }
        if config.access_token_ttl >= config.refresh_token_ttl {
            return Err(SessionError::InvalidConfig(format!(
                "access token ttl ({}s) must be shorter than refresh token ttl ({}s)",
                config.access_token_ttl, config.refresh_token_ttl
            )));
        }
        tokens::expires_at(current_timestamp(), config.refresh_token_ttl)?;
        tokens::ensure_hmac(config.algorithm)?;

        Ok(Self {
            secret: config.secret,
            algorithm: config.algorithm,
            access_token_ttl: config.access_token_ttl,
            refresh_token_ttl: config.refresh_token_ttl,
        })
    }

    pub fn access_token_ttl(&self) -> u64 {
        self.access_token_ttl
    }

    pub fn refresh_token_ttl(&self) -> u64 {
        self.refresh_token_ttl
    }

    /// Issue a fresh access/refresh pair for `user_id`.
    pub fn issue(&self, user_id: &str, email: &str) -> Result<TokenPair> {
        let now = current_timestamp();

        let access = tokens::sign(
            &self.secret,
            self.algorithm,
            &self.build_claims(user_id, email, now, self.access_token_ttl)?,
        )?;
        let refresh = tokens::sign(
            &self.secret,
            self.algorithm,
            &self.build_claims(user_id, email, now, self.refresh_token_ttl)?,
        )?;

        debug!(user_id = %user_id, "Issued token pair");
        Ok(TokenPair { access, refresh })
    }

    /// Verify either half of a pair.
    ///
    /// An empty string is reported as expired so that a client holding only
    /// a refresh token goes down the refresh path.
    pub fn verify(&self, token: &str) -> Result<AccessClaims> {
        if token.is_empty() {
            return Err(SessionError::TokenExpired);
        }
        tokens::verify(&self.secret, token)
    }

    fn build_claims(&self, user_id: &str, email: &str, now: u64, ttl: u64) -> Result<AccessClaims> {
        Ok(AccessClaims {
            user_id: user_id.to_string(),
            email: email.to_string(),
            iat: now,
            exp: tokens::expires_at(now, ttl)?,
            jti: Uuid::new_v4().to_string(),
        })
    }
}
