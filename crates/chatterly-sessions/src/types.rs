use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Default access token lifetime: 15 minutes
pub const DEFAULT_ACCESS_TOKEN_TTL: u64 = 900;

/// Default refresh token lifetime: 30 days
pub const DEFAULT_REFRESH_TOKEN_TTL: u64 = 2_592_000;

/// Default channel token lifetime: 1 minute
pub const DEFAULT_CHANNEL_TOKEN_TTL: u64 = 60;

/// Algorithms accepted at verification time.
///
/// Anything outside the HMAC family is rejected before the signature is
/// looked at, so an asymmetric or `none` header can never be verified
/// against the shared secret.
pub const HMAC_FAMILY: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Access and refresh credentials handed to the client.
///
/// Never mutated: a refresh replaces the whole pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl TokenPair {
    /// No credential was presented at all
    pub fn is_empty(&self) -> bool {
        self.access.is_empty() && self.refresh.is_empty()
    }
}

/// Claims carried by both access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub user_id: String,
    pub email: String,
    pub iat: u64, // Issued at
    pub exp: u64, // Expiration
    pub jti: String,
}

/// Claims carried by a channel token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelClaims {
    pub user_id: String,
    pub session_id: String,
    pub iat: u64,
    pub exp: u64,
    pub jti: String,
}

/// Shared HMAC secret.
///
/// Wiped from memory on drop; `Debug` never prints it.
#[derive(Clone)]
pub struct SigningSecret(Zeroizing<Vec<u8>>);

impl SigningSecret {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(secret.into()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Configuration for [`crate::SessionTokenProvider`]
#[derive(Debug, Clone)]
pub struct SessionTokenConfig {
    pub secret: SigningSecret,
    pub algorithm: Algorithm,
    /// Seconds
    pub access_token_ttl: u64,
    /// Seconds
    pub refresh_token_ttl: u64,
}

impl SessionTokenConfig {
    /// HS256 with the default lifetimes
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: SigningSecret::new(secret),
            algorithm: Algorithm::HS256,
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            refresh_token_ttl: DEFAULT_REFRESH_TOKEN_TTL,
        }
    }

    pub fn with_ttls(mut self, access_token_ttl: u64, refresh_token_ttl: u64) -> Self {
        self.access_token_ttl = access_token_ttl;
        self.refresh_token_ttl = refresh_token_ttl;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}

/// Configuration for [`crate::ChannelTokenProvider`]
#[derive(Debug, Clone)]
pub struct ChannelTokenConfig {
    pub secret: SigningSecret,
    pub algorithm: Algorithm,
    /// Seconds
    pub token_ttl: u64,
}

impl ChannelTokenConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: SigningSecret::new(secret),
            algorithm: Algorithm::HS256,
            token_ttl: DEFAULT_CHANNEL_TOKEN_TTL,
        }
    }

    pub fn with_ttl(mut self, token_ttl: u64) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

/// Seconds since the Unix epoch, on the same clock the verifier uses
pub fn current_timestamp() -> u64 {
    jsonwebtoken::get_current_timestamp()
}
