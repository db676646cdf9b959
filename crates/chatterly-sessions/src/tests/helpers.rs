//! Shared fixtures for token tests.

use crate::*;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

pub const SESSION_SECRET: &[u8] = b"session-secret-for-tests";
pub const CHANNEL_SECRET: &[u8] = b"channel-secret-for-tests";

pub fn session_provider() -> SessionTokenProvider {
    SessionTokenProvider::new(SessionTokenConfig::new(SESSION_SECRET)).unwrap()
}

pub fn short_lived_session_provider() -> SessionTokenProvider {
    SessionTokenProvider::new(SessionTokenConfig::new(SESSION_SECRET).with_ttls(1, 10)).unwrap()
}

pub fn channel_provider() -> ChannelTokenProvider {
    ChannelTokenProvider::new(ChannelTokenConfig::new(CHANNEL_SECRET)).unwrap()
}

/// Sign arbitrary claims with an arbitrary HMAC secret
pub fn sign_hs256<C: Serialize>(secret: &[u8], claims: &C) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .unwrap()
}

/// Access claims that expired `ago` seconds in the past
pub fn expired_access_claims(ago: u64) -> AccessClaims {
    let now = current_timestamp();
    AccessClaims {
        user_id: "user-1".to_string(),
        email: "ada@example.com".to_string(),
        iat: now - ago - 60,
        exp: now - ago,
        jti: "jti-1".to_string(),
    }
}

/// Replace one character in the middle of the signature segment
pub fn tamper_signature(token: &str) -> String {
    let dot = token.rfind('.').unwrap();
    let mut bytes = token.as_bytes().to_vec();
    let index = dot + 1 + (bytes.len() - dot - 1) / 2;
    bytes[index] = if bytes[index] == b'A' { b'B' } else { b'A' };
    String::from_utf8(bytes).unwrap()
}

/// Replace the payload segment while keeping header and signature
pub fn swap_payload(token: &str, payload: &serde_json::Value) -> String {
    let parts: Vec<&str> = token.split('.').collect();
    let encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
    format!("{}.{}.{}", parts[0], encoded, parts[2])
}

/// Token whose header advertises `alg: none` with an empty signature
pub fn unsigned_token(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(payload).unwrap());
    format!("{}.{}.", header, payload)
}
