//! HMAC signing and verification shared by both providers.

use crate::{errors::*, types::*};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

pub(super) fn ensure_hmac(config_algorithm: jsonwebtoken::Algorithm) -> Result<()> {
    if HMAC_FAMILY.contains(&config_algorithm) {
        Ok(())
    } else {
        Err(SessionError::InvalidConfig(format!(
            "unsupported signing algorithm {:?}",
            config_algorithm
        )))
    }
}

/// Expiry for a token issued at `now`, or `InvalidConfig` if the lifetime
/// does not fit in a Unix timestamp.
pub(super) fn expires_at(now: u64, ttl: u64) -> Result<u64> {
    now.checked_add(ttl).ok_or_else(|| {
        SessionError::InvalidConfig(format!("token ttl ({}s) overflows the expiry time", ttl))
    })
}

pub(super) fn sign<C: Serialize>(
    secret: &SigningSecret,
    algorithm: jsonwebtoken::Algorithm,
    claims: &C,
) -> Result<String> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::new(algorithm), claims, &key)?)
}

/// Verify `token` against `secret` and return its claims.
///
/// The header is inspected first: anything outside the HMAC family is
/// rejected before a key is built. A valid signature past `exp` is
/// `TokenExpired`; every other failure is `TokenInvalid`.
pub(super) fn verify<C: DeserializeOwned>(secret: &SigningSecret, token: &str) -> Result<C> {
    let header = jsonwebtoken::decode_header(token).map_err(|e| {
        debug!(error = %e, "Rejected token with unreadable header");
        SessionError::TokenInvalid
    })?;

    if !HMAC_FAMILY.contains(&header.alg) {
        debug!(alg = ?header.alg, "Rejected token with non-HMAC algorithm");
        return Err(SessionError::TokenInvalid);
    }

    let mut validation = Validation::new(header.alg);
    validation.algorithms = HMAC_FAMILY.to_vec();
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp"]);

    let key = DecodingKey::from_secret(secret.as_bytes());
    decode::<C>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::TokenExpired,
            _ => {
                debug!(error = %e, "Token verification failed");
                SessionError::TokenInvalid
            }
        })
}
