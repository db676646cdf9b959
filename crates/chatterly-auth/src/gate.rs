//! Per-request credential check with transparent refresh.

use crate::errors::*;
use crate::types::GateOutcome;
use chatterly_sessions::{SessionError, SessionTokenProvider, TokenPair};
use tracing::debug;

/// Decide whether `pair` authenticates a request.
///
/// - both tokens empty: `Unauthenticated`
/// - valid access token: the user, no refresh
/// - invalid access token: `Unauthenticated`, refresh is never attempted
/// - expired access token: the refresh token decides; when valid, a new
///   pair is minted and returned alongside the user
pub fn authenticate_tokens(
    sessions: &SessionTokenProvider,
    pair: &TokenPair,
) -> Result<GateOutcome> {
    if pair.is_empty() {
        return Err(AuthError::Unauthenticated);
    }

    match sessions.verify(&pair.access) {
        Ok(claims) => Ok(GateOutcome {
            user_id: claims.user_id,
            refreshed: None,
        }),
        Err(SessionError::TokenExpired) => refresh(sessions, &pair.refresh),
        Err(e) => {
            debug!(error = %e, "Access token rejected");
            Err(AuthError::Unauthenticated)
        }
    }
}

fn refresh(sessions: &SessionTokenProvider, refresh_token: &str) -> Result<GateOutcome> {
    let claims = sessions.verify(refresh_token).map_err(|e| {
        debug!(error = %e, "Refresh token rejected");
        AuthError::Unauthenticated
    })?;

    let pair = sessions.issue(&claims.user_id, &claims.email)?;
    debug!(user_id = %claims.user_id, "Session refreshed");

    Ok(GateOutcome {
        user_id: claims.user_id,
        refreshed: Some(pair),
    })
}
