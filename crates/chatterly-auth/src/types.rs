//! Authentication result types.

use chatterly_identity::User;
use chatterly_sessions::TokenPair;

/// Outcome of the per-request gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub user_id: String,
    /// Set when the access token had expired and a new pair was minted
    pub refreshed: Option<TokenPair>,
}

/// An authenticated request's user, plus the pair to hand back if the
/// credentials were refreshed along the way
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub refreshed: Option<TokenPair>,
}
