//! User and identity type definitions.

use serde::{Deserialize, Serialize};

/// A person as described by an external identity provider.
///
/// Produced per OAuth callback and discarded once it has been upserted
/// into the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
    pub avatar_url: String,
}

/// Persisted user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Directory-assigned id
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    /// Identity provider the user signed in with (e.g. "github")
    pub provider: String,
    /// Empty until the user picks one
    #[serde(default)]
    pub username: String,
}

impl User {
    /// Build a fresh record for a first login
    pub fn from_identity(id: String, identity: &Identity, provider: &str) -> Self {
        Self {
            id,
            name: identity.name.clone(),
            email: identity.email.clone(),
            avatar: identity.avatar_url.clone(),
            provider: provider.to_string(),
            username: String::new(),
        }
    }

    /// Refresh the provider-owned fields after a repeat login
    pub fn apply_identity(&mut self, identity: &Identity) {
        self.name = identity.name.clone();
        self.avatar = identity.avatar_url.clone();
    }
}

/// Natural-key index entry for (email, provider)
pub(crate) fn email_provider_key(email: &str, provider: &str) -> String {
    format!("{}:{}", provider, email)
}
