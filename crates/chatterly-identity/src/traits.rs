//! User directory trait definition.

use crate::{errors::Result, types::*};
use async_trait::async_trait;

/// The directory collaborator the authentication core reads and upserts
/// users through.
///
/// Implementations own persistence; the core never sees storage details.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Get a user by id, `DirectoryError::UserNotFound` if absent
    async fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Insert or refresh the user keyed by (email, provider).
    ///
    /// Returns the directory-assigned id, which is stable across repeated
    /// logins with the same identity.
    async fn upsert_by_email_provider(&self, identity: &Identity, provider: &str)
        -> Result<String>;

    /// Assign a username, `DirectoryError::UserNotFound` if absent
    async fn set_username(&self, user_id: &str, username: &str) -> Result<()>;
}
