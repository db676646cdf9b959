//! User directory service implementation.

use crate::{errors::*, traits::*, types::*};
use async_trait::async_trait;
use chatterly_storage::{BatchExt, Storage, CF_USERS, CF_USERS_BY_EMAIL_PROVIDER};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// [`UserDirectory`] backed by a [`Storage`] implementation.
///
/// Users live in `CF_USERS` keyed by id; `CF_USERS_BY_EMAIL_PROVIDER` maps
/// the natural key to that id.
pub struct UserDirectoryService<S: Storage> {
    storage: Arc<S>,
    /// Serializes every read-modify-write of a user row: two concurrent
    /// first logins cannot both miss the index, and a refresh on login
    /// cannot write back a stale username.
    write_lock: Mutex<()>,
}

impl<S: Storage> UserDirectoryService<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    async fn load_user(&self, user_id: &str) -> Result<Option<User>> {
        Ok(self.storage.get(CF_USERS, &user_id).await?)
    }

    async fn create_user(
        &self,
        index_key: &str,
        identity: &Identity,
        provider: &str,
    ) -> Result<String> {
        let user_id = Uuid::new_v4().simple().to_string();
        let user = User::from_identity(user_id.clone(), identity, provider);

        let mut batch = self.storage.batch();
        batch.put(CF_USERS, &user_id, &user)?;
        batch.put(CF_USERS_BY_EMAIL_PROVIDER, &index_key, &user_id)?;
        batch.commit().await?;

        info!(user_id = %user_id, provider = %provider, "User created");
        Ok(user_id)
    }
}

#[async_trait]
impl<S: Storage + 'static> UserDirectory for UserDirectoryService<S> {
    async fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.load_user(user_id)
            .await?
            .ok_or_else(|| DirectoryError::UserNotFound(user_id.to_string()))
    }

    async fn upsert_by_email_provider(
        &self,
        identity: &Identity,
        provider: &str,
    ) -> Result<String> {
        if identity.email.is_empty() {
            return Err(DirectoryError::InvalidUser("email is empty".to_string()));
        }
        if provider.is_empty() {
            return Err(DirectoryError::InvalidUser("provider is empty".to_string()));
        }

        let index_key = email_provider_key(&identity.email, provider);
        let _guard = self.write_lock.lock().await;

        let existing: Option<String> = self
            .storage
            .get(CF_USERS_BY_EMAIL_PROVIDER, &index_key)
            .await?;

        let Some(user_id) = existing else {
            return self.create_user(&index_key, identity, provider).await;
        };

        match self.load_user(&user_id).await? {
            Some(mut user) => {
                user.apply_identity(identity);
                self.storage.put(CF_USERS, &user_id, &user).await?;
                debug!(user_id = %user_id, provider = %provider, "User refreshed");
                Ok(user_id)
            }
            // Dangling index entry: recreate the row under a new id
            None => self.create_user(&index_key, identity, provider).await,
        }
    }

    async fn set_username(&self, user_id: &str, username: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut user = self.get_by_id(user_id).await?;
        user.username = username.to_string();
        self.storage.put(CF_USERS, &user_id, &user).await?;

        info!(user_id = %user_id, "Username assigned");
        Ok(())
    }
}
