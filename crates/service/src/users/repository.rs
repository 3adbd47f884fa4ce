use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::domain::{User, UserCollection, UserPatch};
use crate::errors::ServiceError;
use crate::storage::json_file_store::JsonFileStore;

/// Repository abstraction over the user collection.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// First user whose email equals `email` exactly.
    async fn find_by_email(&self, email: &str) -> Option<User>;

    /// Apply `patch` to the user with this email and persist the collection.
    /// Returns `Ok(false)` when no such user exists; nothing is written then.
    async fn update_by_email(&self, email: &str, patch: &UserPatch) -> Result<bool, ServiceError>;
}

/// File-backed user repository.
///
/// The whole collection lives in memory behind one mutex. Every operation holds the
/// lock for its full duration, including the file write after an update, so reads,
/// mutations and saves are serialized process-wide.
///
/// A failed save leaves the in-memory mutation in place; the next successful save
/// writes it out.
pub struct FileUserRepository {
    users: Mutex<UserCollection>,
    store: JsonFileStore<UserCollection>,
}

impl FileUserRepository {
    /// Load the collection from `path`, creating an empty file if it does not exist.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonFileStore::<UserCollection>::new(path);
        let users = store.load().await?;
        info!(path = %store.path().display(), users = users.users.len(), "user store loaded");
        Ok(Arc::new(Self { users: Mutex::new(users), store }))
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.users.lock().await.users.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for FileUserRepository {
    async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.lock().await;
        users.find(email).cloned()
    }

    async fn update_by_email(&self, email: &str, patch: &UserPatch) -> Result<bool, ServiceError> {
        let mut users = self.users.lock().await;
        let Some(user) = users.find_mut(email) else {
            debug!(%email, "update skipped; user not found");
            return Ok(false);
        };
        patch.apply_to(user);
        self.store.save(&users).await?;
        debug!(%email, "user updated");
        Ok(true)
    }
}
