//! User storage.
//!
//! `UserStore` is the only way the domain layer touches user records. The
//! in-memory implementation keys users by identifier in a `BTreeMap`, so
//! `for_each` always visits users in ascending identifier order.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::ops::ControlFlow;
use std::sync::Mutex;
use thiserror::Error;

use crate::models::User;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User store lock poisoned: {0}")]
    Poisoned(String),
}

/// Visitor passed to [`UserStore::for_each`]. Return `ControlFlow::Break` to
/// stop the scan early.
pub type UserVisitor<'a> = dyn FnMut(&User) -> ControlFlow<()> + Send + 'a;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, user_id: &str) -> Result<Option<User>, StoreError>;

    /// Insert or replace the record keyed by `user.id`.
    async fn put(&self, user: User) -> Result<(), StoreError>;

    async fn for_each(&self, visit: &mut UserVisitor<'_>) -> Result<(), StoreError>;

    async fn len(&self) -> Result<usize, StoreError>;
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<BTreeMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, User>>, StoreError> {
        self.users
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.lock()?.get(user_id).cloned())
    }

    async fn put(&self, user: User) -> Result<(), StoreError> {
        self.lock()?.insert(user.id.clone(), user);
        Ok(())
    }

    async fn for_each(&self, visit: &mut UserVisitor<'_>) -> Result<(), StoreError> {
        let users = self.lock()?;
        for user in users.values() {
            if visit(user).is_break() {
                break;
            }
        }
        Ok(())
    }

    async fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.len())
    }
}
