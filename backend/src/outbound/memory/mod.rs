//! In-process `UserRepository` used when no database is configured.
//!
//! Mirrors the relational contract: identifiers are assigned sequentially
//! from 1 and never reused, `name` and `email` are unique, and listings are
//! ordered by id. Contents are lost when the process exits.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i32, User>,
    last_id: i32,
}

impl Store {
    /// Unique column `draft` collides on, ignoring the row identified by
    /// `skip`. Names are checked across every row before emails.
    fn conflict(&self, draft: &UserDraft, skip: Option<i32>) -> Option<&'static str> {
        if self.others(skip).any(|user| user.name() == draft.name()) {
            Some("name")
        } else if self.others(skip).any(|user| user.email() == draft.email()) {
            Some("email")
        } else {
            None
        }
    }

    fn others(&self, skip: Option<i32>) -> impl Iterator<Item = &User> {
        self.users
            .iter()
            .filter(move |(id, _)| Some(**id) != skip)
            .map(|(_, user)| user)
    }
}

/// Mutex-guarded in-memory user store.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::query("in-memory user store poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        if let Some(field) = store.conflict(draft, None) {
            return Err(UserPersistenceError::conflict(field));
        }
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        let id = UserId::new(next).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let user = draft.clone().into_user(id);
        store.last_id = next;
        store.users.insert(next, user.clone());
        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id.get()).cloned())
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        if !store.users.contains_key(&id.get()) {
            return Err(UserPersistenceError::not_found(id.get()));
        }
        if let Some(field) = store.conflict(draft, Some(id.get())) {
            return Err(UserPersistenceError::conflict(field));
        }
        let user = draft.clone().into_user(id);
        store.users.insert(id.get(), user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        self.lock()?
            .users
            .remove(&id.get())
            .map(|_| ())
            .ok_or_else(|| UserPersistenceError::not_found(id.get()))
    }
}
