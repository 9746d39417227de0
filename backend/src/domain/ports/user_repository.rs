//! Driven port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique column already holds the submitted value.
        Conflict { field: String } => "user repository conflict on {field}",
        /// No row exists for the identifier.
        NotFound { id: i32 } => "user {id} does not exist",
    }
}

/// Storage contract for user records.
///
/// Implementations assign identifiers on [`UserRepository::create`] and
/// enforce uniqueness of both name and email, reporting collisions as
/// [`UserPersistenceError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its assigned identifier.
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Fetch every user ordered by ascending identifier.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite name and email of an existing user.
    ///
    /// Returns [`UserPersistenceError::NotFound`] when no user has `id`.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserPersistenceError>;

    /// Remove a user.
    ///
    /// Returns [`UserPersistenceError::NotFound`] when no user has `id`.
    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError>;
}
