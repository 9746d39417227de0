//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Persist a new user and return it with its assigned identifier.
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error>;

    /// Overwrite the name and email of the user with `id`.
    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error>;

    /// Remove the user with `id`.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
