//! Driving port for user reads.
//!
//! HTTP handlers depend on this port rather than on persistence adapters so
//! they can be exercised against any implementation.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return every user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// Return the user with `id`, or a `NotFound` error.
    async fn find_user(&self, id: UserId) -> Result<User, Error>;
}
