//! User domain service.
//!
//! Implements the driving ports on top of a [`UserRepository`] and owns the
//! translation from persistence failures into the domain error taxonomy.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, User, UserDraft, UserId};

/// Message returned when a user id does not resolve.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found!";

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Conflict { field } => {
            Error::conflict(format!("a user with this {field} already exists")).with_details(
                json!({ "field": field, "code": format!("duplicate_{field}") }),
            )
        }
        UserPersistenceError::NotFound { .. } => Error::not_found(USER_NOT_FOUND_MESSAGE),
    }
}

/// Service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, draft: UserDraft) -> Result<User, Error> {
        let user = self
            .repository
            .create(&draft)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    async fn update_user(&self, id: UserId, draft: UserDraft) -> Result<User, Error> {
        let user = self
            .repository
            .update(id, &draft)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository.list().await.map_err(map_persistence_error)
    }

    async fn find_user(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
