//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every operation is a single statement. Uniqueness of `name` and `email`
//! is enforced by the database; violations are translated into
//! [`UserPersistenceError::Conflict`] using the constraint name.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

const NAME_CONSTRAINT: &str = "users_name_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

/// Resolve which unique column a violation refers to.
///
/// Prefers the reported constraint name and falls back to the server
/// message for drivers that omit it.
fn conflicting_field(message: &str, constraint_name: Option<&str>) -> Option<&'static str> {
    let haystack = constraint_name.unwrap_or(message);
    if haystack.contains(NAME_CONSTRAINT) {
        Some("name")
    } else if haystack.contains(EMAIL_CONSTRAINT) {
        Some("email")
    } else {
        None
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                match conflicting_field(info.message(), info.constraint_name()) {
                    Some(field) => UserPersistenceError::conflict(field),
                    None => {
                        warn!(
                            message = info.message(),
                            constraint_name = ?info.constraint_name(),
                            "unrecognised unique violation on users"
                        );
                        UserPersistenceError::query("unique constraint violation")
                    }
                }
            }
            DatabaseErrorKind::ClosedConnection => {
                UserPersistenceError::connection("database connection error")
            }
            _ => UserPersistenceError::query("database error"),
        },
        _ => UserPersistenceError::query("database error"),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    User::try_from_parts(row.id, row.name, row.email).map_err(|err| {
        warn!(user_id = id, error = %err, "stored user row failed validation");
        UserPersistenceError::query(format!("invalid user row {id}: {err}"))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            name: draft.name().as_ref(),
            email: draft.email().as_ref(),
        };

        let row = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserUpdate {
            name: draft.name().as_ref(),
            email: draft.email().as_ref(),
        };

        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        match row {
            Some(row) => row_to_user(row),
            None => Err(UserPersistenceError::not_found(id.get())),
        }
    }

    async fn delete(&self, id: UserId) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if deleted == 0 {
            Err(UserPersistenceError::not_found(id.get()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; statement behaviour is exercised against a
    //! live database in `tests/diesel_user_repository.rs`.
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[derive(Debug)]
    struct ConstraintViolation {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl DatabaseErrorInformation for ConstraintViolation {
        fn message(&self) -> &str {
            self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            Some("users")
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(message: &'static str, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(ConstraintViolation {
                message,
                constraint,
            }),
        )
    }

    #[rstest]
    #[case(Some("users_name_key"), "name")]
    #[case(Some("users_email_key"), "email")]
    fn unique_violation_maps_constraint_to_field(
        #[case] constraint: Option<&'static str>,
        #[case] field: &str,
    ) {
        let error = map_diesel_error(unique_violation("duplicate key value", constraint));

        assert_eq!(error, UserPersistenceError::conflict(field));
    }

    #[rstest]
    fn unique_violation_falls_back_to_message() {
        let error = map_diesel_error(unique_violation(
            "duplicate key value violates unique constraint \"users_email_key\"",
            None,
        ));

        assert_eq!(error, UserPersistenceError::conflict("email"));
    }

    #[rstest]
    fn unknown_unique_violation_is_a_query_error() {
        let error = map_diesel_error(unique_violation("duplicate key", Some("users_pkey")));

        assert!(error.is_query(), "expected query error, got {error:?}");
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = map_diesel_error(DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_string()),
        ));

        assert!(error.is_connection(), "expected connection error, got {error:?}");
    }

    #[rstest]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_diesel_errors_map_to_query_errors(#[case] diesel_error: DieselError) {
        let error = map_diesel_error(diesel_error);

        assert!(error.is_query(), "expected query error, got {error:?}");
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let error = map_pool_error(PoolError::checkout("timed out"));

        assert_eq!(error, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    fn invalid_rows_surface_as_query_errors() {
        let row = UserRow {
            id: 4,
            name: "   ".to_owned(),
            email: "ada@example.com".to_owned(),
        };

        let error = row_to_user(row).expect_err("blank name is rejected");

        assert!(error.is_query());
    }
}
