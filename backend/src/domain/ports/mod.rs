//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`UsersCommand`, `UsersQuery`) are called by inbound
//! adapters; the driven port (`UserRepository`) is implemented by outbound
//! persistence adapters. Each exposes strongly typed errors so adapters map
//! their failures into predictable variants.

mod macros;
pub(crate) use macros::define_port_error;

mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
