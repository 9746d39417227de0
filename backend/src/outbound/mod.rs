//! Outbound adapters implementing the `UserRepository` port.
//!
//! - **persistence**: PostgreSQL via Diesel with bb8 pooling.
//! - **memory**: process-local store used when no database is configured.

pub mod memory;
pub mod persistence;
