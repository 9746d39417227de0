//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly. Regenerate with `diesel print-schema`
//! after changing a migration.

diesel::table! {
    /// Registered users. `name` and `email` carry unique constraints
    /// `users_name_key` and `users_email_key`.
    users (id) {
        /// Serial primary key.
        id -> Int4,
        /// Unique user name (max 80 characters).
        name -> Varchar,
        /// Unique email address (max 120 characters).
        email -> Varchar,
    }
}
