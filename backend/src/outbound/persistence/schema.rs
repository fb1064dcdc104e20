//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` carries the `accounts_username_key` unique constraint,
    /// which decides concurrent registrations.
    accounts (id) {
        id -> Uuid,
        username -> Varchar,
        full_name -> Varchar,
        /// Argon2id PHC string. Never returned to clients.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}
