//! Internal Diesel row structs.
//!
//! Implementation details of the persistence layer; never exposed to the
//! domain.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::accounts;

/// Row read from the `accounts` table. `created_at` stays in the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub password_hash: String,
}

/// Insertable row; `created_at` is filled by the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub full_name: &'a str,
    pub password_hash: &'a str,
}
