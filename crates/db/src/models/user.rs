//! User entity: the bearer-token subject created on first mobile login.

use relief_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    /// National identity card number, unique.
    pub nic: String,
    pub full_name: String,
    /// Role name embedded in JWT claims (see `relief_core::roles`).
    pub role: String,
    pub created_at: Timestamp,
}
