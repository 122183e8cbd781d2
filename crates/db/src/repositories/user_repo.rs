//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

/// Column list for `users` queries.
const COLUMNS: &str = "id, nic, full_name, role, created_at";

pub struct UserRepo;

impl UserRepo {
    /// Find a user by NIC.
    pub async fn find_by_nic(pool: &PgPool, nic: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE nic = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(nic)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by NIC, creating the row on first login.
    ///
    /// `ON CONFLICT ... DO UPDATE` with a no-op assignment makes the upsert
    /// race-safe and still returns the existing row.
    pub async fn find_or_create(
        pool: &PgPool,
        nic: &str,
        full_name: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (nic, full_name, role) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_users_nic \
             DO UPDATE SET nic = EXCLUDED.nic \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(nic)
            .bind(full_name)
            .bind(role)
            .fetch_one(pool)
            .await
    }
}
