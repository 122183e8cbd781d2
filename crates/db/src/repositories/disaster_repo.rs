//! Repository for the `disasters` table.

use sqlx::PgPool;

use relief_core::status::Priority;
use relief_core::types::DbId;

use crate::models::disaster::{CreateDisaster, Disaster};

/// Column list for `disasters` queries.
const COLUMNS: &str = "id, code, name, severity_id, lat, lng, created_at";

pub struct DisasterRepo;

impl DisasterRepo {
    /// Insert a new disaster.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDisaster,
        severity: Priority,
    ) -> Result<Disaster, sqlx::Error> {
        let query = format!(
            "INSERT INTO disasters (code, name, severity_id, lat, lng) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Disaster>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(severity.id())
            .bind(input.lat)
            .bind(input.lng)
            .fetch_one(pool)
            .await
    }

    /// List all disasters, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Disaster>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM disasters ORDER BY created_at DESC");
        sqlx::query_as::<_, Disaster>(&query).fetch_all(pool).await
    }

    /// Resolve a disaster reference: primary id when the reference parses
    /// as one, falling back to the human-readable code.
    pub async fn resolve(pool: &PgPool, reference: &str) -> Result<Option<Disaster>, sqlx::Error> {
        if let Ok(id) = reference.parse::<DbId>() {
            if let Some(found) = Self::find_by_id(pool, id).await? {
                return Ok(Some(found));
            }
        }
        Self::find_by_code(pool, reference).await
    }

    async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Disaster>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM disasters WHERE id = $1");
        sqlx::query_as::<_, Disaster>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Disaster>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM disasters WHERE code = $1");
        sqlx::query_as::<_, Disaster>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }
}
