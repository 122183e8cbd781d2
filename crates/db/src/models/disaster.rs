//! Disaster entity: the target of an allocation.

use relief_core::status::{Priority, StatusId};
use relief_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `disasters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Disaster {
    pub id: DbId,
    /// Human-readable code (e.g. `FLOOD-2026-014`), unique. Allocation
    /// requests may reference a disaster by this code instead of its id.
    pub code: String,
    pub name: String,
    pub severity_id: StatusId,
    pub lat: f64,
    pub lng: f64,
    pub created_at: Timestamp,
}

impl Disaster {
    pub fn severity(&self) -> Priority {
        Priority::from_id(self.severity_id).unwrap_or(Priority::Medium)
    }
}

/// DTO for `POST /api/v1/disasters`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDisaster {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    /// Severity label; defaults to medium.
    pub severity: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}
