//! Incident report entity.

use relief_core::status::{Priority, StatusId};
use relief_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `incident_reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IncidentReport {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub report_type: String,
    pub description: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub severity_id: StatusId,
    pub verified: bool,
    pub created_at: Timestamp,
}

impl IncidentReport {
    pub fn severity(&self) -> Priority {
        Priority::from_id(self.severity_id).unwrap_or(Priority::Medium)
    }
}

/// Body of `POST /api/v1/reports`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateIncidentReport {
    #[validate(length(min = 1, max = 100))]
    pub report_type: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    /// Severity label; defaults to medium.
    pub severity: Option<String>,
}
