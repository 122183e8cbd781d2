//! Deployment history entity.

use relief_core::status::{DeploymentStatus, StatusId};
use relief_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `deployments` table.
///
/// Created when an allocation succeeds (status `deployed`); marked
/// `completed` when the deployment is closed out. Rows are never deleted by
/// the application.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deployment {
    pub id: DbId,
    pub resource_id: DbId,
    pub disaster_id: DbId,
    pub location_name: Option<String>,
    pub quantity_deployed: i32,
    pub status_id: StatusId,
    pub deployed_at: Timestamp,
    pub completed_at: Option<Timestamp>,
    pub estimated_duration_mins: Option<i32>,
    pub actual_duration_mins: Option<i32>,
    pub notes: Option<String>,
}

impl Deployment {
    pub fn status(&self) -> DeploymentStatus {
        DeploymentStatus::from_id(self.status_id).unwrap_or(DeploymentStatus::Deployed)
    }
}
