//! SOS alert entity.

use relief_core::status::{SosStatus, StatusId};
use relief_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `sos_alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SosAlert {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub lat: f64,
    pub lng: f64,
    pub message: Option<String>,
    pub status_id: StatusId,
    pub created_at: Timestamp,
}

impl SosAlert {
    pub fn status(&self) -> SosStatus {
        SosStatus::from_id(self.status_id).unwrap_or(SosStatus::Active)
    }
}

/// Body of `POST /api/v1/sos`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSosAlert {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    #[validate(length(max = 500))]
    pub message: Option<String>,
}
