//! Resource entity models and request DTOs.

use relief_core::quantity::Quantity;
use relief_core::status::{Priority, ResourceStatus, StatusId};
use relief_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `resources` table.
///
/// Quantity counters are flat columns; use [`Resource::quantity`] to get the
/// snapshot the pure bookkeeping operations work on.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Resource {
    pub id: DbId,
    pub name: String,
    pub resource_type: String,
    pub category: String,
    pub quantity_current: i32,
    pub quantity_allocated: i32,
    pub quantity_reserved: i32,
    pub lat: f64,
    pub lng: f64,
    pub address: Option<String>,
    pub status_id: StatusId,
    pub priority_id: StatusId,
    pub reserved_until: Option<Timestamp>,
    pub specifications: Option<serde_json::Value>,
    pub vendor_info: Option<serde_json::Value>,
    pub supply_chain: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Resource {
    /// Quantity counters as a pure snapshot.
    pub fn quantity(&self) -> Quantity {
        Quantity {
            current: self.quantity_current,
            allocated: self.quantity_allocated,
            reserved: self.quantity_reserved,
        }
    }

    /// Display status. An unseeded id (impossible under the FK) falls back
    /// to `available`.
    pub fn status(&self) -> ResourceStatus {
        ResourceStatus::from_id(self.status_id).unwrap_or(ResourceStatus::Available)
    }

    /// Priority. Falls back to `medium`, matching the column default.
    pub fn priority(&self) -> Priority {
        Priority::from_id(self.priority_id).unwrap_or(Priority::Medium)
    }
}

/// DTO for `POST /api/v1/resources`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateResource {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub resource_type: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(range(min = 0))]
    pub quantity_current: i32,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    pub address: Option<String>,
    /// Priority label (`low`/`medium`/`high`/`critical`); defaults to medium.
    pub priority: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub vendor_info: Option<serde_json::Value>,
    pub supply_chain: Option<serde_json::Value>,
}

/// DTO for `PUT /api/v1/resources/{id}`. All fields optional; quantity
/// counters other than `quantity_current` are never writable directly.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateResource {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub resource_type: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    /// New stock level. Rejected if it would drop below the committed
    /// (allocated + reserved) level.
    #[validate(range(min = 0))]
    pub quantity_current: Option<i32>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
    pub address: Option<String>,
    /// Status label; only `available`/`maintenance`/`out_of_stock` may be
    /// set by hand, the rest are derived.
    pub status: Option<String>,
    pub priority: Option<String>,
    pub specifications: Option<serde_json::Value>,
    pub vendor_info: Option<serde_json::Value>,
    pub supply_chain: Option<serde_json::Value>,
}

/// Body of `POST /api/v1/resources/{id}/allocate`.
#[derive(Debug, Deserialize, Validate)]
pub struct AllocateRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
    /// Disaster primary id or human-readable code.
    #[validate(length(min = 1))]
    pub disaster_id: String,
    pub location: Option<String>,
    #[validate(range(min = 1))]
    pub estimated_duration_mins: Option<i32>,
    pub notes: Option<String>,
}

/// Body of `POST /api/v1/resources/{id}/reserve`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReserveRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub reason: Option<String>,
    /// Stored for display; nothing schedules against it.
    pub reserved_until: Option<Timestamp>,
}

/// Body of `POST /api/v1/resources/{id}/release`.
#[derive(Debug, Deserialize, Validate)]
pub struct ReleaseRequest {
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// Body of `POST /api/v1/resources/{id}/complete-deployment`.
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteDeploymentRequest {
    pub deployment_id: DbId,
    #[validate(range(min = 0))]
    pub actual_duration_mins: Option<i32>,
    pub notes: Option<String>,
}

/// Query parameters for `GET /api/v1/resources`.
#[derive(Debug, Default, Deserialize)]
pub struct ResourceListQuery {
    pub resource_type: Option<String>,
    pub category: Option<String>,
    /// Status label filter.
    pub status: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 200.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
