//! Safe zone entity.

use relief_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `safe_zones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SafeZone {
    pub id: DbId,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub capacity: i32,
    pub occupancy: i32,
    pub created_at: Timestamp,
}

impl SafeZone {
    /// Places still available, clamped at zero (occupancy can be recorded
    /// above capacity during an evacuation surge).
    pub fn remaining_capacity(&self) -> i32 {
        (self.capacity - self.occupancy).max(0)
    }
}
