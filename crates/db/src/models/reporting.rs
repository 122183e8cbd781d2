//! Read-only aggregation row types for the reporting endpoints.
//!
//! All of these are point-in-time snapshots with no consistency guarantee
//! relative to concurrent writers.

use serde::Serialize;
use sqlx::FromRow;

/// One row of `GET /api/v1/resources/inventory/summary`, grouped by
/// resource type.
#[derive(Debug, FromRow, Serialize)]
pub struct InventorySummaryRow {
    pub resource_type: String,
    pub resource_count: i64,
    pub total_current: i64,
    pub total_allocated: i64,
    pub total_reserved: i64,
    pub total_available: i64,
    /// `(allocated + reserved) / current * 100`, 0 when the group holds no
    /// stock.
    pub utilization_rate: f64,
}

/// Per-category breakdown for the dashboard.
#[derive(Debug, FromRow, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub resource_count: i64,
    pub total_available: i64,
}

/// Per-status breakdown for the dashboard. The label comes from the status
/// lookup table, so it always matches the seeded names.
#[derive(Debug, FromRow, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub resource_count: i64,
}

/// Fleet-wide totals for the dashboard.
#[derive(Debug, FromRow, Serialize)]
pub struct InventoryTotals {
    pub resource_count: i64,
    pub total_current: i64,
    pub total_allocated: i64,
    pub total_reserved: i64,
    pub total_available: i64,
    pub utilization_rate: f64,
}

/// Composite payload of `GET /api/v1/resources/dashboard/metrics`.
#[derive(Debug, Serialize)]
pub struct DashboardMetrics {
    pub totals: InventoryTotals,
    pub by_category: Vec<CategoryCount>,
    pub by_status: Vec<StatusCount>,
}

/// Payload of `GET /api/v1/resources/stats`, computed over the deployments
/// table.
#[derive(Debug, FromRow, Serialize)]
pub struct DeploymentStats {
    pub total_deployments: i64,
    pub active_deployments: i64,
    pub completed_deployments: i64,
    /// Deployments started within the last 30 days.
    pub recent_deployments: i64,
    /// Mean `actual_duration_mins` over completed deployments.
    pub avg_actual_duration_mins: Option<f64>,
    /// `completed / total * 100`, 0 when there are no deployments.
    pub success_rate: f64,
}

/// A raw weighted point feeding the heatmap binning (incident reports plus
/// active SOS alerts).
#[derive(Debug, FromRow)]
pub struct HeatPoint {
    pub lat: f64,
    pub lng: f64,
    pub weight: i64,
}

/// Resource position with availability for `GET /api/v1/map/resources`.
#[derive(Debug, FromRow, Serialize)]
pub struct ResourceMarker {
    pub id: i64,
    pub name: String,
    pub resource_type: String,
    pub lat: f64,
    pub lng: f64,
    pub available: i32,
}
