pub mod alerts;
pub mod auth;
pub mod disasters;
pub mod donations;
pub mod health;
pub mod map;
pub mod resources;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/mobile-login                       mobile login (public)
///
/// /resources                               list, create
/// /resources/inventory/summary             per-type inventory summary
/// /resources/dashboard/metrics             fleet totals + breakdowns
/// /resources/stats                         deployment statistics
/// /resources/{id}                          get (with history), update, delete
/// /resources/{id}/allocate                 allocate to a disaster (POST)
/// /resources/{id}/reserve                  soft-hold quantity (POST)
/// /resources/{id}/release                  release a reservation (POST)
/// /resources/{id}/complete-deployment      close out a deployment (POST)
/// /resources/{id}/recommendation           scored suggestion (?demand=N)
///
/// /disasters                               list, create
///
/// /donations/confirm                       gateway callback (public)
/// /donations/donor/{email}                 donor history + totals (admin)
/// /donations/stats                         donation aggregates (admin)
///
/// /sos                                     raise SOS alert (POST, anonymous ok)
/// /reports                                 file incident report (POST, anonymous ok)
///
/// /map/sos                                 active SOS alerts
/// /map/safe-zones                          safe zones
/// /map/resources                           resource markers
/// /map/reports                             incident reports (?report_type=)
/// /map/heatmap                             binned incident heatmap (?cell_deg=)
/// /map/resource-analysis                   per-zone coverage (?radius_km=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Mobile authentication.
        .nest("/auth", auth::router())
        // Inventory, allocation lifecycle, and reporting.
        .nest("/resources", resources::router())
        // Disaster registry.
        .nest("/disasters", disasters::router())
        // Donations.
        .nest("/donations", donations::router())
        // Citizen submissions (root-level paths).
        .merge(alerts::router())
        // Map overlays.
        .nest("/map", map::router())
}
