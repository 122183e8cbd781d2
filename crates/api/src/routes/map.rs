//! Route definitions for the map overlays.
//!
//! Mounted at `/map`. All endpoints accept an optional bounding box
//! (`min_lat`/`min_lng`/`max_lat`/`max_lng`).
//!
//! ```text
//! GET /sos                  active_sos
//! GET /safe-zones           safe_zones
//! GET /resources            resource_markers
//! GET /reports              incident_reports (?report_type=)
//! GET /heatmap              heatmap (?cell_deg=)
//! GET /resource-analysis    resource_analysis (?radius_km=)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::map;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sos", get(map::active_sos))
        .route("/safe-zones", get(map::safe_zones))
        .route("/resources", get(map::resource_markers))
        .route("/reports", get(map::incident_reports))
        .route("/heatmap", get(map::heatmap))
        .route("/resource-analysis", get(map::resource_analysis))
}
