//! Map overlay handlers: SOS alerts, safe zones, resource markers, incident
//! reports, the incident heatmap, and per-zone resource coverage analysis.
//!
//! Every endpoint takes an optional rectangular window (`min_lat`/`min_lng`/
//! `max_lat`/`max_lng`). A partial window is rejected; no window means the
//! whole table, capped by the repository.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use relief_core::geo::{
    cell_center, cell_index, haversine_km, BoundingBox, CellIndex, GeoPoint,
    DEFAULT_HEATMAP_CELL_DEG,
};
use relief_db::models::incident_report::IncidentReport;
use relief_db::models::reporting::ResourceMarker;
use relief_db::models::safe_zone::SafeZone;
use relief_db::models::sos::SosAlert;
use relief_db::repositories::MapRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Radius used by resource-analysis when the caller does not pass one.
const DEFAULT_ANALYSIS_RADIUS_KM: f64 = 10.0;

// ============================================================================
// Query shapes
// ============================================================================

/// Common window parameters shared by all overlay endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MapWindowQuery {
    pub min_lat: Option<f64>,
    pub min_lng: Option<f64>,
    pub max_lat: Option<f64>,
    pub max_lng: Option<f64>,
    /// Incident report type filter (reports endpoint only).
    pub report_type: Option<String>,
    /// Heatmap cell size in degrees (heatmap endpoint only).
    pub cell_deg: Option<f64>,
    /// Coverage radius in kilometres (resource-analysis endpoint only).
    pub radius_km: Option<f64>,
}

impl MapWindowQuery {
    /// All four bounds, one validated box. None at all, no filter. Anything
    /// in between is a client error.
    fn bbox(&self) -> Result<Option<BoundingBox>, AppError> {
        match (self.min_lat, self.min_lng, self.max_lat, self.max_lng) {
            (Some(min_lat), Some(min_lng), Some(max_lat), Some(max_lng)) => {
                let bbox = BoundingBox {
                    min_lat,
                    min_lng,
                    max_lat,
                    max_lng,
                };
                bbox.validate()?;
                Ok(Some(bbox))
            }
            (None, None, None, None) => Ok(None),
            _ => Err(AppError::BadRequest(
                "Bounding box requires all of min_lat, min_lng, max_lat, max_lng".into(),
            )),
        }
    }
}

// ============================================================================
// Response shapes
// ============================================================================

/// One heatmap cell with its aggregated weight.
#[derive(Debug, Serialize)]
pub struct HeatmapCell {
    pub lat: f64,
    pub lng: f64,
    pub weight: i64,
}

/// Payload of `GET /api/v1/map/heatmap`.
#[derive(Debug, Serialize)]
pub struct HeatmapResponse {
    pub cell_deg: f64,
    pub cells: Vec<HeatmapCell>,
}

/// Per-type availability within a zone's radius.
#[derive(Debug, Serialize)]
pub struct ZoneResourceGroup {
    pub resource_type: String,
    pub resource_count: usize,
    pub total_available: i64,
}

/// One safe zone's resource coverage for `GET /api/v1/map/resource-analysis`.
#[derive(Debug, Serialize)]
pub struct ZoneCoverage {
    pub zone_id: i64,
    pub zone_name: String,
    pub remaining_capacity: i32,
    pub radius_km: f64,
    pub nearby_resources: Vec<ZoneResourceGroup>,
    /// Available units per remaining place, 0 when the zone is full.
    pub coverage_ratio: f64,
}

// ============================================================================
// Overlay reads
// ============================================================================

/// GET /map/sos
pub async fn active_sos(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MapWindowQuery>,
) -> AppResult<Json<DataResponse<Vec<SosAlert>>>> {
    let bbox = params.bbox()?;
    let alerts = MapRepo::active_sos(&state.pool, bbox.as_ref())
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(alerts)))
}

/// GET /map/safe-zones
pub async fn safe_zones(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MapWindowQuery>,
) -> AppResult<Json<DataResponse<Vec<SafeZone>>>> {
    let bbox = params.bbox()?;
    let zones = MapRepo::safe_zones(&state.pool, bbox.as_ref())
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(zones)))
}

/// GET /map/resources
pub async fn resource_markers(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MapWindowQuery>,
) -> AppResult<Json<DataResponse<Vec<ResourceMarker>>>> {
    let bbox = params.bbox()?;
    let markers = MapRepo::resource_markers(&state.pool, bbox.as_ref())
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(markers)))
}

/// GET /map/reports
pub async fn incident_reports(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MapWindowQuery>,
) -> AppResult<Json<DataResponse<Vec<IncidentReport>>>> {
    let bbox = params.bbox()?;
    let reports = MapRepo::reports(&state.pool, bbox.as_ref(), params.report_type.as_deref())
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(reports)))
}

// ============================================================================
// Heatmap
// ============================================================================

/// GET /map/heatmap
///
/// Bins incident reports (weight 1) and active SOS alerts (weight 2) into
/// grid cells; each cell is reported at its centre.
pub async fn heatmap(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MapWindowQuery>,
) -> AppResult<Json<DataResponse<HeatmapResponse>>> {
    let bbox = params.bbox()?;
    let cell_deg = params.cell_deg.unwrap_or(DEFAULT_HEATMAP_CELL_DEG);
    // Below 0.001 degrees the i32 cell arithmetic overflows and distant
    // points land in the same saturated cell.
    if !(0.001..=10.0).contains(&cell_deg) {
        return Err(AppError::BadRequest(
            "cell_deg must be within [0.001, 10]".into(),
        ));
    }

    let points = MapRepo::heat_points(&state.pool, bbox.as_ref())
        .await
        .map_err(AppError::Database)?;

    let mut bins: HashMap<CellIndex, i64> = HashMap::new();
    for point in &points {
        let cell = cell_index(
            GeoPoint {
                lat: point.lat,
                lng: point.lng,
            },
            cell_deg,
        );
        *bins.entry(cell).or_default() += point.weight;
    }

    let mut cells: Vec<HeatmapCell> = bins
        .into_iter()
        .map(|(cell, weight)| {
            let center = cell_center(cell, cell_deg);
            HeatmapCell {
                lat: center.lat,
                lng: center.lng,
                weight,
            }
        })
        .collect();
    cells.sort_by(|a, b| b.weight.cmp(&a.weight));

    Ok(Json(DataResponse::new(HeatmapResponse { cell_deg, cells })))
}

// ============================================================================
// Resource coverage analysis
// ============================================================================

/// GET /map/resource-analysis
///
/// For every safe zone in the window, group the resources within
/// `radius_km` by type and relate total availability to the zone's
/// remaining capacity.
pub async fn resource_analysis(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<MapWindowQuery>,
) -> AppResult<Json<DataResponse<Vec<ZoneCoverage>>>> {
    let bbox = params.bbox()?;
    let radius_km = params.radius_km.unwrap_or(DEFAULT_ANALYSIS_RADIUS_KM);
    if !(radius_km > 0.0) || radius_km > 500.0 {
        return Err(AppError::BadRequest(
            "radius_km must be within (0, 500]".into(),
        ));
    }

    let zones = MapRepo::safe_zones(&state.pool, bbox.as_ref())
        .await
        .map_err(AppError::Database)?;
    // Markers are fetched unwindowed: a resource just outside the viewport
    // can still be within radius of a zone inside it.
    let markers = MapRepo::resource_markers(&state.pool, None)
        .await
        .map_err(AppError::Database)?;

    let coverage = zones
        .iter()
        .map(|zone| analyze_zone(zone, &markers, radius_km))
        .collect();

    Ok(Json(DataResponse::new(coverage)))
}

fn analyze_zone(zone: &SafeZone, markers: &[ResourceMarker], radius_km: f64) -> ZoneCoverage {
    let zone_point = GeoPoint {
        lat: zone.lat,
        lng: zone.lng,
    };

    let mut groups: HashMap<&str, (usize, i64)> = HashMap::new();
    for marker in markers {
        let marker_point = GeoPoint {
            lat: marker.lat,
            lng: marker.lng,
        };
        if haversine_km(zone_point, marker_point) <= radius_km {
            let entry = groups.entry(marker.resource_type.as_str()).or_default();
            entry.0 += 1;
            entry.1 += i64::from(marker.available.max(0));
        }
    }

    let mut nearby_resources: Vec<ZoneResourceGroup> = groups
        .into_iter()
        .map(|(resource_type, (resource_count, total_available))| ZoneResourceGroup {
            resource_type: resource_type.to_string(),
            resource_count,
            total_available,
        })
        .collect();
    nearby_resources.sort_by(|a, b| a.resource_type.cmp(&b.resource_type));

    let total_available: i64 = nearby_resources.iter().map(|g| g.total_available).sum();
    let remaining = zone.remaining_capacity();
    let coverage_ratio = if remaining > 0 {
        total_available as f64 / f64::from(remaining)
    } else {
        0.0
    };

    ZoneCoverage {
        zone_id: zone.id,
        zone_name: zone.name.clone(),
        remaining_capacity: remaining,
        radius_km,
        nearby_resources,
        coverage_ratio,
    }
}
