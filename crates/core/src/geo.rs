//! Geospatial helpers for the map overlay endpoints.
//!
//! Coordinates are plain WGS84 degrees. Queries filter with a rectangular
//! bounding box in SQL; distance refinement (resource-analysis) and heatmap
//! binning happen here.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default heatmap cell size in degrees (~5.5 km of latitude).
pub const DEFAULT_HEATMAP_CELL_DEG: f64 = 0.05;

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// A rectangular query window.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lng: f64,
    pub max_lat: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Validate the window: latitudes in [-90, 90], longitudes in
    /// [-180, 180], min not above max. Boxes crossing the antimeridian are
    /// rejected rather than silently returning nothing.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(-90.0..=90.0).contains(&self.min_lat) || !(-90.0..=90.0).contains(&self.max_lat) {
            return Err(CoreError::Validation("latitude out of range [-90, 90]".into()));
        }
        if !(-180.0..=180.0).contains(&self.min_lng) || !(-180.0..=180.0).contains(&self.max_lng) {
            return Err(CoreError::Validation(
                "longitude out of range [-180, 180]".into(),
            ));
        }
        if self.min_lat > self.max_lat || self.min_lng > self.max_lng {
            return Err(CoreError::Validation(
                "bounding box min must not exceed max".into(),
            ));
        }
        Ok(())
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lng >= self.min_lng
            && point.lng <= self.max_lng
    }
}

/// Great-circle distance between two points in kilometres (haversine).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// A heatmap grid cell identified by integer indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIndex {
    pub row: i32,
    pub col: i32,
}

/// Bin a point into a grid cell of `cell_deg` degrees.
pub fn cell_index(point: GeoPoint, cell_deg: f64) -> CellIndex {
    CellIndex {
        row: (point.lat / cell_deg).floor() as i32,
        col: (point.lng / cell_deg).floor() as i32,
    }
}

/// Centre point of a grid cell.
pub fn cell_center(cell: CellIndex, cell_deg: f64) -> GeoPoint {
    GeoPoint {
        lat: (f64::from(cell.row) + 0.5) * cell_deg,
        lng: (f64::from(cell.col) + 0.5) * cell_deg,
    }
}
