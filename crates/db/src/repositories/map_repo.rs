//! Geographically filtered reads (and citizen writes) backing the map
//! overlay endpoints.
//!
//! All reads take an optional [`BoundingBox`]; without one they return the
//! whole table, capped. Distance refinement beyond the rectangle happens in
//! the handler layer with `relief_core::geo`.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use relief_core::geo::BoundingBox;
use relief_core::status::{Priority, SosStatus};
use relief_core::types::DbId;

use crate::models::incident_report::{CreateIncidentReport, IncidentReport};
use crate::models::reporting::{HeatPoint, ResourceMarker};
use crate::models::safe_zone::SafeZone;
use crate::models::sos::{CreateSosAlert, SosAlert};

/// Hard cap on rows returned by any overlay query.
const OVERLAY_LIMIT: i64 = 1000;

const SOS_COLUMNS: &str = "id, user_id, lat, lng, message, status_id, created_at";
const ZONE_COLUMNS: &str = "id, name, lat, lng, capacity, occupancy, created_at";
const REPORT_COLUMNS: &str =
    "id, user_id, report_type, description, lat, lng, severity_id, verified, created_at";

/// Render a bbox filter for the given starting bind index, or an always-true
/// clause when no box was supplied.
fn bbox_clause(bbox: Option<&BoundingBox>, first_bind: u32) -> String {
    match bbox {
        Some(_) => format!(
            "lat BETWEEN ${} AND ${} AND lng BETWEEN ${} AND ${}",
            first_bind,
            first_bind + 1,
            first_bind + 2,
            first_bind + 3
        ),
        None => "TRUE".to_string(),
    }
}

/// Bind bbox bounds onto a query when present.
fn bind_bbox<'q, T>(
    query: QueryAs<'q, Postgres, T, PgArguments>,
    bbox: Option<&BoundingBox>,
) -> QueryAs<'q, Postgres, T, PgArguments> {
    match bbox {
        Some(b) => query
            .bind(b.min_lat)
            .bind(b.max_lat)
            .bind(b.min_lng)
            .bind(b.max_lng),
        None => query,
    }
}

pub struct MapRepo;

impl MapRepo {
    /// Record a citizen SOS alert (status `active`).
    pub async fn create_sos(
        pool: &PgPool,
        user_id: Option<DbId>,
        input: &CreateSosAlert,
    ) -> Result<SosAlert, sqlx::Error> {
        let query = format!(
            "INSERT INTO sos_alerts (user_id, lat, lng, message) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {SOS_COLUMNS}"
        );
        sqlx::query_as::<_, SosAlert>(&query)
            .bind(user_id)
            .bind(input.lat)
            .bind(input.lng)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// Record a citizen incident report.
    pub async fn create_report(
        pool: &PgPool,
        user_id: Option<DbId>,
        input: &CreateIncidentReport,
        severity: Priority,
    ) -> Result<IncidentReport, sqlx::Error> {
        let query = format!(
            "INSERT INTO incident_reports (user_id, report_type, description, lat, lng, severity_id) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {REPORT_COLUMNS}"
        );
        sqlx::query_as::<_, IncidentReport>(&query)
            .bind(user_id)
            .bind(&input.report_type)
            .bind(&input.description)
            .bind(input.lat)
            .bind(input.lng)
            .bind(severity.id())
            .fetch_one(pool)
            .await
    }

    /// Active SOS alerts, newest first.
    pub async fn active_sos(
        pool: &PgPool,
        bbox: Option<&BoundingBox>,
    ) -> Result<Vec<SosAlert>, sqlx::Error> {
        let query = format!(
            "SELECT {SOS_COLUMNS} FROM sos_alerts \
             WHERE status_id = $1 AND {} \
             ORDER BY created_at DESC \
             LIMIT {OVERLAY_LIMIT}",
            bbox_clause(bbox, 2)
        );
        let q = sqlx::query_as::<_, SosAlert>(&query).bind(SosStatus::Active.id());
        bind_bbox(q, bbox).fetch_all(pool).await
    }

    /// Safe zones in the window.
    pub async fn safe_zones(
        pool: &PgPool,
        bbox: Option<&BoundingBox>,
    ) -> Result<Vec<SafeZone>, sqlx::Error> {
        let query = format!(
            "SELECT {ZONE_COLUMNS} FROM safe_zones \
             WHERE {} \
             ORDER BY name \
             LIMIT {OVERLAY_LIMIT}",
            bbox_clause(bbox, 1)
        );
        let q = sqlx::query_as::<_, SafeZone>(&query);
        bind_bbox(q, bbox).fetch_all(pool).await
    }

    /// Resource positions with available quantity.
    pub async fn resource_markers(
        pool: &PgPool,
        bbox: Option<&BoundingBox>,
    ) -> Result<Vec<ResourceMarker>, sqlx::Error> {
        let query = format!(
            "SELECT id, name, resource_type, lat, lng, \
                    quantity_current - quantity_allocated - quantity_reserved AS available \
             FROM resources \
             WHERE {} \
             ORDER BY name \
             LIMIT {OVERLAY_LIMIT}",
            bbox_clause(bbox, 1)
        );
        let q = sqlx::query_as::<_, ResourceMarker>(&query);
        bind_bbox(q, bbox).fetch_all(pool).await
    }

    /// Incident reports in the window, optionally filtered by type.
    pub async fn reports(
        pool: &PgPool,
        bbox: Option<&BoundingBox>,
        report_type: Option<&str>,
    ) -> Result<Vec<IncidentReport>, sqlx::Error> {
        let type_bind = match bbox {
            Some(_) => 5,
            None => 1,
        };
        let type_clause = match report_type {
            Some(_) => format!("report_type = ${type_bind}"),
            None => "TRUE".to_string(),
        };
        let query = format!(
            "SELECT {REPORT_COLUMNS} FROM incident_reports \
             WHERE {} AND {type_clause} \
             ORDER BY created_at DESC \
             LIMIT {OVERLAY_LIMIT}",
            bbox_clause(bbox, 1)
        );
        let mut q = sqlx::query_as::<_, IncidentReport>(&query);
        q = bind_bbox(q, bbox);
        if let Some(rt) = report_type {
            q = q.bind(rt);
        }
        q.fetch_all(pool).await
    }

    /// Weighted points feeding the heatmap: every incident report counts 1,
    /// every active SOS counts 2. Binning into grid cells happens in the
    /// handler.
    pub async fn heat_points(
        pool: &PgPool,
        bbox: Option<&BoundingBox>,
    ) -> Result<Vec<HeatPoint>, sqlx::Error> {
        let sos_clause = match bbox {
            Some(_) => "lat BETWEEN $2 AND $3 AND lng BETWEEN $4 AND $5".to_string(),
            None => "TRUE".to_string(),
        };
        let report_clause = match bbox {
            Some(_) => "lat BETWEEN $2 AND $3 AND lng BETWEEN $4 AND $5".to_string(),
            None => "TRUE".to_string(),
        };
        let query = format!(
            "SELECT lat, lng, 1::BIGINT AS weight FROM incident_reports WHERE {report_clause} \
             UNION ALL \
             SELECT lat, lng, 2::BIGINT AS weight FROM sos_alerts \
             WHERE status_id = $1 AND {sos_clause}"
        );
        let q = sqlx::query_as::<_, HeatPoint>(&query).bind(SosStatus::Active.id());
        let q = match bbox {
            Some(b) => q
                .bind(b.min_lat)
                .bind(b.max_lat)
                .bind(b.min_lng)
                .bind(b.max_lng),
            None => q,
        };
        q.fetch_all(pool).await
    }
}
