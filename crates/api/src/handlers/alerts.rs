//! Citizen-facing write handlers: SOS alerts and incident reports.
//!
//! Both accept anonymous submissions; when a valid token is present the
//! row is attributed to the caller.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use relief_core::status::Priority;
use relief_db::models::incident_report::{CreateIncidentReport, IncidentReport};
use relief_db::models::sos::{CreateSosAlert, SosAlert};
use relief_db::repositories::MapRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /sos
pub async fn create_sos(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Json(input): Json<CreateSosAlert>,
) -> AppResult<(StatusCode, Json<DataResponse<SosAlert>>)> {
    input.validate()?;

    let user_id = user.as_ref().map(|u| u.user_id);
    let alert = MapRepo::create_sos(&state.pool, user_id, &input)
        .await
        .map_err(AppError::Database)?;

    tracing::warn!(
        sos_id = alert.id,
        lat = alert.lat,
        lng = alert.lng,
        "SOS alert raised"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(alert))))
}

/// POST /reports
pub async fn create_report(
    user: Option<AuthUser>,
    State(state): State<AppState>,
    Json(input): Json<CreateIncidentReport>,
) -> AppResult<(StatusCode, Json<DataResponse<IncidentReport>>)> {
    input.validate()?;

    let severity = match input.severity.as_deref() {
        Some(label) => Priority::parse(label)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown severity '{label}'")))?,
        None => Priority::Medium,
    };

    let user_id = user.as_ref().map(|u| u.user_id);
    let report = MapRepo::create_report(&state.pool, user_id, &input, severity)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(
        report_id = report.id,
        report_type = %report.report_type,
        "incident report filed"
    );

    Ok((StatusCode::CREATED, Json(DataResponse::new(report))))
}
