//! Disaster registry handlers. Allocations reference disasters by id or
//! code, so responders need a way to register and browse them.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use relief_core::status::Priority;
use relief_db::models::disaster::{CreateDisaster, Disaster};
use relief_db::repositories::DisasterRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /disasters
pub async fn list_disasters(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Disaster>>>> {
    let disasters = DisasterRepo::list(&state.pool)
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(disasters)))
}

/// POST /disasters
pub async fn create_disaster(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateDisaster>,
) -> AppResult<(StatusCode, Json<DataResponse<Disaster>>)> {
    user.require_admin()?;
    input.validate()?;

    let severity = match input.severity.as_deref() {
        Some(label) => Priority::parse(label)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown severity '{label}'")))?,
        None => Priority::Medium,
    };

    let disaster = DisasterRepo::create(&state.pool, &input, severity)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(disaster_id = disaster.id, code = %disaster.code, "disaster registered");

    Ok((StatusCode::CREATED, Json(DataResponse::new(disaster))))
}
