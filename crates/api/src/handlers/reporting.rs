//! Aggregation reporting handlers: inventory summary, dashboard metrics,
//! and deployment statistics.
//!
//! All three are read-only snapshots computed in SQL; they carry no
//! consistency guarantee relative to concurrent allocations.

use axum::extract::State;
use axum::Json;

use relief_db::models::reporting::{DashboardMetrics, DeploymentStats, InventorySummaryRow};
use relief_db::repositories::ReportingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /resources/inventory/summary
pub async fn inventory_summary(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<InventorySummaryRow>>>> {
    let rows = ReportingRepo::inventory_summary(&state.pool)
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(rows)))
}

/// GET /resources/dashboard/metrics
pub async fn dashboard_metrics(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardMetrics>>> {
    let metrics = ReportingRepo::dashboard_metrics(&state.pool)
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(metrics)))
}

/// GET /resources/stats
pub async fn deployment_stats(
    _user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DeploymentStats>>> {
    let stats = ReportingRepo::deployment_stats(&state.pool)
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(stats)))
}
