//! Resource inventory handlers: CRUD, allocation, reservation, deployment
//! completion, and the allocation recommendation endpoint.
//!
//! All quantity mutations go through `ResourceRepo`, which does the
//! bookkeeping inside a row-locked transaction; handlers only validate
//! input, resolve references, and shape responses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use relief_core::error::CoreError;
use relief_core::recommendation::{recommend, Recommendation};
use relief_core::status::{Priority, ResourceStatus};
use relief_core::types::{DbId, Timestamp};

use relief_db::models::deployment::Deployment;
use relief_db::models::resource::{
    AllocateRequest, CompleteDeploymentRequest, CreateResource, ReleaseRequest, ReserveRequest,
    Resource, ResourceListQuery, UpdateResource,
};
use relief_db::repositories::{DeploymentRepo, DisasterRepo, ResourceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ============================================================================
// Response shapes
// ============================================================================

/// Resource row plus its display labels.
#[derive(Debug, Serialize)]
pub struct ResourceView {
    #[serde(flatten)]
    pub resource: Resource,
    pub status: &'static str,
    pub priority: &'static str,
    pub available: i32,
}

impl From<Resource> for ResourceView {
    fn from(resource: Resource) -> Self {
        let status = resource.status().as_str();
        let priority = resource.priority().as_str();
        let available = resource.quantity().available();
        Self {
            resource,
            status,
            priority,
            available,
        }
    }
}

/// Payload of `GET /api/v1/resources/{id}`.
#[derive(Debug, Serialize)]
pub struct ResourceDetail {
    #[serde(flatten)]
    pub resource: ResourceView,
    pub deployment_history: Vec<Deployment>,
}

/// Payload of `POST /api/v1/resources/{id}/allocate`.
#[derive(Debug, Serialize)]
pub struct AllocationResponse {
    pub allocated_quantity: i32,
    pub remaining_available: i32,
    pub deployment_id: DbId,
    pub disaster_id: DbId,
    pub disaster_code: String,
    pub status: &'static str,
}

/// Payload of `POST /api/v1/resources/{id}/reserve`.
#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    /// Quantity held by this request; `total_reserved` carries the
    /// cumulative hold.
    pub reserved_quantity: i32,
    pub total_reserved: i32,
    pub remaining_available: i32,
    pub reserved_until: Option<Timestamp>,
    pub status: &'static str,
}

/// Payload of `POST /api/v1/resources/{id}/release`.
#[derive(Debug, Serialize)]
pub struct ReleaseResponse {
    pub total_reserved: i32,
    pub remaining_available: i32,
    pub status: &'static str,
}

/// Payload of `POST /api/v1/resources/{id}/complete-deployment`.
#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub deployment: Deployment,
    pub remaining_available: i32,
    pub status: &'static str,
}

/// Query string of `GET /api/v1/resources/{id}/recommendation`.
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub demand: i32,
}

/// Payload of `GET /api/v1/resources/{id}/recommendation`.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub resource_id: DbId,
    pub available: i32,
    pub demand: i32,
    pub priority: &'static str,
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

// ============================================================================
// Label parsing helpers
// ============================================================================

fn parse_priority(label: Option<&str>) -> Result<Option<Priority>, AppError> {
    label
        .map(|l| {
            Priority::parse(l)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown priority '{l}'")))
        })
        .transpose()
}

fn parse_status_filter(label: Option<&str>) -> Result<Option<ResourceStatus>, AppError> {
    label
        .map(|l| {
            ResourceStatus::parse(l)
                .ok_or_else(|| AppError::BadRequest(format!("Unknown status '{l}'")))
        })
        .transpose()
}

/// Only the manual statuses may be written through the update endpoint; the
/// rest are derived from quantity arithmetic.
fn parse_manual_status(label: Option<&str>) -> Result<Option<ResourceStatus>, AppError> {
    let Some(status) = parse_status_filter(label)? else {
        return Ok(None);
    };
    match status {
        ResourceStatus::Available | ResourceStatus::Maintenance | ResourceStatus::OutOfStock => {
            Ok(Some(status))
        }
        other => Err(AppError::BadRequest(format!(
            "Status '{}' is derived and cannot be set directly",
            other.as_str()
        ))),
    }
}

// ============================================================================
// CRUD
// ============================================================================

/// GET /resources
pub async fn list_resources(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ResourceListQuery>,
) -> AppResult<Json<DataResponse<Vec<ResourceView>>>> {
    let status = parse_status_filter(params.status.as_deref())?;
    let resources = ResourceRepo::list(&state.pool, &params, status.map(ResourceStatus::id))
        .await
        .map_err(AppError::Database)?;

    Ok(Json(DataResponse::new(
        resources.into_iter().map(ResourceView::from).collect(),
    )))
}

/// POST /resources
pub async fn create_resource(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateResource>,
) -> AppResult<(StatusCode, Json<DataResponse<ResourceView>>)> {
    user.require_admin()?;
    input.validate()?;

    let priority = parse_priority(input.priority.as_deref())?.unwrap_or(Priority::Medium);
    let resource = ResourceRepo::create(&state.pool, &input, priority)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(resource_id = resource.id, name = %resource.name, "resource created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(ResourceView::from(resource))),
    ))
}

/// GET /resources/{id}
pub async fn get_resource(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ResourceDetail>>> {
    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::Database)?
        .ok_or(CoreError::NotFound {
            entity: "Resource",
            id,
        })?;

    let deployment_history = DeploymentRepo::list_for_resource(&state.pool, id)
        .await
        .map_err(AppError::Database)?;

    Ok(Json(DataResponse::new(ResourceDetail {
        resource: ResourceView::from(resource),
        deployment_history,
    })))
}

/// PUT /resources/{id}
pub async fn update_resource(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateResource>,
) -> AppResult<Json<DataResponse<ResourceView>>> {
    user.require_admin()?;
    input.validate()?;

    let status = parse_manual_status(input.status.as_deref())?;
    let priority = parse_priority(input.priority.as_deref())?;

    let resource = ResourceRepo::update(&state.pool, id, &input, status, priority).await?;

    Ok(Json(DataResponse::new(ResourceView::from(resource))))
}

/// DELETE /resources/{id}
pub async fn delete_resource(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require_admin()?;

    let deleted = ResourceRepo::delete(&state.pool, id)
        .await
        .map_err(AppError::Database)?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Resource",
            id,
        }
        .into());
    }

    tracing::info!(resource_id = id, "resource deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Allocation lifecycle
// ============================================================================

/// POST /resources/{id}/allocate
pub async fn allocate_resource(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AllocateRequest>,
) -> AppResult<Json<DataResponse<AllocationResponse>>> {
    input.validate()?;

    let disaster = DisasterRepo::resolve(&state.pool, &input.disaster_id)
        .await
        .map_err(AppError::Database)?
        .ok_or_else(|| {
            AppError::BadRequest(format!("Unknown disaster '{}'", input.disaster_id))
        })?;

    let (resource, deployment) = ResourceRepo::allocate(&state.pool, id, disaster.id, &input).await?;

    tracing::info!(
        resource_id = id,
        disaster_id = disaster.id,
        quantity = input.quantity,
        deployment_id = deployment.id,
        user_id = user.user_id,
        "resource allocated"
    );

    Ok(Json(DataResponse::new(AllocationResponse {
        allocated_quantity: deployment.quantity_deployed,
        remaining_available: resource.quantity().available(),
        deployment_id: deployment.id,
        disaster_id: disaster.id,
        disaster_code: disaster.code,
        status: resource.status().as_str(),
    })))
}

/// POST /resources/{id}/reserve
pub async fn reserve_resource(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReserveRequest>,
) -> AppResult<Json<DataResponse<ReservationResponse>>> {
    input.validate()?;

    let resource = ResourceRepo::reserve(&state.pool, id, &input).await?;

    tracing::info!(
        resource_id = id,
        quantity = input.quantity,
        user_id = user.user_id,
        "resource reserved"
    );

    Ok(Json(DataResponse::new(ReservationResponse {
        reserved_quantity: input.quantity,
        total_reserved: resource.quantity_reserved,
        remaining_available: resource.quantity().available(),
        reserved_until: resource.reserved_until,
        status: resource.status().as_str(),
    })))
}

/// POST /resources/{id}/release
pub async fn release_resource(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReleaseRequest>,
) -> AppResult<Json<DataResponse<ReleaseResponse>>> {
    input.validate()?;

    let resource = ResourceRepo::release(&state.pool, id, input.quantity).await?;

    tracing::info!(
        resource_id = id,
        quantity = input.quantity,
        user_id = user.user_id,
        "reservation released"
    );

    Ok(Json(DataResponse::new(ReleaseResponse {
        total_reserved: resource.quantity_reserved,
        remaining_available: resource.quantity().available(),
        status: resource.status().as_str(),
    })))
}

/// POST /resources/{id}/complete-deployment
pub async fn complete_deployment(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CompleteDeploymentRequest>,
) -> AppResult<Json<DataResponse<CompletionResponse>>> {
    input.validate()?;

    let (resource, deployment) = ResourceRepo::complete_deployment(
        &state.pool,
        id,
        input.deployment_id,
        input.actual_duration_mins,
        input.notes.as_deref(),
    )
    .await?;

    tracing::info!(
        resource_id = id,
        deployment_id = deployment.id,
        user_id = user.user_id,
        "deployment completed"
    );

    Ok(Json(DataResponse::new(CompletionResponse {
        deployment,
        remaining_available: resource.quantity().available(),
        status: resource.status().as_str(),
    })))
}

// ============================================================================
// Recommendation
// ============================================================================

/// GET /resources/{id}/recommendation?demand=N
pub async fn recommendation(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<DataResponse<RecommendationResponse>>> {
    if params.demand < 1 {
        return Err(AppError::BadRequest("demand must be at least 1".into()));
    }

    let resource = ResourceRepo::find_by_id(&state.pool, id)
        .await
        .map_err(AppError::Database)?
        .ok_or(CoreError::NotFound {
            entity: "Resource",
            id,
        })?;

    let available = resource.quantity().available();
    let priority = resource.priority();

    Ok(Json(DataResponse::new(RecommendationResponse {
        resource_id: id,
        available,
        demand: params.demand,
        priority: priority.as_str(),
        recommendation: recommend(available, params.demand, priority),
    })))
}
