//! Repository for the `resources` table and its quantity-mutating
//! operations.
//!
//! Allocation, reservation, release, and completion all follow the same
//! shape: begin a transaction, lock the resource row with `FOR UPDATE`,
//! run the pure bookkeeping from `relief_core::quantity`, persist the new
//! counters and derived status, and commit. The conditional `WHERE` guard
//! on the update restates the capacity check at the store level.

use sqlx::PgPool;

use relief_core::error::CoreError;
use relief_core::quantity::{
    status_after_allocation, status_after_reservation, status_after_return,
};
use relief_core::status::{DeploymentStatus, Priority, ResourceStatus, StatusId};
use relief_core::types::DbId;

use crate::models::deployment::Deployment;
use crate::models::resource::{
    AllocateRequest, CreateResource, Resource, ResourceListQuery, ReserveRequest, UpdateResource,
};

use super::deployment_repo::DEPLOYMENT_COLUMNS;
use super::RepoError;

/// Column list for `resources` queries.
pub(crate) const COLUMNS: &str = "\
    id, name, resource_type, category, \
    quantity_current, quantity_allocated, quantity_reserved, \
    lat, lng, address, status_id, priority_id, reserved_until, \
    specifications, vendor_info, supply_chain, created_at, updated_at";

/// Maximum page size for resource listing.
const MAX_LIMIT: i64 = 200;

/// Default page size for resource listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD and allocation operations for relief resources.
pub struct ResourceRepo;

impl ResourceRepo {
    /// Insert a new resource. Counters start at zero allocated/reserved.
    pub async fn create(
        pool: &PgPool,
        input: &CreateResource,
        priority: Priority,
    ) -> Result<Resource, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources \
                 (name, resource_type, category, quantity_current, lat, lng, address, \
                  priority_id, specifications, vendor_info, supply_chain) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Resource>(&query)
            .bind(&input.name)
            .bind(&input.resource_type)
            .bind(&input.category)
            .bind(input.quantity_current)
            .bind(input.lat)
            .bind(input.lng)
            .bind(&input.address)
            .bind(priority.id())
            .bind(&input.specifications)
            .bind(&input.vendor_info)
            .bind(&input.supply_chain)
            .fetch_one(pool)
            .await
    }

    /// Find a resource by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Resource>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List resources with optional type/category/status filters and
    /// pagination.
    pub async fn list(
        pool: &PgPool,
        params: &ResourceListQuery,
        status_id: Option<StatusId>,
    ) -> Result<Vec<Resource>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Build the WHERE clause and track the next bind parameter index.
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx: u32 = 1;

        if params.resource_type.is_some() {
            conditions.push(format!("resource_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.category.is_some() {
            conditions.push(format!("category = ${bind_idx}"));
            bind_idx += 1;
        }
        if status_id.is_some() {
            conditions.push(format!("status_id = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM resources \
             {where_clause} \
             ORDER BY name ASC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Resource>(&query);

        if let Some(rt) = &params.resource_type {
            q = q.bind(rt);
        }
        if let Some(cat) = &params.category {
            q = q.bind(cat);
        }
        if let Some(sid) = status_id {
            q = q.bind(sid);
        }

        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Update descriptive fields and/or the stock level.
    ///
    /// Dropping `quantity_current` below the committed (allocated + reserved)
    /// level is a validation error; the row lock makes the check reliable.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateResource,
        status: Option<ResourceStatus>,
        priority: Option<Priority>,
    ) -> Result<Resource, RepoError> {
        let mut tx = pool.begin().await?;

        let existing = Self::lock_row(&mut tx, id).await?;

        if let Some(new_current) = input.quantity_current {
            let committed = existing.quantity_allocated + existing.quantity_reserved;
            if new_current < committed {
                return Err(CoreError::Validation(format!(
                    "quantity_current {new_current} is below the committed level {committed}"
                ))
                .into());
            }
        }

        let query = format!(
            "UPDATE resources SET \
                 name = $2, resource_type = $3, category = $4, quantity_current = $5, \
                 lat = $6, lng = $7, address = $8, status_id = $9, priority_id = $10, \
                 specifications = $11, vendor_info = $12, supply_chain = $13, \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(input.name.as_ref().unwrap_or(&existing.name))
            .bind(
                input
                    .resource_type
                    .as_ref()
                    .unwrap_or(&existing.resource_type),
            )
            .bind(input.category.as_ref().unwrap_or(&existing.category))
            .bind(input.quantity_current.unwrap_or(existing.quantity_current))
            .bind(input.lat.unwrap_or(existing.lat))
            .bind(input.lng.unwrap_or(existing.lng))
            .bind(input.address.as_ref().or(existing.address.as_ref()))
            .bind(status.map(ResourceStatus::id).unwrap_or(existing.status_id))
            .bind(priority.map(Priority::id).unwrap_or(existing.priority_id))
            .bind(input.specifications.as_ref().or(existing.specifications.as_ref()))
            .bind(input.vendor_info.as_ref().or(existing.vendor_info.as_ref()))
            .bind(input.supply_chain.as_ref().or(existing.supply_chain.as_ref()))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a resource (cascades to its deployment history).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Commit quantity to a disaster deployment.
    ///
    /// On success the resource counters, derived status, and the new
    /// deployment row are all persisted in one transaction; a capacity
    /// rejection leaves the stored row untouched.
    pub async fn allocate(
        pool: &PgPool,
        resource_id: DbId,
        disaster_id: DbId,
        input: &AllocateRequest,
    ) -> Result<(Resource, Deployment), RepoError> {
        let mut tx = pool.begin().await?;

        let resource = Self::lock_row(&mut tx, resource_id).await?;
        let after = resource.quantity().allocate(input.quantity)?;
        let status = status_after_allocation(after, resource.status());

        let updated = Self::store_counters(&mut tx, resource_id, after.allocated, after.reserved, status, input.quantity)
            .await?;

        let query = format!(
            "INSERT INTO deployments \
                 (resource_id, disaster_id, location_name, quantity_deployed, \
                  status_id, estimated_duration_mins, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {DEPLOYMENT_COLUMNS}"
        );
        let deployment = sqlx::query_as::<_, Deployment>(&query)
            .bind(resource_id)
            .bind(disaster_id)
            .bind(&input.location)
            .bind(input.quantity)
            .bind(DeploymentStatus::Deployed.id())
            .bind(input.estimated_duration_mins)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((updated, deployment))
    }

    /// Soft-hold quantity without a deployment. Stores `reserved_until`
    /// when given; nothing schedules against it.
    pub async fn reserve(
        pool: &PgPool,
        resource_id: DbId,
        input: &ReserveRequest,
    ) -> Result<Resource, RepoError> {
        let mut tx = pool.begin().await?;

        let resource = Self::lock_row(&mut tx, resource_id).await?;
        let after = resource.quantity().reserve(input.quantity)?;
        let status = status_after_reservation(after, resource.status());

        let query = format!(
            "UPDATE resources \
             SET quantity_reserved = $2, status_id = $3, \
                 reserved_until = COALESCE($4, reserved_until), updated_at = NOW() \
             WHERE id = $1 \
               AND quantity_current - quantity_allocated - quantity_reserved >= $5 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Resource>(&query)
            .bind(resource_id)
            .bind(after.reserved)
            .bind(status.id())
            .bind(input.reserved_until)
            .bind(input.quantity)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Return reserved quantity to the pool, clamped at zero.
    pub async fn release(
        pool: &PgPool,
        resource_id: DbId,
        quantity: i32,
    ) -> Result<Resource, RepoError> {
        let mut tx = pool.begin().await?;

        let resource = Self::lock_row(&mut tx, resource_id).await?;
        let after = resource.quantity().release_reserved(quantity)?;
        let status = status_after_return(after, resource.status());

        let query = format!(
            "UPDATE resources \
             SET quantity_reserved = $2, status_id = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Resource>(&query)
            .bind(resource_id)
            .bind(after.reserved)
            .bind(status.id())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Close out a deployment: mark it completed, record the actual
    /// duration, and return its quantity to the pool (clamped at zero).
    ///
    /// Completing an already-completed deployment is a conflict; the
    /// counters are only decremented once.
    pub async fn complete_deployment(
        pool: &PgPool,
        resource_id: DbId,
        deployment_id: DbId,
        actual_duration_mins: Option<i32>,
        notes: Option<&str>,
    ) -> Result<(Resource, Deployment), RepoError> {
        let mut tx = pool.begin().await?;

        // Lock the resource first so completion serializes with allocation.
        let resource = Self::lock_row(&mut tx, resource_id).await?;

        let query = format!(
            "SELECT {DEPLOYMENT_COLUMNS} FROM deployments \
             WHERE id = $1 AND resource_id = $2"
        );
        let deployment = sqlx::query_as::<_, Deployment>(&query)
            .bind(deployment_id)
            .bind(resource_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Deployment",
                id: deployment_id,
            })?;

        if deployment.status() == DeploymentStatus::Completed {
            return Err(CoreError::Conflict(format!(
                "Deployment {deployment_id} is already completed"
            ))
            .into());
        }

        let query = format!(
            "UPDATE deployments \
             SET status_id = $2, completed_at = NOW(), \
                 actual_duration_mins = COALESCE($3, \
                     (EXTRACT(EPOCH FROM NOW() - deployed_at) / 60)::INTEGER), \
                 notes = COALESCE($4, notes) \
             WHERE id = $1 \
             RETURNING {DEPLOYMENT_COLUMNS}"
        );
        let completed = sqlx::query_as::<_, Deployment>(&query)
            .bind(deployment_id)
            .bind(DeploymentStatus::Completed.id())
            .bind(actual_duration_mins)
            .bind(notes)
            .fetch_one(&mut *tx)
            .await?;

        let after = resource
            .quantity()
            .complete_deployment(deployment.quantity_deployed);
        let status = status_after_return(after, resource.status());

        let query = format!(
            "UPDATE resources \
             SET quantity_allocated = $2, status_id = $3, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Resource>(&query)
            .bind(resource_id)
            .bind(after.allocated)
            .bind(status.id())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((updated, completed))
    }

    /// `SELECT ... FOR UPDATE` a resource row inside a transaction.
    async fn lock_row(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<Resource, RepoError> {
        let query = format!("SELECT {COLUMNS} FROM resources WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| {
                CoreError::NotFound {
                    entity: "Resource",
                    id,
                }
                .into()
            })
    }

    /// Persist new counters and status with the store-level capacity guard.
    ///
    /// The guard re-checks `available >= requested` in SQL; under the row
    /// lock it cannot fail, but it keeps the conditional-update discipline
    /// visible in the statement itself.
    async fn store_counters(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        allocated: i32,
        reserved: i32,
        status: ResourceStatus,
        requested: i32,
    ) -> Result<Resource, RepoError> {
        let query = format!(
            "UPDATE resources \
             SET quantity_allocated = $2, quantity_reserved = $3, status_id = $4, \
                 updated_at = NOW() \
             WHERE id = $1 \
               AND quantity_current - quantity_allocated - quantity_reserved >= $5 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Resource>(&query)
            .bind(id)
            .bind(allocated)
            .bind(reserved)
            .bind(status.id())
            .bind(requested)
            .fetch_one(&mut **tx)
            .await?;
        Ok(updated)
    }
}
