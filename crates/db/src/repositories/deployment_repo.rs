//! Read access to the `deployments` table. Writes happen through
//! `ResourceRepo` so they share the resource row lock.

use sqlx::PgPool;

use relief_core::types::DbId;

use crate::models::deployment::Deployment;

/// Column list for `deployments` queries.
pub(crate) const DEPLOYMENT_COLUMNS: &str = "\
    id, resource_id, disaster_id, location_name, quantity_deployed, \
    status_id, deployed_at, completed_at, estimated_duration_mins, \
    actual_duration_mins, notes";

pub struct DeploymentRepo;

impl DeploymentRepo {
    /// Find a deployment by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Deployment>, sqlx::Error> {
        let query = format!("SELECT {DEPLOYMENT_COLUMNS} FROM deployments WHERE id = $1");
        sqlx::query_as::<_, Deployment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Deployment history for a resource, most recent first.
    pub async fn list_for_resource(
        pool: &PgPool,
        resource_id: DbId,
    ) -> Result<Vec<Deployment>, sqlx::Error> {
        let query = format!(
            "SELECT {DEPLOYMENT_COLUMNS} FROM deployments \
             WHERE resource_id = $1 \
             ORDER BY deployed_at DESC, id DESC"
        );
        sqlx::query_as::<_, Deployment>(&query)
            .bind(resource_id)
            .fetch_all(pool)
            .await
    }
}
