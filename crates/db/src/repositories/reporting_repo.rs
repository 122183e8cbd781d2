//! Read-only aggregation queries for the reporting endpoints.
//!
//! The MongoDB aggregation pipelines of the original system become plain
//! GROUP BY queries here. Each call is a point-in-time snapshot.

use sqlx::PgPool;

use relief_core::status::DeploymentStatus;

use crate::models::reporting::{
    CategoryCount, DashboardMetrics, DeploymentStats, InventorySummaryRow, InventoryTotals,
    StatusCount,
};

/// Window for the "recent deployments" dashboard figure.
const RECENT_WINDOW_DAYS: i32 = 30;

/// SQL expression for a group's utilization rate with the zero-stock guard.
const UTILIZATION_EXPR: &str = "\
    CASE WHEN COALESCE(SUM(quantity_current), 0) > 0 \
         THEN SUM(quantity_allocated + quantity_reserved)::DOUBLE PRECISION \
              / SUM(quantity_current)::DOUBLE PRECISION * 100.0 \
         ELSE 0.0 END";

pub struct ReportingRepo;

impl ReportingRepo {
    /// Inventory summary grouped by resource type.
    pub async fn inventory_summary(
        pool: &PgPool,
    ) -> Result<Vec<InventorySummaryRow>, sqlx::Error> {
        let query = format!(
            "SELECT resource_type, \
                    COUNT(*) AS resource_count, \
                    COALESCE(SUM(quantity_current), 0)::BIGINT AS total_current, \
                    COALESCE(SUM(quantity_allocated), 0)::BIGINT AS total_allocated, \
                    COALESCE(SUM(quantity_reserved), 0)::BIGINT AS total_reserved, \
                    COALESCE(SUM(quantity_current - quantity_allocated - quantity_reserved), 0)::BIGINT \
                        AS total_available, \
                    {UTILIZATION_EXPR} AS utilization_rate \
             FROM resources \
             GROUP BY resource_type \
             ORDER BY resource_type"
        );
        sqlx::query_as::<_, InventorySummaryRow>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fleet totals plus per-category and per-status breakdowns.
    pub async fn dashboard_metrics(pool: &PgPool) -> Result<DashboardMetrics, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) AS resource_count, \
                    COALESCE(SUM(quantity_current), 0)::BIGINT AS total_current, \
                    COALESCE(SUM(quantity_allocated), 0)::BIGINT AS total_allocated, \
                    COALESCE(SUM(quantity_reserved), 0)::BIGINT AS total_reserved, \
                    COALESCE(SUM(quantity_current - quantity_allocated - quantity_reserved), 0)::BIGINT \
                        AS total_available, \
                    {UTILIZATION_EXPR} AS utilization_rate \
             FROM resources"
        );
        let totals = sqlx::query_as::<_, InventoryTotals>(&query)
            .fetch_one(pool)
            .await?;

        let by_category = sqlx::query_as::<_, CategoryCount>(
            "SELECT category, \
                    COUNT(*) AS resource_count, \
                    COALESCE(SUM(quantity_current - quantity_allocated - quantity_reserved), 0)::BIGINT \
                        AS total_available \
             FROM resources \
             GROUP BY category \
             ORDER BY category",
        )
        .fetch_all(pool)
        .await?;

        let by_status = sqlx::query_as::<_, StatusCount>(
            "SELECT s.name AS status, COUNT(r.id) AS resource_count \
             FROM resources r \
             JOIN resource_statuses s ON s.id = r.status_id \
             GROUP BY s.name \
             ORDER BY s.name",
        )
        .fetch_all(pool)
        .await?;

        Ok(DashboardMetrics {
            totals,
            by_category,
            by_status,
        })
    }

    /// Deployment statistics: counts, recency, mean duration, success rate.
    pub async fn deployment_stats(pool: &PgPool) -> Result<DeploymentStats, sqlx::Error> {
        sqlx::query_as::<_, DeploymentStats>(
            "SELECT COUNT(*) AS total_deployments, \
                    COUNT(*) FILTER (WHERE status_id = $1) AS active_deployments, \
                    COUNT(*) FILTER (WHERE status_id = $2) AS completed_deployments, \
                    COUNT(*) FILTER (WHERE deployed_at > NOW() - ($3 || ' days')::INTERVAL) \
                        AS recent_deployments, \
                    AVG(actual_duration_mins) FILTER (WHERE status_id = $2) \
                        ::DOUBLE PRECISION AS avg_actual_duration_mins, \
                    CASE WHEN COUNT(*) > 0 \
                         THEN COUNT(*) FILTER (WHERE status_id = $2)::DOUBLE PRECISION \
                              / COUNT(*)::DOUBLE PRECISION * 100.0 \
                         ELSE 0.0 END AS success_rate \
             FROM deployments",
        )
        .bind(DeploymentStatus::Deployed.id())
        .bind(DeploymentStatus::Completed.id())
        .bind(RECENT_WINDOW_DAYS.to_string())
        .fetch_one(pool)
        .await
    }
}
