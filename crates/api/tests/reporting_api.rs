//! Integration tests for the aggregation reporting endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get_auth, post_json_auth, responder_token, seed_disaster, seed_resource,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Test: inventory summary groups by resource type
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn inventory_summary_reflects_allocations(pool: PgPool) {
    let app = common::build_test_app(pool);
    let resource_id = seed_resource(&app, "Bottled water", 100, "medium").await;
    seed_disaster(&app, "FLOOD-2026-020").await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/resources/{resource_id}/allocate"),
        &responder_token(),
        &json!({ "quantity": 25, "disaster_id": "FLOOD-2026-020" }),
    )
    .await;

    let response = get_auth(
        app.clone(),
        "/api/v1/resources/inventory/summary",
        &responder_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row["resource_type"], "water");
    assert_eq!(row["total_current"], 100);
    assert_eq!(row["total_allocated"], 25);
    assert_eq!(row["total_available"], 75);
    assert_eq!(row["utilization_rate"], 25.0);

    // Reading the summary twice yields identical rows.
    let again = body_json(
        get_auth(
            app,
            "/api/v1/resources/inventory/summary",
            &responder_token(),
        )
        .await,
    )
    .await;
    assert_eq!(json, again);
}

// ---------------------------------------------------------------------------
// Test: dashboard metrics cover totals and breakdowns
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn dashboard_metrics_totals(pool: PgPool) {
    let app = common::build_test_app(pool);
    seed_resource(&app, "Bottled water", 60, "medium").await;
    seed_resource(&app, "Water purifiers", 40, "high").await;

    let response = get_auth(
        app,
        "/api/v1/resources/dashboard/metrics",
        &responder_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["totals"]["resource_count"], 2);
    assert_eq!(json["data"]["totals"]["total_current"], 100);
    assert_eq!(json["data"]["totals"]["total_available"], 100);
    assert_eq!(json["data"]["by_category"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["by_status"][0]["status"], "available");
}

// ---------------------------------------------------------------------------
// Test: deployment stats track completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn deployment_stats_success_rate(pool: PgPool) {
    let app = common::build_test_app(pool);
    let resource_id = seed_resource(&app, "Tarpaulins", 100, "medium").await;
    seed_disaster(&app, "STORM-2026-008").await;

    let first = body_json(
        post_json_auth(
            app.clone(),
            &format!("/api/v1/resources/{resource_id}/allocate"),
            &responder_token(),
            &json!({ "quantity": 10, "disaster_id": "STORM-2026-008" }),
        )
        .await,
    )
    .await;
    post_json_auth(
        app.clone(),
        &format!("/api/v1/resources/{resource_id}/allocate"),
        &responder_token(),
        &json!({ "quantity": 10, "disaster_id": "STORM-2026-008" }),
    )
    .await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/resources/{resource_id}/complete-deployment"),
        &responder_token(),
        &json!({ "deployment_id": first["data"]["deployment_id"], "actual_duration_mins": 45 }),
    )
    .await;

    let response = get_auth(app, "/api/v1/resources/stats", &responder_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["total_deployments"], 2);
    assert_eq!(json["data"]["active_deployments"], 1);
    assert_eq!(json["data"]["completed_deployments"], 1);
    assert_eq!(json["data"]["success_rate"], 50.0);
    assert_eq!(json["data"]["avg_actual_duration_mins"], 45.0);
}

// ---------------------------------------------------------------------------
// Test: stats endpoints are well-formed on an empty database
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_database_yields_zeroed_stats(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = body_json(
        get_auth(
            app.clone(),
            "/api/v1/resources/dashboard/metrics",
            &responder_token(),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["totals"]["resource_count"], 0);
    assert_eq!(json["data"]["totals"]["utilization_rate"], 0.0);

    let json = body_json(
        get_auth(app, "/api/v1/resources/stats", &responder_token()).await,
    )
    .await;
    assert_eq!(json["data"]["total_deployments"], 0);
    assert_eq!(json["data"]["success_rate"], 0.0);
}
