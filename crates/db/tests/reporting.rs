//! Integration tests for the aggregation queries: inventory summary,
//! dashboard metrics, deployment stats, donation totals, and the map
//! overlay filters.

use sqlx::PgPool;

use relief_core::geo::BoundingBox;
use relief_core::status::{DonationStatus, Priority};
use relief_db::models::disaster::CreateDisaster;
use relief_db::models::donation::ConfirmDonation;
use relief_db::models::resource::{AllocateRequest, CreateResource, ReserveRequest};
use relief_db::models::sos::CreateSosAlert;
use relief_db::repositories::{
    DisasterRepo, DonationRepo, MapRepo, ReportingRepo, ResourceRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resource(name: &str, rtype: &str, category: &str, current: i32) -> CreateResource {
    CreateResource {
        name: name.to_string(),
        resource_type: rtype.to_string(),
        category: category.to_string(),
        quantity_current: current,
        lat: 6.9271,
        lng: 79.8612,
        address: None,
        priority: None,
        specifications: None,
        vendor_info: None,
        supply_chain: None,
    }
}

fn donation(order_id: &str, email: &str, amount: i64, status: &str) -> ConfirmDonation {
    ConfirmDonation {
        name: "A. Donor".to_string(),
        email: email.to_string(),
        phone: None,
        amount,
        order_id: order_id.to_string(),
        transaction_id: Some(format!("txn-{order_id}")),
        session_id: None,
        status: status.to_string(),
    }
}

async fn seed_disaster(pool: &PgPool, code: &str) -> relief_db::models::disaster::Disaster {
    DisasterRepo::create(
        pool,
        &CreateDisaster {
            code: code.to_string(),
            name: "Test disaster".to_string(),
            severity: None,
            lat: 7.0,
            lng: 80.0,
        },
        Priority::High,
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Inventory summary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn summary_groups_by_type_with_utilization(pool: PgPool) {
    let disaster = seed_disaster(&pool, "SUM-1").await;

    let medical = ResourceRepo::create(&pool, &resource("Kits", "medical", "supplies", 100), Priority::Medium)
        .await
        .unwrap();
    ResourceRepo::create(&pool, &resource("Beds", "medical", "equipment", 100), Priority::Medium)
        .await
        .unwrap();
    ResourceRepo::create(&pool, &resource("Trucks", "transport", "vehicles", 10), Priority::High)
        .await
        .unwrap();

    ResourceRepo::allocate(
        &pool,
        medical.id,
        disaster.id,
        &AllocateRequest {
            quantity: 30,
            disaster_id: "SUM-1".to_string(),
            location: None,
            estimated_duration_mins: None,
            notes: None,
        },
    )
    .await
    .unwrap();
    ResourceRepo::reserve(
        &pool,
        medical.id,
        &ReserveRequest {
            quantity: 20,
            reason: None,
            reserved_until: None,
        },
    )
    .await
    .unwrap();

    let summary = ReportingRepo::inventory_summary(&pool).await.unwrap();
    assert_eq!(summary.len(), 2);

    let medical_row = summary.iter().find(|r| r.resource_type == "medical").unwrap();
    assert_eq!(medical_row.resource_count, 2);
    assert_eq!(medical_row.total_current, 200);
    assert_eq!(medical_row.total_allocated, 30);
    assert_eq!(medical_row.total_reserved, 20);
    assert_eq!(medical_row.total_available, 150);
    // (30 + 20) / 200 * 100
    assert!((medical_row.utilization_rate - 25.0).abs() < 1e-9);

    let transport_row = summary.iter().find(|r| r.resource_type == "transport").unwrap();
    assert!((transport_row.utilization_rate - 0.0).abs() < 1e-9);
}

#[sqlx::test(migrations = "./migrations")]
async fn summary_zero_stock_group_reports_zero_not_nan(pool: PgPool) {
    ResourceRepo::create(&pool, &resource("Empty depot", "fuel", "supplies", 0), Priority::Low)
        .await
        .unwrap();

    let summary = ReportingRepo::inventory_summary(&pool).await.unwrap();
    let fuel = summary.iter().find(|r| r.resource_type == "fuel").unwrap();
    assert_eq!(fuel.total_current, 0);
    assert!((fuel.utilization_rate - 0.0).abs() < 1e-9);
    assert!(!fuel.utilization_rate.is_nan());
}

#[sqlx::test(migrations = "./migrations")]
async fn summary_is_idempotent_without_writes(pool: PgPool) {
    let disaster = seed_disaster(&pool, "SUM-2").await;
    let r = ResourceRepo::create(&pool, &resource("Kits", "medical", "supplies", 80), Priority::Medium)
        .await
        .unwrap();
    ResourceRepo::allocate(
        &pool,
        r.id,
        disaster.id,
        &AllocateRequest {
            quantity: 15,
            disaster_id: "SUM-2".to_string(),
            location: None,
            estimated_duration_mins: None,
            notes: None,
        },
    )
    .await
    .unwrap();

    let first = ReportingRepo::inventory_summary(&pool).await.unwrap();
    let second = ReportingRepo::inventory_summary(&pool).await.unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.resource_type, b.resource_type);
        assert_eq!(a.total_current, b.total_current);
        assert_eq!(a.total_allocated, b.total_allocated);
        assert_eq!(a.total_reserved, b.total_reserved);
        assert!((a.utilization_rate - b.utilization_rate).abs() < 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Deployment stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn deployment_stats_track_success_rate(pool: PgPool) {
    let disaster = seed_disaster(&pool, "STATS-1").await;
    let r = ResourceRepo::create(&pool, &resource("Pumps", "equipment", "flood", 100), Priority::High)
        .await
        .unwrap();

    let request = |q: i32| AllocateRequest {
        quantity: q,
        disaster_id: "STATS-1".to_string(),
        location: None,
        estimated_duration_mins: None,
        notes: None,
    };

    let (_, d1) = ResourceRepo::allocate(&pool, r.id, disaster.id, &request(10)).await.unwrap();
    ResourceRepo::allocate(&pool, r.id, disaster.id, &request(10)).await.unwrap();

    ResourceRepo::complete_deployment(&pool, r.id, d1.id, Some(120), None)
        .await
        .unwrap();

    let stats = ReportingRepo::deployment_stats(&pool).await.unwrap();
    assert_eq!(stats.total_deployments, 2);
    assert_eq!(stats.active_deployments, 1);
    assert_eq!(stats.completed_deployments, 1);
    assert_eq!(stats.recent_deployments, 2);
    assert!((stats.success_rate - 50.0).abs() < 1e-9);
    assert!((stats.avg_actual_duration_mins.unwrap() - 120.0).abs() < 1e-9);
}

#[sqlx::test(migrations = "./migrations")]
async fn deployment_stats_empty_table_is_all_zero(pool: PgPool) {
    let stats = ReportingRepo::deployment_stats(&pool).await.unwrap();
    assert_eq!(stats.total_deployments, 0);
    assert!((stats.success_rate - 0.0).abs() < 1e-9);
    assert!(stats.avg_actual_duration_mins.is_none());
}

// ---------------------------------------------------------------------------
// Donations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn donor_totals_cover_success_only(pool: PgPool) {
    DonationRepo::confirm(&pool, &donation("ord-1", "donor@example.org", 2500, "SUCCESS"), DonationStatus::Success)
        .await
        .unwrap();
    DonationRepo::confirm(&pool, &donation("ord-2", "donor@example.org", 900, "FAILED"), DonationStatus::Failed)
        .await
        .unwrap();
    DonationRepo::confirm(&pool, &donation("ord-3", "other@example.org", 100, "SUCCESS"), DonationStatus::Success)
        .await
        .unwrap();

    let totals = DonationRepo::donor_totals(&pool, "donor@example.org")
        .await
        .unwrap();
    assert_eq!(totals.donation_count, 1);
    assert_eq!(totals.total_amount, 2500);
    assert!((totals.average_donation - 2500.0).abs() < 1e-9);

    let history = DonationRepo::list_by_email(&pool, "donor@example.org")
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn reconfirming_an_order_moves_status_without_duplicating(pool: PgPool) {
    DonationRepo::confirm(&pool, &donation("ord-9", "d@example.org", 1000, "PENDING"), DonationStatus::Pending)
        .await
        .unwrap();
    let updated = DonationRepo::confirm(&pool, &donation("ord-9", "d@example.org", 1000, "SUCCESS"), DonationStatus::Success)
        .await
        .unwrap();

    assert_eq!(updated.status(), DonationStatus::Success);

    let stats = DonationRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total_donations, 1);
    assert_eq!(stats.success_count, 1);
    assert_eq!(stats.pending_count, 0);
    assert_eq!(stats.total_amount_success, 1000);
}

// ---------------------------------------------------------------------------
// Map overlays
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn sos_query_filters_by_bounding_box_and_status(pool: PgPool) {
    let inside = CreateSosAlert {
        lat: 6.93,
        lng: 79.86,
        message: Some("trapped by flood water".to_string()),
    };
    let outside = CreateSosAlert {
        lat: 9.66,
        lng: 80.02,
        message: None,
    };
    MapRepo::create_sos(&pool, None, &inside).await.unwrap();
    MapRepo::create_sos(&pool, None, &outside).await.unwrap();

    let bbox = BoundingBox {
        min_lat: 6.0,
        min_lng: 79.0,
        max_lat: 7.5,
        max_lng: 80.5,
    };
    let hits = MapRepo::active_sos(&pool, Some(&bbox)).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!((hits[0].lat - 6.93).abs() < 1e-9);

    let all = MapRepo::active_sos(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn heat_points_weight_sos_double(pool: PgPool) {
    MapRepo::create_sos(
        &pool,
        None,
        &CreateSosAlert {
            lat: 6.93,
            lng: 79.86,
            message: None,
        },
    )
    .await
    .unwrap();
    MapRepo::create_report(
        &pool,
        None,
        &relief_db::models::incident_report::CreateIncidentReport {
            report_type: "flooding".to_string(),
            description: None,
            lat: 6.94,
            lng: 79.87,
            severity: None,
        },
        Priority::High,
    )
    .await
    .unwrap();

    let points = MapRepo::heat_points(&pool, None).await.unwrap();
    assert_eq!(points.len(), 2);
    let total_weight: i64 = points.iter().map(|p| p.weight).sum();
    assert_eq!(total_weight, 3);
}
