//! Integration tests for the allocation/reservation/completion flow at the
//! repository layer, against a real database:
//! - Counter arithmetic and deployment history writes
//! - Capacity rejections leaving rows untouched
//! - Overlapping allocations racing for the same stock
//! - Completion clamping and double-completion conflicts
//! - Disaster resolution by id and by code

use assert_matches::assert_matches;
use sqlx::PgPool;

use relief_core::error::CoreError;
use relief_core::status::{DeploymentStatus, Priority, ResourceStatus};
use relief_db::models::disaster::CreateDisaster;
use relief_db::models::resource::{AllocateRequest, CreateResource, ReserveRequest};
use relief_db::repositories::{
    DeploymentRepo, DisasterRepo, RepoError, ResourceRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_resource(name: &str, current: i32) -> CreateResource {
    CreateResource {
        name: name.to_string(),
        resource_type: "medical".to_string(),
        category: "supplies".to_string(),
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

fn new_disaster(code: &str) -> CreateDisaster {
    CreateDisaster {
        code: code.to_string(),
        name: "Kelani river flood".to_string(),
        severity: None,
        lat: 6.95,
        lng: 79.88,
    }
}

fn allocate_request(quantity: i32, disaster: &str) -> AllocateRequest {
    AllocateRequest {
        quantity,
        disaster_id: disaster.to_string(),
        location: Some("Kaduwela camp".to_string()),
        estimated_duration_mins: Some(240),
        notes: None,
    }
}

// ---------------------------------------------------------------------------
// Allocation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn allocation_increments_counter_and_appends_history(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-001"), Priority::High)
        .await
        .unwrap();
    let resource = ResourceRepo::create(&pool, &new_resource("Water purifiers", 100), Priority::Medium)
        .await
        .unwrap();

    let (updated, deployment) =
        ResourceRepo::allocate(&pool, resource.id, disaster.id, &allocate_request(30, "FLOOD-001"))
            .await
            .unwrap();

    assert_eq!(updated.quantity_allocated, 30);
    assert_eq!(updated.quantity().available(), 70);
    assert_eq!(updated.status(), ResourceStatus::Dispatched);

    assert_eq!(deployment.resource_id, resource.id);
    assert_eq!(deployment.disaster_id, disaster.id);
    assert_eq!(deployment.quantity_deployed, 30);
    assert_eq!(deployment.status(), DeploymentStatus::Deployed);
    assert!(deployment.completed_at.is_none());

    let history = DeploymentRepo::list_for_resource(&pool, resource.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, deployment.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn over_capacity_allocation_is_rejected_without_mutation(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-002"), Priority::High)
        .await
        .unwrap();
    let resource = ResourceRepo::create(&pool, &new_resource("Tents", 100), Priority::Medium)
        .await
        .unwrap();

    ResourceRepo::allocate(&pool, resource.id, disaster.id, &allocate_request(30, "FLOOD-002"))
        .await
        .unwrap();

    // Second allocation exceeds the remaining 70.
    let err = ResourceRepo::allocate(&pool, resource.id, disaster.id, &allocate_request(80, "FLOOD-002"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::InsufficientCapacity {
            requested: 80,
            available: 70
        })
    );

    // Stored row unmodified by the rejection.
    let stored = ResourceRepo::find_by_id(&pool, resource.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity_allocated, 30);
    assert_eq!(stored.quantity().available(), 70);

    // And no second history entry appeared.
    let history = DeploymentRepo::list_for_resource(&pool, resource.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn overlapping_allocations_cannot_oversubscribe(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-009"), Priority::High)
        .await
        .unwrap();
    let resource = ResourceRepo::create(&pool, &new_resource("Water bowsers", 100), Priority::High)
        .await
        .unwrap();

    // Two in-flight allocations of 60 against a stock of 100. The row lock
    // serializes the transactions, so whichever commits second sees only 40
    // available regardless of which task started first.
    let spawn_allocate = |pool: PgPool| {
        let (resource_id, disaster_id) = (resource.id, disaster.id);
        tokio::spawn(async move {
            ResourceRepo::allocate(
                &pool,
                resource_id,
                disaster_id,
                &allocate_request(60, "FLOOD-009"),
            )
            .await
        })
    };
    let first = spawn_allocate(pool.clone());
    let second = spawn_allocate(pool.clone());
    let (first, second) = (first.await.unwrap(), second.await.unwrap());

    let err = match (first, second) {
        (Ok(_), Err(e)) | (Err(e), Ok(_)) => e,
        (a, b) => panic!("expected exactly one winner, got {a:?} and {b:?}"),
    };
    assert_matches!(
        err,
        RepoError::Core(CoreError::InsufficientCapacity {
            requested: 60,
            available: 40
        })
    );

    let stored = ResourceRepo::find_by_id(&pool, resource.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity_allocated, 60);
    assert!(stored.quantity_allocated + stored.quantity_reserved <= stored.quantity_current);

    // Only the winning allocation left a deployment behind.
    let history = DeploymentRepo::list_for_resource(&pool, resource.id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn allocating_everything_depletes_the_resource(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-003"), Priority::Critical)
        .await
        .unwrap();
    let resource = ResourceRepo::create(&pool, &new_resource("Generators", 5), Priority::Critical)
        .await
        .unwrap();

    let (updated, _) =
        ResourceRepo::allocate(&pool, resource.id, disaster.id, &allocate_request(5, "FLOOD-003"))
            .await
            .unwrap();

    assert_eq!(updated.quantity().available(), 0);
    assert_eq!(updated.status(), ResourceStatus::Depleted);
}

#[sqlx::test(migrations = "./migrations")]
async fn allocation_against_missing_resource_is_not_found(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-004"), Priority::Low)
        .await
        .unwrap();

    let err = ResourceRepo::allocate(&pool, 9999, disaster.id, &allocate_request(1, "FLOOD-004"))
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::NotFound { entity: "Resource", .. }));
}

// ---------------------------------------------------------------------------
// Reservation / release
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn reservation_holds_quantity_without_history(pool: PgPool) {
    let resource = ResourceRepo::create(&pool, &new_resource("Blankets", 200), Priority::Low)
        .await
        .unwrap();

    let updated = ResourceRepo::reserve(
        &pool,
        resource.id,
        &ReserveRequest {
            quantity: 50,
            reason: Some("staging for cyclone season".to_string()),
            reserved_until: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.quantity_reserved, 50);
    assert_eq!(updated.quantity().available(), 150);
    assert_eq!(updated.status(), ResourceStatus::Reserved);

    let history = DeploymentRepo::list_for_resource(&pool, resource.id)
        .await
        .unwrap();
    assert!(history.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn reservation_counts_against_allocation_capacity(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-005"), Priority::High)
        .await
        .unwrap();
    let resource = ResourceRepo::create(&pool, &new_resource("Fuel drums", 100), Priority::High)
        .await
        .unwrap();

    ResourceRepo::reserve(
        &pool,
        resource.id,
        &ReserveRequest {
            quantity: 60,
            reason: None,
            reserved_until: None,
        },
    )
    .await
    .unwrap();

    let err = ResourceRepo::allocate(&pool, resource.id, disaster.id, &allocate_request(50, "FLOOD-005"))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::InsufficientCapacity { available: 40, .. })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn release_returns_reserved_quantity_clamped(pool: PgPool) {
    let resource = ResourceRepo::create(&pool, &new_resource("Ration packs", 100), Priority::Medium)
        .await
        .unwrap();

    ResourceRepo::reserve(
        &pool,
        resource.id,
        &ReserveRequest {
            quantity: 20,
            reason: None,
            reserved_until: None,
        },
    )
    .await
    .unwrap();

    // Release more than is held; the counter clamps at zero.
    let updated = ResourceRepo::release(&pool, resource.id, 35).await.unwrap();
    assert_eq!(updated.quantity_reserved, 0);
    assert_eq!(updated.status(), ResourceStatus::Available);
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn completion_returns_deployed_quantity(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-006"), Priority::High)
        .await
        .unwrap();
    let resource = ResourceRepo::create(&pool, &new_resource("Pumps", 10), Priority::High)
        .await
        .unwrap();

    let (_, deployment) =
        ResourceRepo::allocate(&pool, resource.id, disaster.id, &allocate_request(10, "FLOOD-006"))
            .await
            .unwrap();

    let (updated, completed) = ResourceRepo::complete_deployment(
        &pool,
        resource.id,
        deployment.id,
        Some(300),
        Some("returned in working order"),
    )
    .await
    .unwrap();

    assert_eq!(updated.quantity_allocated, 0);
    assert_eq!(updated.status(), ResourceStatus::Available);
    assert_eq!(completed.status(), DeploymentStatus::Completed);
    assert_eq!(completed.actual_duration_mins, Some(300));
    assert!(completed.completed_at.is_some());
}

#[sqlx::test(migrations = "./migrations")]
async fn double_completion_is_a_conflict(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-007"), Priority::Medium)
        .await
        .unwrap();
    let resource = ResourceRepo::create(&pool, &new_resource("Radios", 50), Priority::Medium)
        .await
        .unwrap();

    let (_, deployment) =
        ResourceRepo::allocate(&pool, resource.id, disaster.id, &allocate_request(20, "FLOOD-007"))
            .await
            .unwrap();

    ResourceRepo::complete_deployment(&pool, resource.id, deployment.id, None, None)
        .await
        .unwrap();

    let err = ResourceRepo::complete_deployment(&pool, resource.id, deployment.id, None, None)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Conflict(_)));

    // The counter was only decremented once.
    let stored = ResourceRepo::find_by_id(&pool, resource.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.quantity_allocated, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn completing_unknown_deployment_is_not_found(pool: PgPool) {
    let resource = ResourceRepo::create(&pool, &new_resource("Boats", 5), Priority::Critical)
        .await
        .unwrap();

    let err = ResourceRepo::complete_deployment(&pool, resource.id, 424242, None, None)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        RepoError::Core(CoreError::NotFound { entity: "Deployment", .. })
    );
}

// ---------------------------------------------------------------------------
// Disaster resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn disaster_resolves_by_id_and_by_code(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("CYCLONE-2026-01"), Priority::Critical)
        .await
        .unwrap();

    let by_id = DisasterRepo::resolve(&pool, &disaster.id.to_string())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id.id, disaster.id);

    let by_code = DisasterRepo::resolve(&pool, "CYCLONE-2026-01")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_code.id, disaster.id);

    let missing = DisasterRepo::resolve(&pool, "NO-SUCH-CODE").await.unwrap();
    assert!(missing.is_none());
}

// ---------------------------------------------------------------------------
// Stock update guard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn stock_cannot_drop_below_committed_level(pool: PgPool) {
    let disaster = DisasterRepo::create(&pool, &new_disaster("FLOOD-008"), Priority::High)
        .await
        .unwrap();
    let resource = ResourceRepo::create(&pool, &new_resource("Stretchers", 100), Priority::Medium)
        .await
        .unwrap();

    ResourceRepo::allocate(&pool, resource.id, disaster.id, &allocate_request(40, "FLOOD-008"))
        .await
        .unwrap();

    let input = relief_db::models::resource::UpdateResource {
        name: None,
        resource_type: None,
        category: None,
        quantity_current: Some(30),
        lat: None,
        lng: None,
        address: None,
        status: None,
        priority: None,
        specifications: None,
        vendor_info: None,
        supply_chain: None,
    };
    let err = ResourceRepo::update(&pool, resource.id, &input, None, None)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Validation(_)));
}
