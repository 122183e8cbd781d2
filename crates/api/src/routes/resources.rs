//! Route definitions for the resource inventory.
//!
//! Mounted at `/resources`. The aggregate paths come before `/{id}` so the
//! literal segments are not swallowed by the id matcher.
//!
//! ```text
//! GET    /                            list_resources
//! POST   /                            create_resource (admin)
//! GET    /inventory/summary           inventory_summary
//! GET    /dashboard/metrics           dashboard_metrics
//! GET    /stats                       deployment_stats
//! GET    /{id}                        get_resource (with history)
//! PUT    /{id}                        update_resource (admin)
//! DELETE /{id}                        delete_resource (admin)
//! POST   /{id}/allocate               allocate_resource
//! POST   /{id}/reserve                reserve_resource
//! POST   /{id}/release                release_resource
//! POST   /{id}/complete-deployment    complete_deployment
//! GET    /{id}/recommendation         recommendation (?demand=N)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{reporting, resources};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(resources::list_resources).post(resources::create_resource),
        )
        .route("/inventory/summary", get(reporting::inventory_summary))
        .route("/dashboard/metrics", get(reporting::dashboard_metrics))
        .route("/stats", get(reporting::deployment_stats))
        .route(
            "/{id}",
            get(resources::get_resource)
                .put(resources::update_resource)
                .delete(resources::delete_resource),
        )
        .route("/{id}/allocate", post(resources::allocate_resource))
        .route("/{id}/reserve", post(resources::reserve_resource))
        .route("/{id}/release", post(resources::release_resource))
        .route(
            "/{id}/complete-deployment",
            post(resources::complete_deployment),
        )
        .route("/{id}/recommendation", get(resources::recommendation))
}
