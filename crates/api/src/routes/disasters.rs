//! Route definitions for the disaster registry.
//!
//! Mounted at `/disasters`.
//!
//! ```text
//! GET  /    list_disasters
//! POST /    create_disaster (admin)
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::disasters;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(disasters::list_disasters).post(disasters::create_disaster),
    )
}
