//! Route definitions for citizen submissions.
//!
//! Mounted at the `/api/v1` root; both accept anonymous callers.
//!
//! ```text
//! POST /sos        create_sos
//! POST /reports    create_report
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::alerts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sos", post(alerts::create_sos))
        .route("/reports", post(alerts::create_report))
}
