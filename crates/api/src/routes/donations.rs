//! Route definitions for donations.
//!
//! Mounted at `/donations`. `confirm` is the payment gateway callback and
//! is public; the aggregates require an admin token.
//!
//! ```text
//! POST /confirm          confirm_donation (public, idempotent per orderId)
//! GET  /donor/{email}    donor_history (admin)
//! GET  /stats            donation_stats (admin)
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::donations;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/confirm", post(donations::confirm_donation))
        .route("/donor/{email}", get(donations::donor_history))
        .route("/stats", get(donations::donation_stats))
}
