//! Route definitions for mobile authentication.
//!
//! Mounted at `/auth`.
//!
//! ```text
//! POST /mobile-login    mobile_login (public)
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/mobile-login", post(auth::mobile_login))
}
