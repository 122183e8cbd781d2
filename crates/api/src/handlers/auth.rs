//! Mobile login handlers.
//!
//! Citizens authenticate with their national identity card number plus a
//! one-time passcode delivered out of band. The passcode is checked by the
//! configured [`IdentityProvider`]; on success the user row is created on
//! first login and a signed access token is returned.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use relief_db::models::user::User;
use relief_db::repositories::UserRepo;

use crate::auth::jwt;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct MobileLoginRequest {
    #[validate(length(min = 10, max = 12))]
    pub nic: String,
    #[validate(length(min = 4, max = 8))]
    pub otp: String,
}

#[derive(Debug, Serialize)]
pub struct MobileLoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
}

/// POST /auth/mobile-login
pub async fn mobile_login(
    State(state): State<AppState>,
    Json(input): Json<MobileLoginRequest>,
) -> AppResult<Json<DataResponse<MobileLoginResponse>>> {
    input.validate()?;

    let profile = state.identity.verify_otp(&input.nic, &input.otp).await?;

    // Role is preserved for returning users; only first login inserts a row.
    let user = UserRepo::find_or_create(
        &state.pool,
        &profile.nic,
        &profile.full_name,
        relief_core::roles::ROLE_CITIZEN,
    )
    .await
    .map_err(AppError::Database)?;

    let token = jwt::generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Failed to sign token: {e}")))?;

    tracing::info!(user_id = user.id, "mobile login succeeded");

    Ok(Json(DataResponse::new(MobileLoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user,
    })))
}
