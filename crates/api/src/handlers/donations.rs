//! Donation handlers.
//!
//! `confirm` is the payment gateway callback target, so it is deliberately
//! unauthenticated and idempotent per `orderId`. The aggregate endpoints
//! are admin-only.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use validator::Validate;

use relief_core::status::DonationStatus;
use relief_db::models::donation::{ConfirmDonation, Donation, DonationStats, DonorTotals};
use relief_db::repositories::DonationRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Donation row plus its gateway status label.
#[derive(Debug, Serialize)]
pub struct DonationView {
    #[serde(flatten)]
    pub donation: Donation,
    pub status: &'static str,
}

impl From<Donation> for DonationView {
    fn from(donation: Donation) -> Self {
        let status = donation.status().as_str();
        Self { donation, status }
    }
}

/// Payload of `GET /api/v1/donations/donor/{email}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorHistory {
    #[serde(flatten)]
    pub totals: DonorTotals,
    pub donations: Vec<DonationView>,
}

/// POST /donations/confirm
pub async fn confirm_donation(
    State(state): State<AppState>,
    Json(input): Json<ConfirmDonation>,
) -> AppResult<Json<DataResponse<DonationView>>> {
    input.validate()?;

    let status = DonationStatus::parse(&input.status).ok_or_else(|| {
        AppError::BadRequest(format!("Unknown donation status '{}'", input.status))
    })?;

    let donation = DonationRepo::confirm(&state.pool, &input, status)
        .await
        .map_err(AppError::Database)?;

    tracing::info!(
        order_id = %donation.order_id,
        status = status.as_str(),
        amount = donation.amount,
        "donation confirmed"
    );

    Ok(Json(DataResponse::new(donation.into())))
}

/// GET /donations/donor/{email}
pub async fn donor_history(
    user: AuthUser,
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<DataResponse<DonorHistory>>> {
    user.require_admin()?;

    let totals = DonationRepo::donor_totals(&state.pool, &email)
        .await
        .map_err(AppError::Database)?;
    let donations = DonationRepo::list_by_email(&state.pool, &email)
        .await
        .map_err(AppError::Database)?
        .into_iter()
        .map(DonationView::from)
        .collect();

    Ok(Json(DataResponse::new(DonorHistory { totals, donations })))
}

/// GET /donations/stats
pub async fn donation_stats(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DonationStats>>> {
    user.require_admin()?;

    let stats = DonationRepo::stats(&state.pool)
        .await
        .map_err(AppError::Database)?;
    Ok(Json(DataResponse::new(stats)))
}
