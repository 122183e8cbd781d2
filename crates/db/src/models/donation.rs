//! Donation entity and gateway-facing DTOs.
//!
//! Wire fields use camelCase to match the payment gateway's callback
//! payload (`orderId`, `transactionId`, ...); everything else in the API
//! stays snake_case.

use relief_core::status::{DonationStatus, StatusId};
use relief_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `donations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub amount: i64,
    pub order_id: String,
    pub transaction_id: Option<String>,
    pub session_id: Option<String>,
    pub status_id: StatusId,
    pub created_at: Timestamp,
}

impl Donation {
    pub fn status(&self) -> DonationStatus {
        DonationStatus::from_id(self.status_id).unwrap_or(DonationStatus::Pending)
    }
}

/// Body of `POST /api/v1/donations/confirm`.
///
/// Confirmation is keyed by `orderId`: re-confirming the same order updates
/// its status (PENDING -> SUCCESS/FAILED/CANCELLED) instead of inserting a
/// second row, so gateway callback retries are harmless.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDonation {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[validate(range(min = 1))]
    pub amount: i64,
    #[validate(length(min = 1, max = 100))]
    pub order_id: String,
    pub transaction_id: Option<String>,
    pub session_id: Option<String>,
    /// Gateway status label: PENDING, SUCCESS, FAILED, or CANCELLED.
    #[validate(length(min = 1))]
    pub status: String,
}

/// Aggregate row for `GET /api/v1/donations/donor/{email}`.
///
/// Totals cover SUCCESS donations only.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorTotals {
    pub donation_count: i64,
    pub total_amount: i64,
    pub average_donation: f64,
}

/// Aggregate row for `GET /api/v1/donations/stats`.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationStats {
    pub total_donations: i64,
    pub pending_count: i64,
    pub success_count: i64,
    pub failed_count: i64,
    pub cancelled_count: i64,
    pub total_amount_success: i64,
    pub average_donation_success: f64,
}
