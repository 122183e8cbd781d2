//! Repository for the `donations` table.

use sqlx::PgPool;

use relief_core::status::DonationStatus;

use crate::models::donation::{ConfirmDonation, Donation, DonationStats, DonorTotals};

/// Column list for `donations` queries.
const COLUMNS: &str = "\
    id, name, email, phone, amount, order_id, transaction_id, session_id, \
    status_id, created_at";

pub struct DonationRepo;

impl DonationRepo {
    /// Confirm a donation, keyed by `order_id`.
    ///
    /// A first confirmation inserts the row; a repeat for the same order
    /// only moves the status (gateway callbacks retry), leaving the
    /// original amount and donor fields untouched.
    pub async fn confirm(
        pool: &PgPool,
        input: &ConfirmDonation,
        status: DonationStatus,
    ) -> Result<Donation, sqlx::Error> {
        let query = format!(
            "INSERT INTO donations \
                 (name, email, phone, amount, order_id, transaction_id, session_id, status_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT ON CONSTRAINT uq_donations_order_id \
             DO UPDATE SET status_id = EXCLUDED.status_id, \
                           transaction_id = COALESCE(EXCLUDED.transaction_id, donations.transaction_id) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.amount)
            .bind(&input.order_id)
            .bind(&input.transaction_id)
            .bind(&input.session_id)
            .bind(status.id())
            .fetch_one(pool)
            .await
    }

    /// All donations for one donor email, newest first.
    pub async fn list_by_email(pool: &PgPool, email: &str) -> Result<Vec<Donation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donations WHERE email = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Donation>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    /// Totals over a donor's SUCCESS donations. Zero-valued when the donor
    /// has none.
    pub async fn donor_totals(pool: &PgPool, email: &str) -> Result<DonorTotals, sqlx::Error> {
        sqlx::query_as::<_, DonorTotals>(
            "SELECT COUNT(*) AS donation_count, \
                    COALESCE(SUM(amount), 0)::BIGINT AS total_amount, \
                    COALESCE(AVG(amount), 0)::DOUBLE PRECISION AS average_donation \
             FROM donations \
             WHERE email = $1 AND status_id = $2",
        )
        .bind(email)
        .bind(DonationStatus::Success.id())
        .fetch_one(pool)
        .await
    }

    /// Platform-wide donation statistics.
    pub async fn stats(pool: &PgPool) -> Result<DonationStats, sqlx::Error> {
        sqlx::query_as::<_, DonationStats>(
            "SELECT COUNT(*) AS total_donations, \
                    COUNT(*) FILTER (WHERE status_id = $1) AS pending_count, \
                    COUNT(*) FILTER (WHERE status_id = $2) AS success_count, \
                    COUNT(*) FILTER (WHERE status_id = $3) AS failed_count, \
                    COUNT(*) FILTER (WHERE status_id = $4) AS cancelled_count, \
                    COALESCE(SUM(amount) FILTER (WHERE status_id = $2), 0)::BIGINT \
                        AS total_amount_success, \
                    COALESCE(AVG(amount) FILTER (WHERE status_id = $2), 0)::DOUBLE PRECISION \
                        AS average_donation_success \
             FROM donations",
        )
        .bind(DonationStatus::Pending.id())
        .bind(DonationStatus::Success.id())
        .bind(DonationStatus::Failed.id())
        .bind(DonationStatus::Cancelled.id())
        .fetch_one(pool)
        .await
    }
}
