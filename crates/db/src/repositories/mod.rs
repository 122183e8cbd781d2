//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Quantity-mutating operations run
//! inside a transaction holding a `FOR UPDATE` row lock, so two racing
//! allocations can never both pass the capacity check.

pub mod deployment_repo;
pub mod disaster_repo;
pub mod donation_repo;
pub mod map_repo;
pub mod reporting_repo;
pub mod resource_repo;
pub mod user_repo;

pub use deployment_repo::DeploymentRepo;
pub use disaster_repo::DisasterRepo;
pub use donation_repo::DonationRepo;
pub use map_repo::MapRepo;
pub use reporting_repo::ReportingRepo;
pub use resource_repo::ResourceRepo;
pub use user_repo::UserRepo;

use relief_core::error::CoreError;

/// Error type for repository operations that enforce domain rules inside a
/// transaction (capacity checks, completion guards). Plain reads and writes
/// keep returning `sqlx::Error` directly.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}
