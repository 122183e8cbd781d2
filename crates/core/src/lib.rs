//! Pure domain logic for the relief platform.
//!
//! Nothing in this crate performs I/O. Quantity bookkeeping, status
//! derivation, recommendation scoring, and geo math all live here so they
//! can be unit-tested without a database.

pub mod error;
pub mod geo;
pub mod quantity;
pub mod recommendation;
pub mod roles;
pub mod status;
pub mod types;
