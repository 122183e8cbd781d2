//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` + `Validate` create/request DTOs checked at the API
//!   boundary before any domain logic runs
//! - Query-parameter structs for list endpoints

pub mod deployment;
pub mod disaster;
pub mod donation;
pub mod incident_report;
pub mod reporting;
pub mod resource;
pub mod safe_zone;
pub mod sos;
pub mod user;
