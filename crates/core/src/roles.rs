//! Role names carried in JWT claims.

/// Full access: resource CRUD, allocation, reporting.
pub const ROLE_ADMIN: &str = "admin";

/// Field responder: allocation, reservation, completion, map reads.
pub const ROLE_RESPONDER: &str = "responder";

/// Mobile citizen account: SOS, incident reports, donations.
pub const ROLE_CITIZEN: &str = "citizen";
