//! Status enums mapping to SMALLINT lookup tables.
//!
//! Each variant's discriminant matches the seed data order (1-based) in the
//! corresponding `*_statuses` database table. `as_str` returns the wire
//! label used in JSON responses; `from_id` converts a raw column value back
//! into the enum (returns `None` for unseeded ids).

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Look up the variant for a raw database ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Wire label used in JSON responses.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Resource display status. Derived from quantity arithmetic; never the
    /// source of truth for capacity math.
    ResourceStatus {
        Available = 1 => "available",
        Dispatched = 2 => "dispatched",
        Reserved = 3 => "reserved",
        Depleted = 4 => "depleted",
        Maintenance = 5 => "maintenance",
        OutOfStock = 6 => "out_of_stock",
    }
}

define_status_enum! {
    /// Deployment lifecycle. Only two states exist: a deployment is created
    /// `deployed` and later marked `completed`.
    DeploymentStatus {
        Deployed = 1 => "deployed",
        Completed = 2 => "completed",
    }
}

define_status_enum! {
    /// Donation confirmation status, matching the gateway's labels.
    DonationStatus {
        Pending = 1 => "PENDING",
        Success = 2 => "SUCCESS",
        Failed = 3 => "FAILED",
        Cancelled = 4 => "CANCELLED",
    }
}

define_status_enum! {
    /// SOS alert lifecycle.
    SosStatus {
        Active = 1 => "active",
        Acknowledged = 2 => "acknowledged",
        Resolved = 3 => "resolved",
    }
}

define_status_enum! {
    /// Resource priority, used as a linear multiplier in recommendation
    /// scoring and as incident report severity.
    Priority {
        Low = 1 => "low",
        Medium = 2 => "medium",
        High = 3 => "high",
        Critical = 4 => "critical",
    }
}

impl ResourceStatus {
    /// Parse a status label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "available" => Some(Self::Available),
            "dispatched" => Some(Self::Dispatched),
            "reserved" => Some(Self::Reserved),
            "depleted" => Some(Self::Depleted),
            "maintenance" => Some(Self::Maintenance),
            "out_of_stock" => Some(Self::OutOfStock),
            _ => None,
        }
    }
}

impl DonationStatus {
    /// Parse a gateway status label (case-sensitive, uppercase).
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "PENDING" => Some(Self::Pending),
            "SUCCESS" => Some(Self::Success),
            "FAILED" => Some(Self::Failed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl Priority {
    /// Parse a priority/severity label.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}
