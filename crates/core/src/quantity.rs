//! Resource quantity bookkeeping.
//!
//! A resource's capacity is tracked as three counters: `current` (total on
//! hand), `allocated` (committed to active deployments), and `reserved`
//! (soft-held). Invariant: `allocated + reserved <= current`. Every mutation
//! goes through the pure operations here; the repository layer applies the
//! result inside a row-locked transaction so the invariant holds under
//! concurrent requests.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::ResourceStatus;

/// Snapshot of a resource's quantity counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    /// Total units on hand.
    pub current: i32,
    /// Units committed to active deployments.
    pub allocated: i32,
    /// Units soft-held without a deployment.
    pub reserved: i32,
}

impl Quantity {
    /// Units available for allocation or reservation.
    ///
    /// Can be negative if counters have drifted (e.g. a manual stock
    /// adjustment below the committed level); callers treat anything
    /// non-positive as "none available".
    pub fn available(self) -> i32 {
        self.current - self.allocated - self.reserved
    }

    /// Percentage of total capacity that is allocated or reserved.
    ///
    /// Returns `0.0` when `current` is zero or negative rather than
    /// dividing by zero.
    pub fn utilization_rate(self) -> f64 {
        if self.current <= 0 {
            return 0.0;
        }
        f64::from(self.allocated + self.reserved) / f64::from(self.current) * 100.0
    }

    /// Commit `requested` units to a deployment.
    ///
    /// Fails with [`CoreError::InsufficientCapacity`] when the request
    /// exceeds available capacity; the snapshot is returned unmodified in
    /// that case (the caller persists nothing).
    pub fn allocate(self, requested: i32) -> Result<Quantity, CoreError> {
        self.check_positive(requested)?;
        self.check_available(requested)?;
        Ok(Quantity {
            allocated: self.allocated + requested,
            ..self
        })
    }

    /// Soft-hold `requested` units without creating a deployment.
    pub fn reserve(self, requested: i32) -> Result<Quantity, CoreError> {
        self.check_positive(requested)?;
        self.check_available(requested)?;
        Ok(Quantity {
            reserved: self.reserved + requested,
            ..self
        })
    }

    /// Return previously reserved units to the pool, clamped at zero.
    pub fn release_reserved(self, quantity: i32) -> Result<Quantity, CoreError> {
        self.check_positive(quantity)?;
        Ok(Quantity {
            reserved: (self.reserved - quantity).max(0),
            ..self
        })
    }

    /// Return a completed deployment's units to the pool.
    ///
    /// Clamped at zero to tolerate drift (a deployment completed twice via
    /// direct data repair, or an allocation whose counter was adjusted); the
    /// counter must never go negative.
    pub fn complete_deployment(self, quantity_deployed: i32) -> Quantity {
        Quantity {
            allocated: (self.allocated - quantity_deployed).max(0),
            ..self
        }
    }

    fn check_positive(self, requested: i32) -> Result<(), CoreError> {
        if requested <= 0 {
            return Err(CoreError::Validation(format!(
                "quantity must be a positive number, got {requested}"
            )));
        }
        Ok(())
    }

    fn check_available(self, requested: i32) -> Result<(), CoreError> {
        let available = self.available();
        if requested > available {
            return Err(CoreError::InsufficientCapacity {
                requested,
                available: available.max(0),
            });
        }
        Ok(())
    }
}

/// Display status after an allocation succeeded.
///
/// Depleted when nothing remains available; a previously-available resource
/// becomes dispatched; any other status (maintenance, reserved, ...) is left
/// alone.
pub fn status_after_allocation(after: Quantity, previous: ResourceStatus) -> ResourceStatus {
    if after.available() <= 0 {
        ResourceStatus::Depleted
    } else if previous == ResourceStatus::Available {
        ResourceStatus::Dispatched
    } else {
        previous
    }
}

/// Display status after a reservation succeeded. Same shape as allocation
/// but an available resource shows as reserved, not dispatched.
pub fn status_after_reservation(after: Quantity, previous: ResourceStatus) -> ResourceStatus {
    if after.available() <= 0 {
        ResourceStatus::Depleted
    } else if previous == ResourceStatus::Available {
        ResourceStatus::Reserved
    } else {
        previous
    }
}

/// Display status after capacity was returned to the pool (deployment
/// completion or reservation release).
///
/// Manually-set statuses (maintenance, out_of_stock) are preserved; the
/// derived ones revert to available when capacity came back, else depleted.
pub fn status_after_return(after: Quantity, previous: ResourceStatus) -> ResourceStatus {
    match previous {
        ResourceStatus::Maintenance | ResourceStatus::OutOfStock => previous,
        _ if after.available() > 0 => ResourceStatus::Available,
        _ => ResourceStatus::Depleted,
    }
}
