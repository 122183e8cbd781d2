//! Allocation recommendation scoring.
//!
//! Decision-support display data only: the score is shown on the dashboard
//! next to an allocation form and never feeds back into the allocation
//! operation itself.

use serde::Serialize;

use crate::status::Priority;

/// Fixed confidence reported with every recommendation. The scoring model
/// has no calibration data behind it, so the confidence never varies.
pub const RECOMMENDATION_CONFIDENCE: f64 = 0.85;

/// Linear priority multiplier applied to the satisfiable demand.
pub fn priority_multiplier(priority: Priority) -> f64 {
    match priority {
        Priority::Low => 0.9,
        Priority::Medium => 1.0,
        Priority::High => 1.1,
        Priority::Critical => 1.2,
    }
}

/// A scored allocation suggestion for a single resource.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Suggested quantity to allocate, floored to a whole unit.
    pub recommended_quantity: i32,
    /// The multiplier that was applied.
    pub multiplier: f64,
    /// Fixed confidence score.
    pub confidence: f64,
}

/// Score an allocation suggestion.
///
/// The satisfiable demand (`min(available, demand)`) is scaled by the
/// priority multiplier and floored. Negative availability or demand score
/// zero. The result may exceed `available` for high priorities; it is a
/// suggestion, not a commitment.
pub fn recommend(available: i32, demand: i32, priority: Priority) -> Recommendation {
    let satisfiable = available.min(demand).max(0);
    let multiplier = priority_multiplier(priority);
    let recommended_quantity = (f64::from(satisfiable) * multiplier).floor() as i32;

    Recommendation {
        recommended_quantity,
        multiplier,
        confidence: RECOMMENDATION_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_priority_scales_up() {
        let rec = recommend(100, 50, Priority::Critical);
        assert_eq!(rec.recommended_quantity, 60); // floor(50 * 1.2)
    }

    #[test]
    fn low_priority_scales_down_and_floors() {
        let rec = recommend(100, 55, Priority::Low);
        assert_eq!(rec.recommended_quantity, 49); // floor(55 * 0.9) = floor(49.5)
    }

    #[test]
    fn medium_priority_is_identity() {
        assert_eq!(recommend(100, 40, Priority::Medium).recommended_quantity, 40);
    }

    #[test]
    fn demand_is_capped_by_availability() {
        let rec = recommend(30, 500, Priority::Medium);
        assert_eq!(rec.recommended_quantity, 30);
    }

    #[test]
    fn negative_availability_scores_zero() {
        assert_eq!(recommend(-5, 50, Priority::Critical).recommended_quantity, 0);
    }

    #[test]
    fn zero_demand_scores_zero() {
        assert_eq!(recommend(100, 0, Priority::Critical).recommended_quantity, 0);
    }

    #[test]
    fn confidence_is_fixed() {
        let rec = recommend(10, 10, Priority::High);
        assert!((rec.confidence - RECOMMENDATION_CONFIDENCE).abs() < f64::EPSILON);
    }
}
