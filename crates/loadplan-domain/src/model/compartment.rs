//! Trailer compartment types

use serde::{Deserialize, Serialize};

/// Largest headspace reservation accepted for planning
pub const MAX_HEADSPACE_PCT: f64 = 0.30;

/// A physically separate tank segment on a trailer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    /// Unique within a trailer
    pub comp_number: u32,
    /// True physical capacity in gallons
    pub max_gallons: f64,
    /// Longitudinal offset, positive = front, negative = rear
    #[serde(default)]
    pub position: f64,
}

impl Compartment {
    /// Capacity used for planning after reserving headspace.
    ///
    /// The headspace fraction is clamped to `[0, 0.30]` and the result is
    /// floored to whole gallons.
    pub fn effective_max_gallons(&self, headspace_pct: f64) -> f64 {
        let pct = clamp_headspace(headspace_pct);
        (self.max_gallons * (1.0 - pct)).floor().max(0.0)
    }
}

/// Clamp a headspace fraction into the accepted range; non-finite means none
pub fn clamp_headspace(headspace_pct: f64) -> f64 {
    if !headspace_pct.is_finite() {
        return 0.0;
    }
    headspace_pct.clamp(0.0, MAX_HEADSPACE_PCT)
}

/// What the driver chose for one compartment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompartmentSelection {
    #[serde(default)]
    pub product_id: Option<String>,
    /// Explicitly left empty
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub headspace_pct: f64,
}

impl CompartmentSelection {
    pub fn product(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self {
            empty: true,
            ..Default::default()
        }
    }

    pub fn with_headspace(mut self, headspace_pct: f64) -> Self {
        self.headspace_pct = headspace_pct;
        self
    }
}

/// A compartment bound to a product at the planning temperature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveCompartment {
    pub comp_number: u32,
    /// Effective (headspace-reduced) capacity
    pub max_gallons: f64,
    pub position: f64,
    pub product_id: String,
    pub lbs_per_gal: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comp(max_gallons: f64) -> Compartment {
        Compartment {
            comp_number: 1,
            max_gallons,
            position: 0.0,
        }
    }

    #[test]
    fn test_effective_max_without_headspace() {
        assert_eq!(comp(3000.0).effective_max_gallons(0.0), 3000.0);
    }

    #[test]
    fn test_effective_max_floors() {
        // 2999 x 0.95 = 2849.05
        assert_eq!(comp(2999.0).effective_max_gallons(0.05), 2849.0);
    }

    #[test]
    fn test_headspace_clamped_to_thirty_percent() {
        assert_eq!(comp(1000.0).effective_max_gallons(0.9), 700.0);
        assert_eq!(comp(1000.0).effective_max_gallons(-0.2), 1000.0);
        assert_eq!(comp(1000.0).effective_max_gallons(f64::NAN), 1000.0);
    }

    #[test]
    fn test_negative_capacity_is_zero() {
        assert_eq!(comp(-50.0).effective_max_gallons(0.0), 0.0);
    }
}
