//! Tractor/trailer equipment combinations

use serde::{Deserialize, Serialize};

use super::Compartment;

/// A trailer and its compartments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trailer {
    pub trailer_id: String,
    #[serde(default)]
    pub compartments: Vec<Compartment>,
}

impl Trailer {
    /// Sum of true compartment capacities
    pub fn capacity_gallons(&self) -> f64 {
        self.compartments.iter().map(|c| c.max_gallons).sum()
    }
}

/// A truck + trailer pairing with its weight limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCombo {
    pub combo_id: String,
    #[serde(default)]
    pub combo_name: String,
    pub trailer_id: String,
    pub tare_lbs: f64,
    pub gross_limit_lbs: f64,
    #[serde(default)]
    pub buffer_lbs: f64,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl EquipmentCombo {
    /// Payload budget: gross limit less tare and safety buffer, never negative
    pub fn allowed_lbs(&self) -> f64 {
        (self.gross_limit_lbs - self.tare_lbs - self.buffer_lbs).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo(gross: f64, tare: f64, buffer: f64) -> EquipmentCombo {
        EquipmentCombo {
            combo_id: "c1".to_string(),
            combo_name: String::new(),
            trailer_id: "t1".to_string(),
            tare_lbs: tare,
            gross_limit_lbs: gross,
            buffer_lbs: buffer,
            active: true,
        }
    }

    #[test]
    fn test_allowed_lbs() {
        assert_eq!(combo(80000.0, 32000.0, 500.0).allowed_lbs(), 47500.0);
    }

    #[test]
    fn test_allowed_lbs_never_negative() {
        assert_eq!(combo(30000.0, 32000.0, 0.0).allowed_lbs(), 0.0);
    }

    #[test]
    fn test_trailer_capacity() {
        let trailer = Trailer {
            trailer_id: "t1".to_string(),
            compartments: vec![
                Compartment { comp_number: 1, max_gallons: 3000.0, position: 1.0 },
                Compartment { comp_number: 2, max_gallons: 2500.0, position: -1.0 },
            ],
        };
        assert_eq!(trailer.capacity_gallons(), 5500.0);
    }
}
