//! Liquid product definitions

use serde::{Deserialize, Serialize};

use crate::service::density::lbs_per_gallon_at_temp;

/// A liquid commodity offered at a terminal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    /// API gravity at 60°F
    #[serde(default)]
    pub api_60: Option<f64>,
    /// Thermal expansion coefficient per °F
    #[serde(default)]
    pub alpha_per_f: Option<f64>,
}

impl Product {
    /// Density at `temp_f`, or `None` when the product lacks API or alpha
    pub fn lbs_per_gal_at(&self, temp_f: f64) -> Option<f64> {
        match (self.api_60, self.alpha_per_f) {
            (Some(api), Some(alpha)) => Some(lbs_per_gallon_at_temp(api, alpha, temp_f)),
            _ => None,
        }
    }

    /// Name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.product_id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_alpha_has_no_density() {
        let p = Product {
            product_id: "ulsd".to_string(),
            name: String::new(),
            api_60: Some(35.0),
            alpha_per_f: None,
        };
        assert!(p.lbs_per_gal_at(60.0).is_none());
        assert_eq!(p.display_name(), "ulsd");
    }
}
