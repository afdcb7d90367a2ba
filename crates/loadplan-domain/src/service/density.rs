//! Petroleum density / temperature correction

/// Density of water at 60°F, lbs per US gallon
pub const WATER_LBS_PER_GAL_60F: f64 = 8.345404;

/// Reference temperature for API gravity
pub const REFERENCE_TEMP_F: f64 = 60.0;

/// Density in lbs/gal at `temp_f` from API gravity and expansion coefficient.
///
/// No validation: callers treat a non-finite or non-positive result as
/// "no density available".
pub fn lbs_per_gallon_at_temp(api_60: f64, alpha_per_f: f64, temp_f: f64) -> f64 {
    let rho_60 = WATER_LBS_PER_GAL_60F * 141.5 / (api_60 + 131.5);
    rho_60 / (1.0 + alpha_per_f * (temp_f - REFERENCE_TEMP_F))
}

/// Whether a computed density can take part in planning
pub fn is_usable_density(lbs_per_gal: f64) -> bool {
    lbs_per_gal.is_finite() && lbs_per_gal > 0.0
}
