//! Center-of-gravity slider curve

/// Slider value producing zero bias
pub const CG_NEUTRAL: f64 = 0.5;
/// End of the first front stage (bias +1)
pub const CG_FRONT_MAX: f64 = 0.9;
/// Slider value producing full rear bias (-1)
pub const CG_REAR_MAX: f64 = 0.0;
/// Bias at the far end of the "plow" stage
pub const PLOW_BIAS_MAX: f64 = 2.5;
/// Rear-most bias
pub const REAR_BIAS_MIN: f64 = -1.0;
/// Exponent > 1 flattens the response near center
pub const CG_CURVE: f64 = 1.8;

fn curve(t: f64) -> f64 {
    t.clamp(0.0, 1.0).powf(CG_CURVE)
}

/// Map a normalized slider position in `[0, 1]` to a bias in `[-1, 2.5]`.
///
/// * `[0.0, 0.5)` rear: `-1 .. 0`
/// * `[0.5, 0.9]` front: `0 .. +1`
/// * `(0.9, 1.0]` plow: `+1 .. +2.5`
pub fn slider_to_bias(slider: f64) -> f64 {
    let s = if slider.is_finite() {
        slider.clamp(0.0, 1.0)
    } else {
        0.0
    };

    if s < CG_NEUTRAL {
        let t = (CG_NEUTRAL - s) / (CG_NEUTRAL - CG_REAR_MAX);
        return -curve(t);
    }

    if s <= CG_FRONT_MAX {
        let t = (s - CG_NEUTRAL) / (CG_FRONT_MAX - CG_NEUTRAL);
        return curve(t);
    }

    let t = (s - CG_FRONT_MAX) / (1.0 - CG_FRONT_MAX);
    1.0 + curve(t) * (PLOW_BIAS_MAX - 1.0)
}

/// Rear-biased loads are flagged as unstable
pub fn is_unstable_load(slider: f64) -> bool {
    slider < CG_NEUTRAL
}

/// Clamp any bias into the supported range; non-finite means neutral
pub fn clamp_bias(bias: f64) -> f64 {
    if bias.is_finite() {
        bias.clamp(REAR_BIAS_MIN, PLOW_BIAS_MAX)
    } else {
        0.0
    }
}
