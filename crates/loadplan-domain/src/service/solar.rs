//! Low-precision solar position

use chrono::{DateTime, Timelike, Utc};

const UNIX_EPOCH_JULIAN_DAY: f64 = 2_440_587.5;
const J2000_JULIAN_DAY: f64 = 2_451_545.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const EARTH_ORBIT_ECCENTRICITY: f64 = 0.0167;

/// Solar elevation angle in radians at `unix_seconds` for a site at
/// `lat_deg` / `lon_deg` (decimal degrees, east positive).
///
/// Accurate to a fraction of a degree, plenty for a heating estimate.
pub fn solar_elevation_rad(unix_seconds: i64, lat_deg: f64, lon_deg: f64) -> f64 {
    let jd = unix_seconds as f64 / SECONDS_PER_DAY + UNIX_EPOCH_JULIAN_DAY;
    let n = jd - J2000_JULIAN_DAY;

    // Mean longitude and mean anomaly (deg)
    let mean_lon = (280.46 + 0.9856474 * n) % 360.0;
    let anomaly = (357.528 + 0.9856003 * n) % 360.0;
    let g = anomaly.to_radians();

    let ecliptic_lon = mean_lon + 1.915 * g.sin() + 0.02 * (2.0 * g).sin();
    let obliquity = 23.439 - 0.0000004 * n;

    let declination = (obliquity.to_radians().sin() * ecliptic_lon.to_radians().sin()).asin();

    // Equation of time (minutes)
    let l = mean_lon.to_radians();
    let e = EARTH_ORBIT_ECCENTRICITY;
    let y = (obliquity.to_radians() / 2.0).tan().powi(2);
    let eq_time = 4.0
        * (y * (2.0 * l).sin() - 2.0 * e * g.sin() + 4.0 * e * y * g.sin() * (2.0 * l).cos()
            - 0.5 * y * y * (4.0 * l).sin()
            - 1.25 * e * e * (2.0 * g).sin())
        .to_degrees();

    let utc = DateTime::<Utc>::from_timestamp(unix_seconds, 0).unwrap_or_default();
    let utc_minutes =
        utc.hour() as f64 * 60.0 + utc.minute() as f64 + utc.second() as f64 / 60.0;
    let true_solar_minutes = (utc_minutes + eq_time + 4.0 * lon_deg) % 1440.0;

    let hour_angle = (true_solar_minutes / 4.0 - 180.0).to_radians();
    let lat = lat_deg.to_radians();

    let sin_el = lat.sin() * declination.sin()
        + lat.cos() * declination.cos() * hour_angle.cos();
    sin_el.clamp(-1.0, 1.0).asin()
}
