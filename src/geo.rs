//! Great-circle geometry and display math for passage planning.
//!
//! Pure functions over decimal degrees, no state. Distances use a spherical
//! earth, which is plenty accurate for coastal legs.

/// Mean earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Meters per nautical mile.
const METERS_PER_NM: f64 = 1852.0;

/// A charted position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

/// Great-circle distance between two points in meters (haversine).
///
/// Always finite and non-negative: the intermediate term is clamped into
/// `[0, 1]` so floating-point overshoot near identical or antipodal points
/// cannot produce NaN.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

pub fn meters_to_nautical_miles(meters: f64) -> f64 {
    meters / METERS_PER_NM
}

/// Format a duration in hours as whole hours and minutes, e.g. `"3h 45m"`.
///
/// Non-finite input renders as an empty string rather than "NaN". Display
/// rounds to the nearest quarter hour; durations under 15 minutes round to
/// the nearest 5 minutes so short hops don't show as "0h 0m".
pub fn format_duration(hours: f64) -> String {
    if !hours.is_finite() {
        return String::new();
    }

    let minutes = (hours * 60.0).max(0.0);
    let step = if minutes < 15.0 { 5.0 } else { 15.0 };
    let rounded = (minutes / step).round() * step;

    let h = (rounded / 60.0).floor();
    let m = rounded - h * 60.0;
    format!("{h}h {m}m", h = h as i64, m = m as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Harbor-scale fixtures along the Finnish coast.
    const HELSINKI: (f64, f64) = (60.1699, 24.9384);
    const TALLINN: (f64, f64) = (59.4370, 24.7536);

    #[test]
    fn distance_is_symmetric() {
        let ab = distance_meters(HELSINKI.0, HELSINKI.1, TALLINN.0, TALLINN.1);
        let ba = distance_meters(TALLINN.0, TALLINN.1, HELSINKI.0, HELSINKI.1);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(
            distance_meters(HELSINKI.0, HELSINKI.1, HELSINKI.0, HELSINKI.1),
            0.0
        );
    }

    #[test]
    fn distance_helsinki_tallinn_is_about_82km() {
        let d = distance_meters(HELSINKI.0, HELSINKI.1, TALLINN.0, TALLINN.1);
        assert!((d - 82_000.0).abs() < 2_000.0, "got {d}");
    }

    #[test]
    fn nearly_collinear_points_add_up() {
        let a = (60.0, 25.0);
        let b = (60.1, 25.0);
        let c = (60.2, 25.0);
        let ab = distance_meters(a.0, a.1, b.0, b.1);
        let bc = distance_meters(b.0, b.1, c.0, c.1);
        let ac = distance_meters(a.0, a.1, c.0, c.1);
        assert!((ac - (ab + bc)).abs() < 1.0);
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = distance_meters(0.0, 0.0, 0.0, 180.0);
        assert!(d.is_finite());
        // Half the earth's circumference, give or take the spherical model.
        assert!((d - 20_015_000.0).abs() < 10_000.0, "got {d}");
    }

    #[test]
    fn meters_convert_to_nautical_miles() {
        assert!((meters_to_nautical_miles(1852.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn duration_rounds_to_quarter_hours() {
        assert_eq!(format_duration(2.51), "2h 30m");
        assert_eq!(format_duration(1.0), "1h 0m");
        assert_eq!(format_duration(0.37), "0h 15m");
    }

    #[test]
    fn short_durations_round_to_five_minutes() {
        assert_eq!(format_duration(0.1), "0h 5m");
        assert_eq!(format_duration(0.2), "0h 10m");
        assert_eq!(format_duration(0.02), "0h 0m");
    }

    #[test]
    fn non_finite_durations_render_empty() {
        assert_eq!(format_duration(f64::NAN), "");
        assert_eq!(format_duration(f64::INFINITY), "");
    }
}
