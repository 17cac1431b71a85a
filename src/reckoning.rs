//! Dead reckoning: estimated position on the current leg.
//!
//! Latitude and longitude interpolate linearly between the endpoints. That
//! is a known approximation — fine for coastal legs, not great-circle-exact
//! on long passages.

use jiff::Timestamp;

use crate::geo::{self, Point};
use crate::model::EstimatedPosition;

/// Project the vessel's position between `from` and `to`.
///
/// Stateless: callers re-invoke on their own redraw interval with a fresh
/// `now`. The fraction clamps into `[0, 1]`, so a vessel past its ETA sits
/// at the destination and one that hasn't left yet sits at the origin.
/// Coincident endpoints or zero speed yield fraction 0, never NaN.
pub fn expected_position(
    from: Point,
    to: Point,
    departed_at: Timestamp,
    speed_knots: f64,
    now: Timestamp,
) -> EstimatedPosition {
    let total_nm =
        geo::meters_to_nautical_miles(geo::distance_meters(from.lat, from.lng, to.lat, to.lng));
    let elapsed_hours = now.duration_since(departed_at).as_secs_f64() / 3600.0;
    let traveled_nm = elapsed_hours.max(0.0) * speed_knots.max(0.0);

    let fraction = if total_nm > 0.0 {
        (traveled_nm / total_nm).clamp(0.0, 1.0)
    } else {
        0.0
    };

    EstimatedPosition {
        lat: from.lat + (to.lat - from.lat) * fraction,
        lng: from.lng + (to.lng - from.lng) * fraction,
        fraction,
    }
}
