//! Live voyage status, derived fresh from the event history on every query.

use jiff::Timestamp;
use serde::Serialize;

use super::Stop;

/// Where the vessel is right now, as far as the log can tell.
///
/// Never stored: always a pure function of the classified event stream.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum VoyageStatus {
    /// No arrival or departure has ever been logged.
    Unknown,

    /// At rest at a known stop.
    Arrived { current: Stop },

    /// Between stops since `departed_at`.
    #[serde(rename_all = "camelCase")]
    Underway {
        from: Stop,
        /// The next planned stop after departure, when the board has one.
        destination: Option<Stop>,
        departed_at: Timestamp,
    },
}

/// Dead-reckoned position on the current leg.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EstimatedPosition {
    pub lat: f64,
    pub lng: f64,
    /// Fraction of the leg completed, clamped into `[0, 1]`.
    pub fraction: f64,
}
