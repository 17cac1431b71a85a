//! Voyages from the Trips list: date windows for scoping the log.

use jiff::Timestamp;
use serde::Serialize;

/// One voyage, as recorded by a card in the Trips list.
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub name: String,
    pub start: Option<Timestamp>,
    pub due: Option<Timestamp>,
}

/// The date window of a voyage. `end` stays open for a trip still underway.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRange {
    pub start: Timestamp,
    pub end: Option<Timestamp>,
}

impl TripRange {
    /// Whether an instant falls inside the window.
    pub fn contains(&self, at: Timestamp) -> bool {
        at >= self.start && self.end.is_none_or(|end| at <= end)
    }
}

/// Trips bucketed by calendar year for the historical view.
#[derive(Debug, Clone, Serialize)]
pub struct TripYear {
    pub year: String,
    pub trips: Vec<Trip>,
}
