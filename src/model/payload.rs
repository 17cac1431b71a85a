//! Outbound payloads: what the engine hands the rendering/API layer.
//!
//! Field names are a stable contract; UI code depends on them. Everything
//! serializes camelCase.

use jiff::civil::Date;
use serde::Serialize;

use super::{EstimatedPosition, LogEvent, Place, Stop, TripRange, TripYear, VoyageStatus};

/// The primary itinerary payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPayload {
    pub stops: Vec<Stop>,
    pub places: Vec<Place>,
    pub can_plan: bool,
    pub schedule: Vec<DaySchedule>,
}

/// One calendar day of the plan.
///
/// Days with no stops are materialized only for planning-authorized callers,
/// so gaps in the plan are visible to whoever can fill them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub date: Date,
    pub stops: Vec<PlannedStop>,
    /// Sum of this day's legs only; the chain itself runs across days.
    pub total_nm: f64,
}

/// A future stop annotated with its leg from the previous charted point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStop {
    #[serde(flatten)]
    pub stop: Stop,
    pub leg: Option<Leg>,
    pub hours_to_next: Option<f64>,
    pub overnight: bool,
}

/// Distance and ETA from the previous charted point.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub nm: f64,
    /// Absent when the cruising speed is zero or unset.
    pub eta_hours: Option<f64>,
    /// Human-readable ETA, empty when unknowable.
    pub eta: String,
}

/// The historical log payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogbookPayload {
    pub logs: Vec<LogEvent>,
    pub most_recent_trip_range: Option<TripRange>,
}

/// Historical trips grouped by year, newest year first.
#[derive(Debug, Clone, Serialize)]
pub struct TripsPayload {
    pub years: Vec<TripYear>,
}

/// The live status payload, with a position estimate while underway.
#[derive(Debug, Clone, Serialize)]
pub struct StatusPayload {
    #[serde(flatten)]
    pub status: VoyageStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<EstimatedPosition>,
}

/// Trip-level rollups.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_nm: f64,
    pub total_hours: f64,
    /// Total litres burned, as far as the fuel log can tell.
    pub total_diesel: f64,
    /// Nautical miles per litre; null until two refills bound a sample.
    pub efficiency: Option<f64>,
    /// Estimated range on the remaining tank, in nautical miles.
    pub remaining_range: Option<f64>,
    pub longest_stay: Option<LongestStay>,
    pub broken_items: Vec<BrokenItem>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LongestStay {
    pub place: String,
    pub days: f64,
}

/// An item's latest repair state, chronological last-write-wins.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokenItem {
    pub item: String,
    pub status: RepairState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RepairState {
    Broken,
    Fixed,
}
