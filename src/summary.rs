//! Trip-level rollups from the event stream.
//!
//! One chronological fold over an already-scoped log. Distance chains
//! through every position-bearing movement event; time and stays pair
//! departures with arrivals; fuel efficiency is only knowable in
//! retrospect, at the next refill.

use std::collections::BTreeMap;

use jiff::Timestamp;

use crate::geo;
use crate::model::{BrokenItem, LogEvent, LogEventKind, LongestStay, RepairState, Summary};

const SECONDS_PER_HOUR: f64 = 3600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Compute rollups over a chronologically sorted, already-scoped log.
///
/// `tank_capacity_litres` seeds the remaining-fuel counter at each refill.
/// A `Diesel <n>` entry records the tank gauge in litres at the refill, so
/// consumption between refills is the drop between consecutive readings and
/// efficiency is distance over that drop.
pub fn summarize(events: &[LogEvent], tank_capacity_litres: f64) -> Summary {
    let mut total_nm = 0.0;
    let mut last_point: Option<(f64, f64)> = None;

    let mut total_hours = 0.0;
    let mut open_departure: Option<Timestamp> = None;

    let mut total_diesel = 0.0;
    let mut efficiency: Option<f64> = None;
    let mut remaining_fuel: Option<f64> = None;
    let mut distance_since_fill = 0.0;
    let mut last_gauge: Option<f64> = None;

    let mut last_arrival: Option<(Timestamp, String)> = None;
    let mut longest_stay: Option<LongestStay> = None;

    let mut repairs: BTreeMap<String, RepairState> = BTreeMap::new();

    for event in events {
        // Distance chains through every charted movement waypoint:
        // departures, arrivals, and visits alike.
        if matches!(
            event.kind,
            LogEventKind::Arrived | LogEventKind::Departed | LogEventKind::Visited
        ) {
            if let (Some(lat), Some(lng)) = (event.lat, event.lng) {
                if let Some((prev_lat, prev_lng)) = last_point {
                    let leg_nm = geo::meters_to_nautical_miles(geo::distance_meters(
                        prev_lat, prev_lng, lat, lng,
                    ));
                    total_nm += leg_nm;
                    distance_since_fill += leg_nm;
                    if let (Some(fuel), Some(nm_per_litre)) = (remaining_fuel.as_mut(), efficiency)
                    {
                        *fuel = (*fuel - leg_nm / nm_per_litre).max(0.0);
                    }
                }
                last_point = Some((lat, lng));
            }
        }

        match &event.kind {
            LogEventKind::Departed => {
                open_departure = Some(event.timestamp);
                if let Some((arrived_at, place)) = last_arrival.take() {
                    let days =
                        event.timestamp.duration_since(arrived_at).as_secs_f64() / SECONDS_PER_DAY;
                    if longest_stay.as_ref().is_none_or(|stay| days > stay.days) {
                        longest_stay = Some(LongestStay { place, days });
                    }
                }
            }
            LogEventKind::Arrived => {
                // An unmatched departure contributes nothing here; the
                // status machine still sees it.
                if let Some(departed_at) = open_departure.take() {
                    total_hours +=
                        event.timestamp.duration_since(departed_at).as_secs_f64() / SECONDS_PER_HOUR;
                }
                last_arrival = Some((event.timestamp, event.card_name.clone()));
            }
            LogEventKind::Diesel {
                litres: Some(litres),
            } => {
                if let Some(previous) = last_gauge {
                    let consumed = previous - litres;
                    if consumed > 0.0 {
                        total_diesel += consumed;
                        if distance_since_fill > 0.0 {
                            efficiency = Some(distance_since_fill / consumed);
                        }
                    }
                }
                last_gauge = Some(*litres);
                distance_since_fill = 0.0;
                remaining_fuel = Some(tank_capacity_litres);
            }
            LogEventKind::Broken { item } => {
                repairs.insert(item.clone(), RepairState::Broken);
            }
            LogEventKind::Fixed { item } => {
                repairs.insert(item.clone(), RepairState::Fixed);
            }
            _ => {}
        }
    }

    let remaining_range = match (remaining_fuel, efficiency) {
        (Some(fuel), Some(nm_per_litre)) => Some(fuel * nm_per_litre),
        _ => None,
    };

    Summary {
        total_nm,
        total_hours,
        total_diesel,
        efficiency,
        remaining_range,
        longest_stay,
        broken_items: repairs
            .into_iter()
            .map(|(item, status)| BrokenItem { item, status })
            .collect(),
    }
}
