//! Itinerary derivation: ordered stops, candidate places, and the
//! day-by-day schedule with distance/ETA chaining.

use std::collections::BTreeMap;

use jiff::Timestamp;
use jiff::civil::Date;
use jiff::tz::TimeZone;

use crate::fields;
use crate::geo::{self, Point};
use crate::model::{
    BoardSnapshot, Card, DaySchedule, LabelBadge, Leg, Place, PlannedStop, Stop, label_color,
};

/// All scheduled stops, ascending by due date.
///
/// A card is a stop when it has a due date and doesn't live in the Trips
/// list. `due_complete` stops are included: one of them is the current
/// location.
pub fn stops(snapshot: &BoardSnapshot) -> Vec<Stop> {
    let trips = snapshot.trips_list_id();
    let mut stops: Vec<Stop> = snapshot
        .cards
        .iter()
        .filter(|card| card.due.is_some() && Some(card.id_list.as_str()) != trips)
        .map(|card| build_stop(card, snapshot))
        .collect();
    stops.sort_by_key(|stop| stop.due);
    stops
}

/// Unscheduled candidate destinations: no due date, both coordinates set.
pub fn places(snapshot: &BoardSnapshot) -> Vec<Place> {
    let trips = snapshot.trips_list_id();
    snapshot
        .cards
        .iter()
        .filter(|card| card.due.is_none() && Some(card.id_list.as_str()) != trips)
        .filter_map(|card| {
            let (lat, lng) = fields::coordinates(card, &snapshot.custom_fields);
            Some(Place {
                id: card.id.clone(),
                name: card.name.clone(),
                list_name: list_name(card, snapshot),
                lat: lat?,
                lng: lng?,
                rating: fields::rating(card, &snapshot.custom_fields),
                labels: badges(card),
                trello_url: card.short_url.clone(),
                navily_url: fields::text_or_dropdown(card, &snapshot.custom_fields, fields::NAVILY),
            })
        })
        .collect()
}

/// The stop the vessel is at now: `due_complete` marks it.
///
/// Upstream data is expected to keep at most one; when it doesn't, the most
/// recently due wins, deterministically.
pub fn current_stop(stops: &[Stop]) -> Option<&Stop> {
    stops
        .iter()
        .filter(|stop| stop.due_complete)
        .max_by_key(|stop| stop.due)
}

/// Build the day-by-day schedule for the future stops.
///
/// Legs chain continuously from `origin` across day boundaries — the cursor
/// advances stop by stop and never resets — while each day's `total_nm`
/// sums only that day's legs. A stop without coordinates gets no leg and
/// leaves the cursor where it was.
///
/// When `include_empty_days` is set, every calendar day from `today` (or
/// the first stop's day, whichever is earlier) through the last stop's day
/// is materialized, so gaps in the plan are visible to whoever can fill
/// them.
pub fn schedule(
    stops: &[Stop],
    origin: Option<Point>,
    speed_knots: f64,
    today: Date,
    include_empty_days: bool,
) -> Vec<DaySchedule> {
    let future: Vec<&Stop> = stops
        .iter()
        .filter(|stop| !stop.due_complete && stop.due.is_some())
        .collect();

    let mut cursor = origin;
    let mut days: BTreeMap<Date, Vec<PlannedStop>> = BTreeMap::new();

    for (index, stop) in future.iter().enumerate() {
        let Some(due) = stop.due else { continue };
        let day = utc_date(due);

        let next_due = future.get(index + 1).and_then(|next| next.due);
        let hours_to_next = next_due.map(|next| hours_between(due, next));
        let overnight = next_due.is_some_and(|next| utc_date(next) != day);

        let leg = match (cursor, stop.point()) {
            (Some(from), Some(to)) => {
                let nm = geo::meters_to_nautical_miles(geo::distance_meters(
                    from.lat, from.lng, to.lat, to.lng,
                ));
                let eta_hours = (speed_knots > 0.0).then(|| nm / speed_knots);
                Some(Leg {
                    nm,
                    eta_hours,
                    eta: eta_hours.map(geo::format_duration).unwrap_or_default(),
                })
            }
            _ => None,
        };
        if let Some(point) = stop.point() {
            cursor = Some(point);
        }

        days.entry(day).or_default().push(PlannedStop {
            stop: (*stop).clone(),
            leg,
            hours_to_next,
            overnight,
        });
    }

    if include_empty_days {
        pad_calendar(&mut days, today);
    }

    days.into_iter()
        .map(|(date, stops)| {
            let total_nm = stops
                .iter()
                .filter_map(|planned| planned.leg.as_ref())
                .map(|leg| leg.nm)
                .sum();
            DaySchedule {
                date,
                stops,
                total_nm,
            }
        })
        .collect()
}

/// Materialize every day from `today` (or the first planned day, whichever
/// is earlier) through the last planned day.
fn pad_calendar(days: &mut BTreeMap<Date, Vec<PlannedStop>>, today: Date) {
    let Some((&first, _)) = days.first_key_value() else {
        return;
    };
    let Some((&last, _)) = days.last_key_value() else {
        return;
    };

    let mut day = today.min(first);
    while day <= last {
        days.entry(day).or_default();
        let Ok(next) = day.tomorrow() else { break };
        day = next;
    }
}

fn build_stop(card: &Card, snapshot: &BoardSnapshot) -> Stop {
    let (lat, lng) = fields::coordinates(card, &snapshot.custom_fields);
    Stop {
        id: card.id.clone(),
        name: card.name.clone(),
        list_name: list_name(card, snapshot),
        due: card.due,
        due_complete: card.due_complete,
        lat,
        lng,
        rating: fields::rating(card, &snapshot.custom_fields),
        labels: badges(card),
        trello_url: card.short_url.clone(),
        navily_url: fields::text_or_dropdown(card, &snapshot.custom_fields, fields::NAVILY),
    }
}

fn list_name(card: &Card, snapshot: &BoardSnapshot) -> String {
    snapshot
        .list_name(&card.id_list)
        .unwrap_or("Unknown")
        .to_string()
}

fn badges(card: &Card) -> Vec<LabelBadge> {
    card.labels
        .iter()
        .map(|label| LabelBadge {
            name: label.name.clone(),
            color: label_color(label.color.as_deref()).to_string(),
        })
        .collect()
}

fn utc_date(at: Timestamp) -> Date {
    at.to_zoned(TimeZone::UTC).date()
}

fn hours_between(from: Timestamp, to: Timestamp) -> f64 {
    to.duration_since(from).as_secs_f64() / 3600.0
}
