//! Trip windows: which voyage the log is scoped to.

use std::collections::BTreeMap;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::model::{BoardSnapshot, LogEvent, Trip, TripRange, TripYear};

/// How a log view is scoped in time.
#[derive(Debug, Clone)]
pub enum LogScope {
    /// Default: the window of the most recent trip.
    MostRecentTrip,
    /// Everything, unscoped.
    All,
    /// An explicit window; open-ended when `end` is absent.
    Range {
        start: Timestamp,
        end: Option<Timestamp>,
    },
}

/// All voyages recorded in the Trips list.
pub fn trips(snapshot: &BoardSnapshot) -> Vec<Trip> {
    let Some(trips_list) = snapshot.trips_list_id() else {
        return Vec::new();
    };
    snapshot
        .cards
        .iter()
        .filter(|card| card.id_list == trips_list)
        .map(|card| Trip {
            name: card.name.clone(),
            start: card.start,
            due: card.due,
        })
        .collect()
}

/// The window of the most recent trip: the Trip card with the greatest
/// start. `None` when no Trip card has a start at all — which scopes the
/// default log view down to nothing, not to everything.
pub fn most_recent_range(trips: &[Trip]) -> Option<TripRange> {
    trips
        .iter()
        .filter_map(|trip| trip.start.map(|start| (start, trip.due)))
        .max_by_key(|(start, _)| *start)
        .map(|(start, end)| TripRange { start, end })
}

/// Filter a log to the requested scope.
pub fn scope_logs(
    logs: Vec<LogEvent>,
    scope: &LogScope,
    most_recent: Option<&TripRange>,
) -> Vec<LogEvent> {
    match scope {
        LogScope::All => logs,
        LogScope::Range { start, end } => {
            let range = TripRange {
                start: *start,
                end: *end,
            };
            logs.into_iter()
                .filter(|event| range.contains(event.timestamp))
                .collect()
        }
        LogScope::MostRecentTrip => match most_recent {
            Some(range) => logs
                .into_iter()
                .filter(|event| range.contains(event.timestamp))
                .collect(),
            None => Vec::new(),
        },
    }
}

/// Trips bucketed by the calendar year of their start (falling back to the
/// due date), newest year first. Undated trips land under "No Date".
pub fn by_year(trips: Vec<Trip>) -> Vec<TripYear> {
    let mut years: BTreeMap<String, Vec<Trip>> = BTreeMap::new();
    for trip in trips {
        let year = trip
            .start
            .or(trip.due)
            .map(|at| at.to_zoned(TimeZone::UTC).year().to_string())
            .unwrap_or_else(|| "No Date".to_string());
        years.entry(year).or_default().push(trip);
    }
    years
        .into_iter()
        .rev()
        .map(|(year, trips)| TripYear { year, trips })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogEventKind;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn trip(name: &str, start: Option<&str>, due: Option<&str>) -> Trip {
        Trip {
            name: name.into(),
            start: start.map(ts),
            due: due.map(ts),
        }
    }

    fn event(at: &str) -> LogEvent {
        LogEvent {
            kind: LogEventKind::Arrived,
            timestamp: ts(at),
            card_id: "c1".into(),
            card_name: "Somewhere".into(),
            area: "Unknown".into(),
            comment: "Arrived".into(),
            lat: None,
            lng: None,
            rating: None,
            trello_url: None,
            navily_url: None,
        }
    }

    #[test]
    fn most_recent_trip_wins_by_start() {
        let trips = vec![
            trip("Spring shakedown", Some("2025-05-01T00:00:00Z"), Some("2025-05-10T00:00:00Z")),
            trip("Summer cruise", Some("2025-07-01T00:00:00Z"), None),
            trip("Wishlist", None, None),
        ];
        let range = most_recent_range(&trips).unwrap();
        assert_eq!(range.start, ts("2025-07-01T00:00:00Z"));
        assert_eq!(range.end, None);
    }

    #[test]
    fn no_started_trips_means_no_range() {
        let trips = vec![trip("Wishlist", None, Some("2025-08-01T00:00:00Z"))];
        assert!(most_recent_range(&trips).is_none());
    }

    #[test]
    fn default_scope_filters_to_the_trip_window() {
        let range = TripRange {
            start: ts("2025-07-01T00:00:00Z"),
            end: Some(ts("2025-07-14T00:00:00Z")),
        };
        let logs = vec![
            event("2025-06-30T12:00:00Z"),
            event("2025-07-05T12:00:00Z"),
            event("2025-07-20T12:00:00Z"),
        ];
        let scoped = scope_logs(logs, &LogScope::MostRecentTrip, Some(&range));
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].timestamp, ts("2025-07-05T12:00:00Z"));
    }

    #[test]
    fn default_scope_without_a_range_shows_nothing() {
        let logs = vec![event("2025-07-05T12:00:00Z")];
        assert!(scope_logs(logs, &LogScope::MostRecentTrip, None).is_empty());
    }

    #[test]
    fn open_ended_range_keeps_everything_after_start() {
        let logs = vec![
            event("2025-06-30T12:00:00Z"),
            event("2025-09-01T12:00:00Z"),
        ];
        let scoped = scope_logs(
            logs,
            &LogScope::Range {
                start: ts("2025-07-01T00:00:00Z"),
                end: None,
            },
            None,
        );
        assert_eq!(scoped.len(), 1);
    }

    #[test]
    fn all_scope_is_untouched() {
        let logs = vec![event("2020-01-01T00:00:00Z"), event("2025-01-01T00:00:00Z")];
        assert_eq!(scope_logs(logs, &LogScope::All, None).len(), 2);
    }

    #[test]
    fn years_sort_newest_first_with_undated_trips_on_top() {
        let grouped = by_year(vec![
            trip("Old voyage", Some("2023-06-01T00:00:00Z"), None),
            trip("Summer cruise", Some("2025-07-01T00:00:00Z"), None),
            trip("Also 2025", None, Some("2025-08-15T00:00:00Z")),
            trip("Wishlist", None, None),
        ]);
        let years: Vec<&str> = grouped.iter().map(|y| y.year.as_str()).collect();
        assert_eq!(years, ["No Date", "2025", "2023"]);
        assert_eq!(grouped[1].trips.len(), 2);
    }
}
