//! Current voyage status, derived from the movement events in the log.

use jiff::Timestamp;

use crate::model::{LogEvent, LogEventKind, Place, Stop, VoyageStatus};

/// Derive the vessel's current status from the full classified event stream.
///
/// Only arrivals and departures are significant; the latest one by resolved
/// timestamp — never by feed order — decides the state. Pure function of
/// the event history: nothing is cached between queries.
pub fn derive_status(events: &[LogEvent], stops: &[Stop], places: &[Place]) -> VoyageStatus {
    let mut movements: Vec<&LogEvent> = events.iter().filter(|e| e.is_movement()).collect();
    movements.sort_by_key(|event| event.timestamp);

    let Some(last) = movements.last() else {
        return VoyageStatus::Unknown;
    };

    match last.kind {
        LogEventKind::Departed => VoyageStatus::Underway {
            from: resolve_stop(last, stops, places),
            destination: next_destination(stops, last.timestamp),
            departed_at: last.timestamp,
        },
        // Movements are only ever Arrived or Departed.
        _ => VoyageStatus::Arrived {
            current: resolve_stop(last, stops, places),
        },
    }
}

/// Resolve the card an event points at against the live itinerary, falling
/// back to the event's own snapshot when the card is gone upstream.
fn resolve_stop(event: &LogEvent, stops: &[Stop], places: &[Place]) -> Stop {
    if let Some(stop) = stops.iter().find(|stop| stop.id == event.card_id) {
        return stop.clone();
    }
    if let Some(place) = places.iter().find(|place| place.id == event.card_id) {
        return Stop {
            id: place.id.clone(),
            name: place.name.clone(),
            list_name: place.list_name.clone(),
            due: None,
            due_complete: false,
            lat: Some(place.lat),
            lng: Some(place.lng),
            rating: place.rating,
            labels: place.labels.clone(),
            trello_url: place.trello_url.clone(),
            navily_url: place.navily_url.clone(),
        };
    }
    Stop {
        id: event.card_id.clone(),
        name: event.card_name.clone(),
        list_name: event.area.clone(),
        due: None,
        due_complete: false,
        lat: event.lat,
        lng: event.lng,
        rating: event.rating,
        labels: Vec::new(),
        trello_url: event.trello_url.clone().unwrap_or_default(),
        navily_url: event.navily_url.clone(),
    }
}

/// The next planned stop after the departure instant, by due date.
fn next_destination(stops: &[Stop], departed_at: Timestamp) -> Option<Stop> {
    stops
        .iter()
        .filter(|stop| !stop.due_complete)
        .filter(|stop| stop.due.is_some_and(|due| due > departed_at))
        .min_by_key(|stop| stop.due)
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn movement(kind: LogEventKind, card_id: &str, at: &str) -> LogEvent {
        LogEvent {
            kind,
            timestamp: ts(at),
            card_id: card_id.into(),
            card_name: format!("Card {card_id}"),
            area: "Archipelago".into(),
            comment: String::new(),
            lat: Some(60.0),
            lng: Some(20.0),
            rating: None,
            trello_url: Some(format!("https://trello.com/c/{card_id}")),
            navily_url: None,
        }
    }

    fn stop(id: &str, due: Option<&str>, due_complete: bool) -> Stop {
        Stop {
            id: id.into(),
            name: format!("Stop {id}"),
            list_name: "Åland".into(),
            due: due.map(ts),
            due_complete,
            lat: Some(60.0),
            lng: Some(20.0),
            rating: None,
            labels: Vec::new(),
            trello_url: format!("https://trello.com/c/{id}"),
            navily_url: None,
        }
    }

    #[test]
    fn empty_stream_is_unknown() {
        let status = derive_status(&[], &[], &[]);
        assert!(matches!(status, VoyageStatus::Unknown));
    }

    #[test]
    fn departed_then_arrived_resolves_to_arrived() {
        let events = vec![
            movement(LogEventKind::Departed, "c-a", "2025-07-07T06:00:00Z"),
            movement(LogEventKind::Arrived, "c-b", "2025-07-07T12:00:00Z"),
        ];
        let stops = vec![stop("c-b", Some("2025-07-07T12:00:00Z"), true)];

        let status = derive_status(&events, &stops, &[]);
        let VoyageStatus::Arrived { current } = status else {
            panic!("expected arrived");
        };
        assert_eq!(current.id, "c-b");
    }

    #[test]
    fn lone_departure_is_underway() {
        let events = vec![movement(LogEventKind::Departed, "c-a", "2025-07-07T06:00:00Z")];
        let status = derive_status(&events, &[], &[]);
        let VoyageStatus::Underway {
            from, departed_at, ..
        } = status
        else {
            panic!("expected underway");
        };
        assert_eq!(from.id, "c-a");
        assert_eq!(departed_at, ts("2025-07-07T06:00:00Z"));
    }

    #[test]
    fn latest_event_wins_by_timestamp_not_feed_order() {
        // Arrival listed first but timestamped earlier: still underway.
        let events = vec![
            movement(LogEventKind::Arrived, "c-a", "2025-07-07T06:00:00Z"),
            movement(LogEventKind::Departed, "c-a", "2025-07-07T09:00:00Z"),
        ];
        let status = derive_status(&events, &[], &[]);
        assert!(matches!(status, VoyageStatus::Underway { .. }));
    }

    #[test]
    fn underway_destination_is_next_stop_by_due() {
        let events = vec![movement(LogEventKind::Departed, "c-a", "2025-07-07T06:00:00Z")];
        let stops = vec![
            stop("c-past", Some("2025-07-06T10:00:00Z"), false),
            stop("c-next", Some("2025-07-07T12:00:00Z"), false),
            stop("c-later", Some("2025-07-09T12:00:00Z"), false),
        ];
        let status = derive_status(&events, &stops, &[]);
        let VoyageStatus::Underway { destination, .. } = status else {
            panic!("expected underway");
        };
        assert_eq!(destination.unwrap().id, "c-next");
    }

    #[test]
    fn underway_without_a_later_stop_has_no_destination() {
        let events = vec![movement(LogEventKind::Departed, "c-a", "2025-07-07T06:00:00Z")];
        let stops = vec![stop("c-past", Some("2025-07-06T10:00:00Z"), false)];
        let status = derive_status(&events, &stops, &[]);
        let VoyageStatus::Underway { destination, .. } = status else {
            panic!("expected underway");
        };
        assert!(destination.is_none());
    }

    #[test]
    fn arrival_at_an_orphaned_card_keeps_the_event_snapshot() {
        let events = vec![movement(LogEventKind::Arrived, "c-gone", "2025-07-07T12:00:00Z")];
        let status = derive_status(&events, &[], &[]);
        let VoyageStatus::Arrived { current } = status else {
            panic!("expected arrived");
        };
        assert_eq!(current.id, "c-gone");
        assert_eq!(current.name, "Card c-gone");
        assert_eq!(current.lat, Some(60.0));
    }

    #[test]
    fn arrival_resolves_against_places_too() {
        let events = vec![movement(LogEventKind::Arrived, "c-place", "2025-07-07T12:00:00Z")];
        let places = vec![Place {
            id: "c-place".into(),
            name: "Sandhamn".into(),
            list_name: "Stockholm".into(),
            lat: 59.2892,
            lng: 18.9190,
            rating: Some(5),
            labels: Vec::new(),
            trello_url: "https://trello.com/c/place".into(),
            navily_url: None,
        }];
        let status = derive_status(&events, &[], &places);
        let VoyageStatus::Arrived { current } = status else {
            panic!("expected arrived");
        };
        assert_eq!(current.name, "Sandhamn");
        assert_eq!(current.rating, Some(5));
    }
}
