//! Comment classification: free-text log comments become typed voyage events.
//!
//! Dispatch is an ordered, case-insensitive prefix match on the comment
//! body; first match wins and anything unmatched is simply not a log entry.
//! Multi-word markers sit ahead of any single word they could shadow.

use crate::extract::{extract_timestamp, strip_timestamp_label};
use crate::fields;
use crate::model::{BoardSnapshot, CommentAction, LogEvent, LogEventKind};

/// Classify one comment into a log event, or `None` when it isn't one.
///
/// Enrichment comes from the card the comment sits on. When that card no
/// longer exists upstream the event is still emitted — historical integrity
/// favors retention — with enrichment degraded to nulls and the name taken
/// from the comment's own embedded card reference.
pub fn classify_comment(action: &CommentAction, snapshot: &BoardSnapshot) -> Option<LogEvent> {
    if action.kind != "commentCard" {
        return None;
    }
    let text = action.data.text.as_deref()?;
    let kind = classify_kind(text)?;

    let embedded = action.data.card.as_ref();
    let card = embedded.and_then(|card| snapshot.card(&card.id));

    let card_id = embedded.map(|card| card.id.clone()).unwrap_or_default();
    let card_name = card
        .map(|card| card.name.clone())
        .or_else(|| embedded.and_then(|card| card.name.clone()))
        .unwrap_or_else(|| "Unknown".to_string());
    let area = card
        .and_then(|card| snapshot.list_name(&card.id_list))
        .unwrap_or("Unknown")
        .to_string();

    let (lat, lng) = card
        .map(|card| fields::coordinates(card, &snapshot.custom_fields))
        .unwrap_or((None, None));

    Some(LogEvent {
        kind,
        timestamp: extract_timestamp(text, action.date),
        card_id,
        card_name,
        area,
        comment: text.to_string(),
        lat,
        lng,
        rating: card.and_then(|card| fields::rating(card, &snapshot.custom_fields)),
        trello_url: card.map(|card| card.short_url.clone()),
        navily_url: card
            .and_then(|card| fields::text_or_dropdown(card, &snapshot.custom_fields, fields::NAVILY)),
    })
}

/// Classify a whole comment feed into events sorted ascending by timestamp.
///
/// The feed arrives newest-first; resolved timestamps may differ from feed
/// order entirely, so the result is re-sorted. The sort is stable, so
/// events sharing an instant keep their feed order.
pub fn classify_all(actions: &[CommentAction], snapshot: &BoardSnapshot) -> Vec<LogEvent> {
    let mut events: Vec<LogEvent> = actions
        .iter()
        .filter_map(|action| classify_comment(action, snapshot))
        .collect();
    events.sort_by_key(|event| event.timestamp);
    events
}

fn classify_kind(text: &str) -> Option<LogEventKind> {
    if strip_marker(text, "arrived").is_some() {
        return Some(LogEventKind::Arrived);
    }
    if strip_marker(text, "departed").is_some() {
        return Some(LogEventKind::Departed);
    }
    if strip_marker(text, "visited").is_some() {
        return Some(LogEventKind::Visited);
    }
    if strip_marker(text, "water").is_some() {
        return Some(LogEventKind::Water);
    }
    if let Some(rest) = strip_marker(text, "diesel") {
        return Some(LogEventKind::Diesel {
            litres: first_number(&strip_timestamp_label(rest)),
        });
    }
    if strip_marker(text, "bbq gas change").is_some() {
        return Some(LogEventKind::BbqGasChange);
    }
    if strip_marker(text, "gas tank change").is_some() {
        return Some(LogEventKind::GasTankChange);
    }
    if strip_marker(text, "bins").is_some() {
        return Some(LogEventKind::Bins);
    }
    if strip_marker(text, "power").is_some() {
        return Some(LogEventKind::Power);
    }
    if strip_marker(text, "boom").is_some() {
        return Some(LogEventKind::Boom);
    }
    if let Some(rest) = strip_marker(text, "broken") {
        return Some(LogEventKind::Broken {
            item: strip_timestamp_label(rest),
        });
    }
    if let Some(rest) = strip_marker(text, "fixed") {
        return Some(LogEventKind::Fixed {
            item: strip_timestamp_label(rest),
        });
    }
    if let Some(rest) = strip_marker(text, "sea temperature") {
        return Some(LogEventKind::SeaTemperature {
            degrees: first_number(&strip_timestamp_label(rest)),
        });
    }
    None
}

/// Match `marker` as a leading word (or words) of `text`, case-insensitive,
/// and return the remainder. The character after the marker must not be
/// alphanumeric, so "watering the plants" is not a Water entry.
fn strip_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let trimmed = text.trim_start();
    let head = trimmed.get(..marker.len())?;
    if !head.eq_ignore_ascii_case(marker) {
        return None;
    }
    let rest = &trimmed[marker.len()..];
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() => None,
        _ => Some(rest),
    }
}

/// First numeric token in `text`, e.g. the litres in "Diesel 80L".
fn first_number(text: &str) -> Option<f64> {
    text.split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|token| !token.is_empty())
        .find_map(|token| token.parse().ok())
}
