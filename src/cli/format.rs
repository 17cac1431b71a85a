//! Output formatting for CLI display.

use crate::model::{TripRange, VoyageStatus};

/// Format a trip window for human-readable display.
pub(super) fn format_range(range: &TripRange) -> String {
    match range.end {
        Some(end) => format!("{} → {}", range.start, end),
        None => format!("{} → (underway)", range.start),
    }
}

/// One-line status summary for stderr.
pub(super) fn format_status(status: &VoyageStatus) -> String {
    match status {
        VoyageStatus::Unknown => "Status unknown: no arrivals or departures logged".to_string(),
        VoyageStatus::Arrived { current } => format!("In port at {}", current.name),
        VoyageStatus::Underway {
            from,
            destination,
            departed_at,
        } => {
            let heading = match destination {
                Some(destination) => format!(" toward {}", destination.name),
                None => String::new(),
            };
            format!("Underway from {}{heading}, departed {departed_at}", from.name)
        }
    }
}

/// Planned distance for stderr summaries, e.g. "3 stops, 42.3 NM planned".
pub(super) fn format_planned_distance(total_nm: f64) -> String {
    format!("{total_nm:.1} NM planned")
}
