//! Voyage log events, classified from card comments.

use jiff::Timestamp;
use serde::Serialize;

/// What a log comment records.
///
/// Tagged so each serialized event is self-describing; payload variants
/// carry what the classifier parsed out of the comment body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum LogEventKind {
    Arrived,
    Departed,
    Visited,
    Water,
    Diesel { litres: Option<f64> },
    Bins,
    #[serde(rename = "BBQ Gas Change")]
    BbqGasChange,
    #[serde(rename = "Gas Tank Change")]
    GasTankChange,
    Power,
    Boom,
    Broken { item: String },
    Fixed { item: String },
    #[serde(rename = "Sea Temperature")]
    SeaTemperature { degrees: Option<f64> },
}

/// One reconciled entry in the historical voyage log.
///
/// Immutable once classified. Ordering is always by `timestamp`: the
/// upstream comment feed arrives newest-first and is re-sorted downstream.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    #[serde(flatten)]
    pub kind: LogEventKind,
    pub timestamp: Timestamp,
    pub card_id: String,
    pub card_name: String,
    /// Name of the list the card lives on; "Unknown" for orphaned events.
    pub area: String,
    pub comment: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<u8>,
    pub trello_url: Option<String>,
    pub navily_url: Option<String>,
}

impl LogEvent {
    /// Arrivals and departures drive the status machine; everything else
    /// only enriches the log.
    pub fn is_movement(&self) -> bool {
        matches!(self.kind, LogEventKind::Arrived | LogEventKind::Departed)
    }
}
