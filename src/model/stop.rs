//! Derived itinerary types: scheduled stops and candidate places.

use jiff::Timestamp;
use serde::Serialize;

use crate::geo::Point;

/// A card with a due date: a scheduled (or current) stop on the itinerary.
///
/// Recomputed on every fetch, never persisted. A stop with `due_complete`
/// set is the vessel's current location rather than a future plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub id: String,
    pub name: String,
    pub list_name: String,
    pub due: Option<Timestamp>,
    pub due_complete: bool,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<u8>,
    pub labels: Vec<LabelBadge>,
    pub trello_url: String,
    pub navily_url: Option<String>,
}

impl Stop {
    /// The stop's charted position, when both coordinates are set.
    pub fn point(&self) -> Option<Point> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Point { lat, lng }),
            _ => None,
        }
    }
}

/// A card without a due date but with charted coordinates: somewhere the
/// crew might go.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub list_name: String,
    pub lat: f64,
    pub lng: f64,
    pub rating: Option<u8>,
    pub labels: Vec<LabelBadge>,
    pub trello_url: String,
    pub navily_url: Option<String>,
}

/// A label rendered as a colored badge.
#[derive(Debug, Clone, Serialize)]
pub struct LabelBadge {
    pub name: String,
    pub color: String,
}

/// Trello's label color names mapped to the fixed hex palette.
/// Unknown or missing colors degrade to neutral gray.
pub fn label_color(name: Option<&str>) -> &'static str {
    match name {
        Some("green") => "#61bd4f",
        Some("yellow") => "#f2d600",
        Some("orange") => "#ff9f1a",
        Some("red") => "#eb5a46",
        Some("purple") => "#c377e0",
        Some("blue") => "#0079bf",
        Some("sky") => "#00c2e0",
        Some("lime") => "#51e898",
        Some("pink") => "#ff78cb",
        Some("black") => "#344563",
        _ => "#888",
    }
}
