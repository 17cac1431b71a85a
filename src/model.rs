//! Core data model: board input types and the derived voyage views.

mod board;
mod event;
mod payload;
mod status;
mod stop;
mod trip;

pub use board::{
    ActionCard, ActionData, BoardSnapshot, Card, CardFieldItem, CommentAction,
    CustomFieldDefinition, DropdownOption, DropdownText, FieldValue, Label, List, Member,
    TRIPS_LIST,
};
pub use event::{LogEvent, LogEventKind};
pub use payload::{
    BrokenItem, DaySchedule, ItineraryPayload, Leg, LogbookPayload, LongestStay, PlannedStop,
    RepairState, StatusPayload, Summary, TripsPayload,
};
pub use status::{EstimatedPosition, VoyageStatus};
pub use stop::{LabelBadge, Place, Stop, label_color};
pub use trip::{Trip, TripRange, TripYear};
