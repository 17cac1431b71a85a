//! Board input types, deserialized straight off the Trello wire.
//!
//! Read-only upstream data: the engine never mutates or persists these.
//! Cards in a snapshot are already filtered to open lists by the gateway.

use jiff::Timestamp;
use serde::Deserialize;

/// Name of the list whose cards record whole voyages rather than stops.
pub const TRIPS_LIST: &str = "Trips";

/// One card on the board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub name: String,
    pub id_list: String,
    #[serde(default)]
    pub due: Option<Timestamp>,
    #[serde(default)]
    pub due_complete: bool,
    /// Only cards in the Trips list carry a start.
    #[serde(default)]
    pub start: Option<Timestamp>,
    #[serde(default)]
    pub short_url: String,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub custom_field_items: Vec<CardFieldItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct List {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub member_type: String,
}

/// A board-level custom field definition, looked up by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldDefinition {
    pub id: String,
    pub name: String,
    /// Present only for dropdown fields.
    #[serde(default)]
    pub options: Option<Vec<DropdownOption>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DropdownOption {
    pub id: String,
    pub value: DropdownText,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DropdownText {
    pub text: String,
}

/// A card's value for one custom field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFieldItem {
    pub id_custom_field: String,
    #[serde(default)]
    pub value: Option<FieldValue>,
    /// Dropdown fields reference the chosen option by id instead.
    #[serde(default)]
    pub id_value: Option<String>,
}

/// Trello serializes numbers as JSON strings; accessors parse them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldValue {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// One action from the board's comment feed.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentAction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub date: Timestamp,
    #[serde(default)]
    pub data: ActionData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionData {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub card: Option<ActionCard>,
}

/// The card a comment was written on, as embedded in the action itself.
/// Survives even when the card has since been archived or deleted.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionCard {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Everything the engine derives from: one consistent read of the board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub cards: Vec<Card>,
    pub lists: Vec<List>,
    pub custom_fields: Vec<CustomFieldDefinition>,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl BoardSnapshot {
    /// Resolve a list id to its name.
    pub fn list_name(&self, id: &str) -> Option<&str> {
        self.lists
            .iter()
            .find(|list| list.id == id)
            .map(|list| list.name.as_str())
    }

    /// The id of the Trips list, when the board has one.
    pub fn trips_list_id(&self) -> Option<&str> {
        self.lists
            .iter()
            .find(|list| list.name == TRIPS_LIST)
            .map(|list| list.id.as_str())
    }

    /// Find an open card by id.
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }
}
