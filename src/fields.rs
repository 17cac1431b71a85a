//! Typed access to Trello custom fields.
//!
//! Field definitions live at board level and are looked up by exact name.
//! A board without a given definition is normal, not an error: every
//! accessor is total over malformed input and degrades to `None` on any
//! missing link in the chain.

use crate::model::{Card, CustomFieldDefinition};

pub const LATITUDE: &str = "Latitude";
pub const LONGITUDE: &str = "Longitude";
pub const RATING: &str = "⭐️";
pub const NAVILY: &str = "Navily";

/// Numeric custom field value for `name`, if the card has one.
///
/// Trello serializes numbers as JSON strings; unparseable values read as
/// unset.
pub fn number(card: &Card, defs: &[CustomFieldDefinition], name: &str) -> Option<f64> {
    let def = defs.iter().find(|def| def.name == name)?;
    let item = card
        .custom_field_items
        .iter()
        .find(|item| item.id_custom_field == def.id)?;
    item.value.as_ref()?.number.as_deref()?.trim().parse().ok()
}

/// Text custom field value for `name`, resolving dropdown fields to their
/// chosen option's display text.
pub fn text_or_dropdown(card: &Card, defs: &[CustomFieldDefinition], name: &str) -> Option<String> {
    let def = defs.iter().find(|def| def.name == name)?;
    let item = card
        .custom_field_items
        .iter()
        .find(|item| item.id_custom_field == def.id)?;

    if let Some(text) = item.value.as_ref().and_then(|value| value.text.clone()) {
        return Some(text);
    }

    let id_value = item.id_value.as_ref()?;
    def.options
        .as_ref()?
        .iter()
        .find(|option| &option.id == id_value)
        .map(|option| option.value.text.clone())
}

/// The star-rating field as a 1–5 integer.
pub fn rating(card: &Card, defs: &[CustomFieldDefinition]) -> Option<u8> {
    text_or_dropdown(card, defs, RATING)?.trim().parse().ok()
}

/// Both coordinates, when the card is charted.
pub fn coordinates(card: &Card, defs: &[CustomFieldDefinition]) -> (Option<f64>, Option<f64>) {
    (
        number(card, defs, LATITUDE),
        number(card, defs, LONGITUDE),
    )
}
