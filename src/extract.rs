//! Timestamp extraction from free-text log comments.
//!
//! Crew write log entries informally: "Arrived timestamp: 2025-07-07 10:30"
//! or just "Arrived 2025-07-07 10:30". The labeled form is searched first;
//! the bare form is consulted only when no label is present, so a second
//! date embedded incidentally in the text can never shadow a labeled one.
//! Offset-less timestamps are read as UTC, matching the upstream feed.

use std::sync::LazyLock;

use jiff::Timestamp;
use jiff::civil;
use jiff::tz::TimeZone;
use regex::{Captures, Regex};

// Date and time, space or `T` separated, seconds and offset optional.
// Group 1 is the civil part, group 2 the offset suffix.
const DATE_TIME: &str = r"(\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}(?::\d{2})?)(Z|[+-]\d{2}:?\d{2})?";

static LABELED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)timestamp\s*:\s*{DATE_TIME}")).expect("valid pattern")
});

static BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(DATE_TIME).expect("valid pattern"));

/// Extract an embedded timestamp from `text`, falling back to `fallback`.
///
/// Exactly one pattern is searched per call: the labeled match when present,
/// otherwise the first bare match. A match that names an invalid calendar
/// date falls back rather than erroring.
pub fn extract_timestamp(text: &str, fallback: Timestamp) -> Timestamp {
    LABELED
        .captures(text)
        .or_else(|| BARE.captures(text))
        .and_then(|caps| parse_instant(&caps))
        .unwrap_or(fallback)
}

/// Remove a labeled `timestamp: …` fragment from display text.
///
/// Used when a comment's remainder doubles as a human-facing label, e.g. the
/// item description in "Broken anchor light timestamp: 2025-07-07 10:30".
pub fn strip_timestamp_label(text: &str) -> String {
    LABELED.replace(text, "").trim().to_string()
}

fn parse_instant(caps: &Captures) -> Option<Timestamp> {
    let mut civil_part = caps.get(1)?.as_str().replacen(' ', "T", 1);
    if civil_part.len() == 16 {
        // Seconds omitted; pad to a full civil time.
        civil_part.push_str(":00");
    }
    let date_time: civil::DateTime = civil_part.parse().ok()?;

    match caps.get(2).map(|m| m.as_str()) {
        None => to_utc(date_time),
        Some(z) if z.eq_ignore_ascii_case("z") => to_utc(date_time),
        Some(offset) => {
            // Offsets may arrive without the colon; RFC 3339 wants one.
            let offset = if offset.contains(':') {
                offset.to_string()
            } else {
                format!("{}:{}", &offset[..3], &offset[3..])
            };
            format!("{date_time}{offset}").parse().ok()
        }
    }
}

fn to_utc(date_time: civil::DateTime) -> Option<Timestamp> {
    date_time
        .to_zoned(TimeZone::UTC)
        .ok()
        .map(|zoned| zoned.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    fn fallback() -> Timestamp {
        ts("2025-06-01T00:00:00Z")
    }

    #[test]
    fn parses_labeled_timestamp() {
        let got = extract_timestamp("Arrived timestamp: 2025-07-07 10:30", fallback());
        assert_eq!(got, ts("2025-07-07T10:30:00Z"));
    }

    #[test]
    fn label_is_case_insensitive() {
        let got = extract_timestamp("Arrived Timestamp: 2025-07-07 10:30", fallback());
        assert_eq!(got, ts("2025-07-07T10:30:00Z"));
    }

    #[test]
    fn parses_bare_timestamp() {
        let got = extract_timestamp("Arrived 2025-07-07 10:30", fallback());
        assert_eq!(got, ts("2025-07-07T10:30:00Z"));
    }

    #[test]
    fn labeled_wins_over_an_earlier_bare_date() {
        let text = "Arrived 2025-01-01 09:00 timestamp: 2025-07-07 10:30";
        let got = extract_timestamp(text, fallback());
        assert_eq!(got, ts("2025-07-07T10:30:00Z"));
    }

    #[test]
    fn keeps_explicit_seconds() {
        let got = extract_timestamp("Departed 2025-07-07T06:15:42", fallback());
        assert_eq!(got, ts("2025-07-07T06:15:42Z"));
    }

    #[test]
    fn honors_offset_suffix() {
        let got = extract_timestamp("Departed timestamp: 2025-07-07 10:30+02:00", fallback());
        assert_eq!(got, ts("2025-07-07T08:30:00Z"));
    }

    #[test]
    fn honors_offset_without_colon() {
        let got = extract_timestamp("Departed timestamp: 2025-07-07 10:30+0200", fallback());
        assert_eq!(got, ts("2025-07-07T08:30:00Z"));
    }

    #[test]
    fn falls_back_when_no_timestamp_present() {
        assert_eq!(extract_timestamp("Arrived", fallback()), fallback());
    }

    #[test]
    fn falls_back_on_invalid_calendar_date() {
        let got = extract_timestamp("Arrived timestamp: 2025-02-30 10:30", fallback());
        assert_eq!(got, fallback());
    }

    #[test]
    fn strips_labeled_fragment_from_text() {
        let got = strip_timestamp_label("anchor light timestamp: 2025-07-07 10:30");
        assert_eq!(got, "anchor light");
    }

    #[test]
    fn strip_leaves_unlabeled_text_alone() {
        assert_eq!(strip_timestamp_label("anchor light"), "anchor light");
    }
}
