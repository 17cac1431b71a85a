//! CLI interface for Passage.
//!
//! Non-interactive subcommands: arguments in, JSON payloads out. Each
//! payload goes to stdout via pretty-printed JSON; human-readable progress
//! and summaries go to stderr. Every command re-derives its view from a
//! fresh board snapshot — nothing is cached between invocations.

mod format;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};

use crate::board::{self, BoardGateway};
use crate::classify;
use crate::config::Config;
use crate::itinerary;
use crate::model::{
    BoardSnapshot, EstimatedPosition, ItineraryPayload, LogEvent, LogbookPayload, StatusPayload,
    Stop, TripsPayload, VoyageStatus,
};
use crate::reckoning;
use crate::summary;
use crate::trips::{self, LogScope};
use crate::voyage;

use format::{format_planned_distance, format_range, format_status};

/// Passage — a captain's log over a Trello board.
#[derive(Debug, Parser)]
#[command(name = "passage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// The planned itinerary: stops, places, and the day-by-day schedule.
    Itinerary {
        /// Cruising speed in knots. Defaults to the configured speed.
        #[arg(long)]
        speed: Option<f64>,
    },

    /// The historical voyage log, scoped to the most recent trip by default.
    Logbook {
        /// Show the full log, unscoped.
        #[arg(long)]
        all: bool,

        /// Scope start (RFC 3339 instant).
        #[arg(long, conflicts_with = "all")]
        start: Option<Timestamp>,

        /// Scope end (RFC 3339 instant). Open-ended when omitted.
        #[arg(long, requires = "start")]
        end: Option<Timestamp>,
    },

    /// Historical trips grouped by year.
    Trips,

    /// Current voyage status, with a dead-reckoned position when underway.
    Status {
        /// Cruising speed in knots. Defaults to the configured speed.
        #[arg(long)]
        speed: Option<f64>,
    },

    /// Trip rollups: distance, underway time, fuel, stays, open breakages.
    Summary {
        /// Roll up the full log instead of the most recent trip.
        #[arg(long)]
        all: bool,
    },

    /// Schedule a stop by setting its card's due date.
    Plan {
        /// Card to schedule.
        card_id: String,

        /// Due instant (RFC 3339).
        due: Timestamp,
    },

    /// Unschedule a stop by clearing its card's due date.
    Unplan {
        /// Card to unschedule.
        card_id: String,
    },

    /// Apply a batch of due-date updates: a JSON array of
    /// `{"cardId": "...", "due": "..."}` objects.
    Reorder {
        /// Read updates from this file instead of stdin.
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// One entry in a reorder batch.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReorderUpdate {
    card_id: String,
    due: Timestamp,
}

/// Run the CLI, returning an error message on failure.
pub fn run<G: BoardGateway>(config: &Config, gateway: &G) -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Itinerary { speed } => cmd_itinerary(config, gateway, speed),
        Command::Logbook { all, start, end } => {
            cmd_logbook(gateway, scope_from_args(all, start, end))
        }
        Command::Trips => cmd_trips(gateway),
        Command::Status { speed } => cmd_status(config, gateway, speed),
        Command::Summary { all } => cmd_summary(config, gateway, all),
        Command::Plan { card_id, due } => cmd_plan(config, gateway, &card_id, due),
        Command::Unplan { card_id } => cmd_unplan(config, gateway, &card_id),
        Command::Reorder { file } => cmd_reorder(config, gateway, file.as_deref()),
    }
}

fn scope_from_args(all: bool, start: Option<Timestamp>, end: Option<Timestamp>) -> LogScope {
    if all {
        LogScope::All
    } else if let Some(start) = start {
        LogScope::Range { start, end }
    } else {
        LogScope::MostRecentTrip
    }
}

fn cmd_itinerary<G: BoardGateway>(
    config: &Config,
    gateway: &G,
    speed: Option<f64>,
) -> Result<(), String> {
    let snapshot = fetch_snapshot(gateway)?;
    let stops = itinerary::stops(&snapshot);
    let places = itinerary::places(&snapshot);
    let can_plan = board::can_plan(&snapshot.members, config.member_id.as_deref());

    let speed = speed.unwrap_or(config.speed_knots);
    let origin = itinerary::current_stop(&stops).and_then(Stop::point);
    let today = Timestamp::now().to_zoned(TimeZone::UTC).date();
    let schedule = itinerary::schedule(&stops, origin, speed, today, can_plan);

    let planned_nm: f64 = schedule.iter().map(|day| day.total_nm).sum();
    eprintln!(
        "{} stops, {} places, {}",
        stops.len(),
        places.len(),
        format_planned_distance(planned_nm)
    );
    print_json(&ItineraryPayload {
        stops,
        places,
        can_plan,
        schedule,
    })
}

fn cmd_logbook<G: BoardGateway>(gateway: &G, scope: LogScope) -> Result<(), String> {
    let snapshot = fetch_snapshot(gateway)?;
    let events = load_log(gateway, &snapshot)?;

    let trip_cards = trips::trips(&snapshot);
    let most_recent = trips::most_recent_range(&trip_cards);
    let logs = trips::scope_logs(events, &scope, most_recent.as_ref());

    if let Some(range) = &most_recent {
        eprintln!("Most recent trip: {}", format_range(range));
    }
    print_json(&LogbookPayload {
        logs,
        most_recent_trip_range: most_recent,
    })
}

fn cmd_trips<G: BoardGateway>(gateway: &G) -> Result<(), String> {
    let snapshot = fetch_snapshot(gateway)?;
    let years = trips::by_year(trips::trips(&snapshot));
    print_json(&TripsPayload { years })
}

fn cmd_status<G: BoardGateway>(
    config: &Config,
    gateway: &G,
    speed: Option<f64>,
) -> Result<(), String> {
    let snapshot = fetch_snapshot(gateway)?;
    let events = load_log(gateway, &snapshot)?;
    let stops = itinerary::stops(&snapshot);
    let places = itinerary::places(&snapshot);

    let status = voyage::derive_status(&events, &stops, &places);
    let speed = speed.unwrap_or(config.speed_knots);
    let position = underway_position(&status, speed, Timestamp::now());

    eprintln!("{}", format_status(&status));
    print_json(&StatusPayload { status, position })
}

/// Dead-reckon only when underway with both endpoints charted.
fn underway_position(
    status: &VoyageStatus,
    speed_knots: f64,
    now: Timestamp,
) -> Option<EstimatedPosition> {
    let VoyageStatus::Underway {
        from,
        destination: Some(destination),
        departed_at,
    } = status
    else {
        return None;
    };
    let (from, to) = (from.point()?, destination.point()?);
    Some(reckoning::expected_position(
        from,
        to,
        *departed_at,
        speed_knots,
        now,
    ))
}

fn cmd_summary<G: BoardGateway>(config: &Config, gateway: &G, all: bool) -> Result<(), String> {
    let snapshot = fetch_snapshot(gateway)?;
    let events = load_log(gateway, &snapshot)?;

    let trip_cards = trips::trips(&snapshot);
    let most_recent = trips::most_recent_range(&trip_cards);
    let scope = if all {
        LogScope::All
    } else {
        LogScope::MostRecentTrip
    };
    let scoped = trips::scope_logs(events, &scope, most_recent.as_ref());

    print_json(&summary::summarize(&scoped, config.tank_litres))
}

fn cmd_plan<G: BoardGateway>(
    config: &Config,
    gateway: &G,
    card_id: &str,
    due: Timestamp,
) -> Result<(), String> {
    ensure_can_plan(config, gateway)?;
    gateway
        .plan_stop(card_id, due)
        .map_err(|e| format!("failed to plan stop: {e}"))?;
    eprintln!("Planned {card_id} for {due}");
    Ok(())
}

fn cmd_unplan<G: BoardGateway>(config: &Config, gateway: &G, card_id: &str) -> Result<(), String> {
    ensure_can_plan(config, gateway)?;
    gateway
        .remove_stop(card_id)
        .map_err(|e| format!("failed to unplan stop: {e}"))?;
    eprintln!("Unplanned {card_id}");
    Ok(())
}

fn cmd_reorder<G: BoardGateway>(
    config: &Config,
    gateway: &G,
    file: Option<&std::path::Path>,
) -> Result<(), String> {
    ensure_can_plan(config, gateway)?;

    let raw = match file {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| format!("failed to read {}: {e}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            buffer
        }
    };

    let updates: Vec<ReorderUpdate> =
        serde_json::from_str(&raw).map_err(|e| format!("invalid reorder updates: {e}"))?;
    if updates.is_empty() {
        return Err("no updates to apply".to_string());
    }

    let updates: Vec<(String, Timestamp)> = updates
        .into_iter()
        .map(|update| (update.card_id, update.due))
        .collect();
    gateway
        .reorder_stops(&updates)
        .map_err(|e| format!("failed to reorder stops: {e}"))?;

    eprintln!("Reordered {} stops", updates.len());
    Ok(())
}

/// Reject a write-back before any mutation when the session can't plan.
fn ensure_can_plan<G: BoardGateway>(config: &Config, gateway: &G) -> Result<(), String> {
    let snapshot = fetch_snapshot(gateway)?;
    if board::can_plan(&snapshot.members, config.member_id.as_deref()) {
        Ok(())
    } else {
        Err("not authorized to plan: the configured member is not an admin or normal member of the board".to_string())
    }
}

fn fetch_snapshot<G: BoardGateway>(gateway: &G) -> Result<BoardSnapshot, String> {
    gateway
        .fetch_snapshot()
        .map_err(|e| format!("failed to fetch board: {e}"))
}

/// Load and classify the full comment history, reporting page progress.
fn load_log<G: BoardGateway>(
    gateway: &G,
    snapshot: &BoardSnapshot,
) -> Result<Vec<LogEvent>, String> {
    let cancel = AtomicBool::new(false);
    let mut fetched = 0usize;
    let actions = board::collect_comments(gateway, &cancel, |page| {
        fetched += page.len();
        eprintln!("Fetched {fetched} comments…");
    })
    .map_err(|e| format!("failed to load the comment history: {e}"))?;

    Ok(classify::classify_all(&actions, snapshot))
}

fn print_json<T: Serialize>(payload: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| format!("failed to serialize payload: {e}"))?;
    println!("{json}");
    Ok(())
}
