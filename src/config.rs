//! Passage configuration.
//!
//! Loaded from `~/.passage/config.toml`. Board credentials are required for
//! anything to work; voyage parameters carry sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Passage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Trello board to mirror.
    #[serde(default)]
    pub board_id: String,

    /// Trello API key.
    #[serde(default)]
    pub api_key: String,

    /// Trello API token.
    #[serde(default)]
    pub api_token: String,

    /// Trello member id used for planning authorization.
    /// Without one, every session is view-only.
    #[serde(default)]
    pub member_id: Option<String>,

    /// Default cruising speed for ETA math, in knots.
    #[serde(default = "default_speed_knots")]
    pub speed_knots: f64,

    /// Fuel tank capacity for range estimation, in litres.
    #[serde(default = "default_tank_litres")]
    pub tank_litres: f64,
}

fn default_speed_knots() -> f64 {
    5.0
}

fn default_tank_litres() -> f64 {
    200.0
}

impl Config {
    /// Load config from `~/.passage/config.toml`.
    /// Returns an error if the file is missing or invalid.
    pub fn load() -> Result<Self, String> {
        let path = Self::path().ok_or("could not determine home directory")?;

        if !path.exists() {
            return Err(format!(
                "no config file found at {}\n\
                 Create one with at minimum:\n\n\
                 board-id = \"your-board-id\"\n\
                 api-key = \"your-trello-key\"\n\
                 api-token = \"your-trello-token\"",
                path.display()
            ));
        }

        Self::from_path(&path)
    }

    /// Load config from an explicit path.
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.passage/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".passage").join("config.toml"))
    }
}
