//! Configuration stored in ~/.hackscout/config.json.
//!
//! Every field has a default, so a missing or partial file is fine. The
//! matching thresholds and judging window are tunables with deliberate
//! defaults; changing them changes which candidates merge.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per record (JsonStore backend).
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub matching: MatchThresholds,
    /// Days after the submission deadline a record stays in `judging` when
    /// no results date is known.
    #[serde(default = "default_judging_window_days")]
    pub judging_window_days: i64,
    /// Candidates below this confidence are skipped before reconciliation.
    /// 0.0 disables the gate; the web-discovery collector historically ran
    /// with 0.5.
    #[serde(default)]
    pub min_confidence: f64,
}

/// Name-similarity thresholds for the duplicate resolver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchThresholds {
    /// Bar for a name match corroborated by organizer or deadline.
    #[serde(default = "default_corroborated")]
    pub corroborated: f64,
    /// Bar for a name match with no corroboration at all.
    #[serde(default = "default_strong")]
    pub strong: f64,
}

fn default_data_dir() -> String {
    "data/hackathons".to_string()
}

fn default_judging_window_days() -> i64 {
    14
}

fn default_corroborated() -> f64 {
    0.85
}

fn default_strong() -> f64 {
    0.95
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            corroborated: default_corroborated(),
            strong: default_strong(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            matching: MatchThresholds::default(),
            judging_window_days: default_judging_window_days(),
            min_confidence: 0.0,
        }
    }
}

impl Config {
    /// Default config file location: `~/.hackscout/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".hackscout").join("config.json"))
    }

    /// Load the config from the default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, String> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load the config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))
    }
}
