//! Run configuration for the terminal front-end.
//!
//! Values come from a JSON file named by `POLYFALL_CONFIG`, or else from
//! individual environment variables:
//!
//! - `POLYFALL_WIDTH`, `POLYFALL_HEIGHT`: board size (default 10x20)
//! - `POLYFALL_BLOCK_SIZES`: comma-separated piece sizes (default "4")
//! - `POLYFALL_CORNERS`: "1"/"true" to connect cells diagonally
//! - `POLYFALL_LOOP_X`: "1"/"true" to wrap the side walls
//! - `POLYFALL_SEED`: piece RNG seed
//! - `POLYFALL_FALL_INTERVAL`: seconds per row of gravity (default 1.0)
//! - `POLYFALL_TICK_MS`: frame interval (default 16)
//!
//! Unparsable values fall back to their defaults.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::BoardConfig;
use crate::types::{DEFAULT_FALL_INTERVAL_SECS, TICK_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub board: BoardConfig,
    pub fall_interval_secs: f64,
    pub tick_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            fall_interval_secs: DEFAULT_FALL_INTERVAL_SECS,
            tick_ms: TICK_MS as u64,
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Look up `key` and parse it; present but unusable values are logged
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let value = parse(raw.trim());
    if value.is_none() {
        log::warn!("ignoring {}={:?}, using the default", key, raw);
    }
    value
}

/// Parse "4" or "3, 4,5"; `None` if any entry is not a number
pub fn parse_sizes(s: &str) -> Option<Vec<usize>> {
    let sizes: Option<Vec<usize>> = s
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect();
    sizes.filter(|v| !v.is_empty())
}

impl RunConfig {
    /// Load from `POLYFALL_CONFIG` if set, otherwise from environment variables
    pub fn load() -> Result<Self> {
        match env::var("POLYFALL_CONFIG") {
            Ok(path) if !path.trim().is_empty() => {
                log::info!("loading run configuration from {}", path.trim());
                Self::from_json_file(path.trim())
            }
            _ => Ok(Self::from_env()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map, ...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let board = defaults.board.clone();

        let number = |key: &str| parse_var(&lookup, key, |s| s.parse::<usize>().ok());
        let flag = |key: &str| parse_var(&lookup, key, parse_bool);

        let board = BoardConfig {
            width: number("POLYFALL_WIDTH").unwrap_or(board.width),
            height: number("POLYFALL_HEIGHT").unwrap_or(board.height),
            block_sizes: parse_var(&lookup, "POLYFALL_BLOCK_SIZES", parse_sizes)
                .unwrap_or(board.block_sizes),
            corner_allowed: flag("POLYFALL_CORNERS").unwrap_or(board.corner_allowed),
            loop_x: flag("POLYFALL_LOOP_X").unwrap_or(board.loop_x),
            seed: parse_var(&lookup, "POLYFALL_SEED", |s| s.parse::<u32>().ok())
                .unwrap_or(board.seed),
        };

        let fall_interval_secs = parse_var(&lookup, "POLYFALL_FALL_INTERVAL", |s| {
            s.parse::<f64>().ok().filter(|v| *v > 0.0)
        })
        .unwrap_or(defaults.fall_interval_secs);

        let tick_ms = parse_var(&lookup, "POLYFALL_TICK_MS", |s| {
            s.parse::<u64>().ok().filter(|v| *v > 0)
        })
        .unwrap_or(defaults.tick_ms);

        Self {
            board,
            fall_interval_secs,
            tick_ms,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("invalid run configuration JSON")
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}
