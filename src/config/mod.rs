// SPDX-License-Identifier: MPL-2.0
//! This module handles the player's configuration, including loading and saving
//! tuning values to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[controls]` - Overlay auto-hide delay
//! - `[gestures]` - Touch thresholds, skip zones and double-click timing
//! - `[playback]` - Initial volume, time-update throttling, speed presets
//!
//! Every field is optional. Missing values fall back to [`defaults`], and
//! out-of-range values are clamped when read through the accessor methods.
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with an explicit path
//! 2. Set the `TOUCHPLAY_CONFIG_DIR` environment variable
//! 3. Falls back to the platform-specific config directory
//!
//! Browser hosts have no file system; they embed the TOML with [`from_toml_str`].
//!
//! # Examples
//!
//! ```no_run
//! use touchplay::config::{self, PlayerConfig};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.controls.hide_delay_ms = Some(5000);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::video::{PlaybackSpeed, SkipStep, Volume};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "touchplay";
const CONFIG_DIR_ENV: &str = "TOUCHPLAY_CONFIG_DIR";

// =============================================================================
// Section Structs
// =============================================================================

/// Overlay controls settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ControlsConfig {
    /// Delay before the overlay hides while playing, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_delay_ms: Option<u64>,
}

/// Touch and click gesture settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    /// Distance a touch must travel before it becomes a drag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drag_threshold_px: Option<f64>,

    /// Vertical pixels for a full volume sweep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_sensitivity_px: Option<f64>,

    /// Width fraction of the left/right skip zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_zone_ratio: Option<f64>,

    /// Seconds skipped by an edge tap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_seconds: Option<f64>,

    /// Double-click detection window in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_click_ms: Option<u64>,
}

/// Playback settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Volume pushed to the media resource on mount (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_volume: Option<f64>,

    /// Whether the media resource starts muted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_muted: Option<bool>,

    /// Minimum interval between applied time-progress updates; 0 disables throttling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_update_throttle_ms: Option<u64>,

    /// Speeds offered by the settings menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_presets: Option<Vec<f64>>,
}

/// Complete player configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl PlayerConfig {
    /// Overlay auto-hide delay.
    #[must_use]
    pub fn controls_hide_delay(&self) -> Duration {
        let ms = self
            .controls
            .hide_delay_ms
            .unwrap_or(DEFAULT_CONTROLS_HIDE_DELAY_MS)
            .clamp(MIN_CONTROLS_HIDE_DELAY_MS, MAX_CONTROLS_HIDE_DELAY_MS);
        Duration::from_millis(ms)
    }

    #[must_use]
    pub fn drag_threshold_px(&self) -> f64 {
        positive_or(self.gestures.drag_threshold_px, DEFAULT_DRAG_THRESHOLD_PX)
    }

    #[must_use]
    pub fn volume_sensitivity_px(&self) -> f64 {
        positive_or(
            self.gestures.volume_sensitivity_px,
            DEFAULT_VOLUME_SENSITIVITY_PX,
        )
    }

    #[must_use]
    pub fn edge_zone_ratio(&self) -> f64 {
        self.gestures
            .edge_zone_ratio
            .filter(|r| r.is_finite())
            .unwrap_or(DEFAULT_EDGE_ZONE_RATIO)
            .clamp(0.0, MAX_EDGE_ZONE_RATIO)
    }

    #[must_use]
    pub fn skip_step(&self) -> SkipStep {
        SkipStep::new(self.gestures.skip_seconds.unwrap_or(DEFAULT_SKIP_SECONDS))
    }

    #[must_use]
    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(
            self.gestures
                .double_click_ms
                .unwrap_or(DEFAULT_DOUBLE_CLICK_MS),
        )
    }

    #[must_use]
    pub fn initial_volume(&self) -> Volume {
        Volume::new(self.playback.initial_volume.unwrap_or(DEFAULT_VOLUME))
    }

    #[must_use]
    pub fn initial_muted(&self) -> bool {
        self.playback.initial_muted.unwrap_or(false)
    }

    #[must_use]
    pub fn time_update_throttle(&self) -> Duration {
        Duration::from_millis(
            self.playback
                .time_update_throttle_ms
                .unwrap_or(DEFAULT_TIME_UPDATE_THROTTLE_MS),
        )
    }

    /// Valid speed presets in ascending order. Invalid entries are dropped;
    /// an empty result falls back to the defaults.
    #[must_use]
    pub fn speed_presets(&self) -> Vec<PlaybackSpeed> {
        let mut presets: Vec<PlaybackSpeed> = self
            .playback
            .speed_presets
            .as_deref()
            .unwrap_or(DEFAULT_SPEED_PRESETS)
            .iter()
            .filter_map(|&rate| PlaybackSpeed::try_new(rate))
            .collect();
        if presets.is_empty() {
            presets = DEFAULT_SPEED_PRESETS
                .iter()
                .filter_map(|&rate| PlaybackSpeed::try_new(rate))
                .collect();
        }
        presets.sort_by(|a, b| a.value().total_cmp(&b.value()));
        presets.dedup();
        presets
    }
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(default)
}

fn get_default_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<PlayerConfig> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(PlayerConfig::default())
}

pub fn save(config: &PlayerConfig) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Parses a TOML document. Invalid documents fall back to the defaults.
#[must_use]
pub fn from_toml_str(content: &str) -> PlayerConfig {
    match toml::from_str(content) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("Invalid player config, using defaults: {err}");
            PlayerConfig::default()
        }
    }
}

pub fn load_from_path(path: &Path) -> Result<PlayerConfig> {
    let content = fs::read_to_string(path)?;
    Ok(from_toml_str(&content))
}

pub fn save_to_path(config: &PlayerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
