// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player. Constants are organized by category.
//!
//! # Categories
//!
//! - **Controls**: Overlay auto-hide timeout
//! - **Gestures**: Touch drag/tap thresholds
//! - **Playback**: Volume, speed and time-update defaults

// ==========================================================================
// Controls Defaults
// ==========================================================================

/// Default delay before the overlay controls hide while playing (in milliseconds).
pub const DEFAULT_CONTROLS_HIDE_DELAY_MS: u64 = 3000;

/// Minimum controls hide delay (in milliseconds).
pub const MIN_CONTROLS_HIDE_DELAY_MS: u64 = 500;

/// Maximum controls hide delay (in milliseconds).
pub const MAX_CONTROLS_HIDE_DELAY_MS: u64 = 30_000;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Displacement (in pixels) a touch must exceed before it becomes a drag.
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 20.0;

/// Vertical distance (in pixels) that maps to a full 0..1 volume sweep.
pub const DEFAULT_VOLUME_SENSITIVITY_PX: f64 = 300.0;

/// Fraction of the surface width on each side that acts as a skip zone.
pub const DEFAULT_EDGE_ZONE_RATIO: f64 = 0.25;

/// Largest allowed skip zone fraction (two zones must leave a center).
pub const MAX_EDGE_ZONE_RATIO: f64 = 0.45;

/// Seconds skipped by an edge tap.
pub const DEFAULT_SKIP_SECONDS: f64 = 10.0;

/// Maximum interval between two clicks to count as a double-click.
pub const DEFAULT_DOUBLE_CLICK_MS: u64 = 350;

// ==========================================================================
// Playback Defaults
// ==========================================================================

/// Volume applied to the media resource on mount (0.0 to 1.0).
pub const DEFAULT_VOLUME: f64 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f64 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f64 = 1.0;

/// Minimum interval between two applied time-progress updates (in milliseconds).
/// Zero disables throttling.
pub const DEFAULT_TIME_UPDATE_THROTTLE_MS: u64 = 250;

/// Playback speed presets offered to the settings menu.
pub const DEFAULT_SPEED_PRESETS: &[f64] = &[0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0];

/// Normal playback speed.
pub const DEFAULT_PLAYBACK_SPEED: f64 = 1.0;

// ==========================================================================
// Sources
// ==========================================================================

/// Label given to the quality option synthesized from a single URL source.
pub const SINGLE_SOURCE_LABEL: &str = "Auto";

/// Level given to the quality option synthesized from a single URL source.
pub const SINGLE_SOURCE_LEVEL: i32 = 720;
