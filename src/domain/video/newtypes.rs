// SPDX-License-Identifier: MPL-2.0
//! Video playback newtypes.
//!
//! This module provides type-safe wrappers for video playback values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Volume
// =============================================================================

/// Volume bounds (0.0 to 1.0, the range a media element accepts).
pub mod volume_bounds {
    /// Minimum volume level.
    pub const MIN: f64 = 0.0;
    /// Maximum volume level.
    pub const MAX: f64 = 1.0;
}

/// Volume level, guaranteed to be within valid range (0.0–1.0).
///
/// Out-of-range and non-finite input is clamped, never rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f64);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    #[must_use]
    pub fn new(volume: f64) -> Self {
        if volume.is_nan() {
            return Self(volume_bounds::MIN);
        }
        Self(volume.clamp(volume_bounds::MIN, volume_bounds::MAX))
    }

    /// Returns the volume value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true if the level is exactly silent.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 <= volume_bounds::MIN
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(volume_bounds::MAX)
    }
}

// =============================================================================
// PlaybackSpeed
// =============================================================================

/// Playback speed multiplier, guaranteed finite and strictly positive.
///
/// Unlike [`Volume`], invalid speeds are rejected rather than clamped: a zero
/// or negative rate is a caller bug that must never reach the media resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    /// Normal playback speed.
    pub const NORMAL: Self = Self(1.0);

    /// Returns `None` for zero, negative or non-finite rates.
    #[must_use]
    pub fn try_new(rate: f64) -> Option<Self> {
        (rate.is_finite() && rate > 0.0).then_some(Self(rate))
    }

    /// Returns the speed value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Menu label: "Normal" for 1x, otherwise the multiplier ("1.5x", "2x").
    #[must_use]
    pub fn label(self) -> String {
        if (self.0 - 1.0).abs() < 0.001 {
            "Normal".to_string()
        } else {
            format!("{}x", self.0)
        }
    }

    /// Returns the next higher preset, or self if none is higher.
    #[must_use]
    pub fn increase(self, presets: &[PlaybackSpeed]) -> Self {
        presets
            .iter()
            .find(|s| s.0 > self.0 + 0.001)
            .copied()
            .unwrap_or(self)
    }

    /// Returns the next lower preset, or self if none is lower.
    #[must_use]
    pub fn decrease(self, presets: &[PlaybackSpeed]) -> Self {
        presets
            .iter()
            .rev()
            .find(|s| s.0 < self.0 - 0.001)
            .copied()
            .unwrap_or(self)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self::NORMAL
    }
}

// =============================================================================
// SkipStep
// =============================================================================

/// Skip step bounds (1 to 60 seconds).
pub mod skip_step_bounds {
    /// Minimum skip step in seconds.
    pub const MIN: f64 = 1.0;
    /// Maximum skip step in seconds.
    pub const MAX: f64 = 60.0;
    /// Default skip step in seconds.
    pub const DEFAULT: f64 = 10.0;
}

/// Distance in seconds covered by an edge tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkipStep(f64);

impl SkipStep {
    /// Creates a new skip step, clamping to valid range.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        Self(value.clamp(skip_step_bounds::MIN, skip_step_bounds::MAX))
    }

    /// Returns the value as f64.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SkipStep {
    fn default() -> Self {
        Self(skip_step_bounds::DEFAULT)
    }
}
