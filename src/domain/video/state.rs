// SPDX-License-Identifier: MPL-2.0
//! The normalized player state record and its partial updates.

use super::quality::QualityOption;

/// Everything a renderer needs to draw the player.
///
/// Resource-derived fields (`playing`, `muted`, `volume`, `current_time`,
/// `duration`, `buffered`, `fullscreen`) are written from environment events
/// only. Commands write `quality`, `show_controls` and `loading` during a
/// quality switch.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub playing: bool,
    pub muted: bool,
    /// In `[0, 1]`.
    pub volume: f64,
    /// Seconds, `>= 0`.
    pub current_time: f64,
    /// Seconds, `0` while unknown.
    pub duration: f64,
    /// End of the furthest buffered range, in seconds.
    pub buffered: f64,
    pub fullscreen: bool,
    pub quality: Option<QualityOption>,
    pub show_controls: bool,
    pub loading: bool,
}

impl PlayerState {
    /// State of a freshly created player: paused, loading, controls shown.
    #[must_use]
    pub fn initial(quality: Option<QualityOption>) -> Self {
        Self {
            playing: false,
            muted: false,
            volume: 1.0,
            current_time: 0.0,
            duration: 0.0,
            buffered: 0.0,
            fullscreen: false,
            quality,
            show_controls: true,
            loading: true,
        }
    }

    /// Whether the duration has been reported yet.
    #[must_use]
    pub fn duration_known(&self) -> bool {
        self.duration > 0.0
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::initial(None)
    }
}

/// A partial update: `None` leaves the field untouched.
///
/// There is no way to express "unset" for a field, so a [`PlayerState`]
/// never loses a value through an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub playing: Option<bool>,
    pub muted: Option<bool>,
    pub volume: Option<f64>,
    pub current_time: Option<f64>,
    pub duration: Option<f64>,
    pub buffered: Option<f64>,
    pub fullscreen: Option<bool>,
    pub quality: Option<QualityOption>,
    pub show_controls: Option<bool>,
    pub loading: Option<bool>,
}

impl StateUpdate {
    #[must_use]
    pub fn playing(mut self, playing: bool) -> Self {
        self.playing = Some(playing);
        self
    }

    #[must_use]
    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = Some(muted);
        self
    }

    #[must_use]
    pub fn volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    #[must_use]
    pub fn current_time(mut self, seconds: f64) -> Self {
        self.current_time = Some(seconds);
        self
    }

    #[must_use]
    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = Some(seconds);
        self
    }

    #[must_use]
    pub fn buffered(mut self, seconds: f64) -> Self {
        self.buffered = Some(seconds);
        self
    }

    #[must_use]
    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = Some(fullscreen);
        self
    }

    #[must_use]
    pub fn quality(mut self, quality: QualityOption) -> Self {
        self.quality = Some(quality);
        self
    }

    #[must_use]
    pub fn show_controls(mut self, show: bool) -> Self {
        self.show_controls = Some(show);
        self
    }

    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the update into `state`. Numeric values are sanitized
    /// (non-finite times become 0, volume is clamped). Returns whether
    /// anything changed.
    pub fn merge_into(self, state: &mut PlayerState) -> bool {
        let before = state.clone();

        if let Some(playing) = self.playing {
            state.playing = playing;
        }
        if let Some(muted) = self.muted {
            state.muted = muted;
        }
        if let Some(volume) = self.volume {
            state.volume = if volume.is_nan() {
                state.volume
            } else {
                volume.clamp(0.0, 1.0)
            };
        }
        if let Some(time) = self.current_time {
            state.current_time = non_negative(time);
        }
        if let Some(duration) = self.duration {
            state.duration = non_negative(duration);
        }
        if let Some(buffered) = self.buffered {
            state.buffered = non_negative(buffered);
        }
        if let Some(fullscreen) = self.fullscreen {
            state.fullscreen = fullscreen;
        }
        if let Some(quality) = self.quality {
            state.quality = Some(quality);
        }
        if let Some(show) = self.show_controls {
            state.show_controls = show;
        }
        if let Some(loading) = self.loading {
            state.loading = loading;
        }

        *state != before
    }
}

/// Media elements report `NaN` for an unknown duration and `Infinity` for
/// live streams; both collapse to 0 ("unknown").
fn non_negative(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
