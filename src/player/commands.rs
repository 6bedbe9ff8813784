// SPDX-License-Identifier: MPL-2.0
//! User-intent commands.
//!
//! Each verb validates its input and forwards a request through the media
//! binding. Resource-derived state (`playing`, `volume`, `current_time`,
//! `fullscreen`) is never written here: it follows once the environment
//! confirms the request. Every command is a no-op on an unmounted player and
//! returns whether a request was issued.

use super::{controls, Player};
use crate::application::port::{FullscreenHost, MediaResource};
use crate::domain::video::{PlaybackSpeed, QualityOption, Volume};
use std::time::Instant;

/// A user intent, as produced by control widgets or keyboard shortcuts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    TogglePlay,
    ToggleMute,
    SetVolume(f64),
    Seek(f64),
    Skip(f64),
    ChangeSpeed(f64),
    IncreaseSpeed,
    DecreaseSpeed,
    ToggleFullscreen,
    ChangeQuality(QualityOption),
    ShowControlsTemporarily,
}

impl<R: MediaResource, F: FullscreenHost> Player<R, F> {
    /// Dispatches an [`Action`] to its command.
    pub fn perform(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::TogglePlay => self.toggle_play(),
            Action::ToggleMute => self.toggle_mute(),
            Action::SetVolume(volume) => self.set_volume(volume),
            Action::Seek(seconds) => self.seek(seconds),
            Action::Skip(delta) => self.skip(delta),
            Action::ChangeSpeed(rate) => self.change_speed(rate),
            Action::IncreaseSpeed => self.step_speed(true),
            Action::DecreaseSpeed => self.step_speed(false),
            Action::ToggleFullscreen => self.toggle_fullscreen(),
            Action::ChangeQuality(option) => self.change_quality(&option),
            Action::ShowControlsTemporarily => self.show_controls_temporarily(now),
        }
    }

    /// Requests play when the resource is paused, pause otherwise.
    pub fn toggle_play(&mut self) -> bool {
        self.binding.toggle_play()
    }

    /// Flips the mute flag. The volume level is left untouched, so unmuting
    /// a resource at volume 0 stays silent.
    pub fn toggle_mute(&mut self) -> bool {
        self.binding.toggle_mute()
    }

    /// Sets the volume (clamped to `[0, 1]`); 0 also mutes, anything above
    /// unmutes.
    pub fn set_volume(&mut self, volume: f64) -> bool {
        if volume.is_nan() {
            log::debug!("Ignoring NaN volume");
            return false;
        }
        self.binding.set_volume(Volume::new(volume))
    }

    /// Seeks to `seconds`, clamped to `[0, duration]`. Ignored while the
    /// duration is unknown.
    pub fn seek(&mut self, seconds: f64) -> bool {
        self.binding.seek(seconds)
    }

    /// Seeks relative to the current position.
    pub fn skip(&mut self, delta: f64) -> bool {
        self.binding.skip(delta)
    }

    /// Sets the playback rate. Non-positive and non-finite rates are rejected.
    pub fn change_speed(&mut self, rate: f64) -> bool {
        let Some(speed) = PlaybackSpeed::try_new(rate) else {
            log::debug!("Rejecting playback rate {rate}");
            return false;
        };
        if !self.binding.set_playback_rate(speed) {
            return false;
        }
        log::debug!("Playback speed set to {}", speed.label());
        self.speed = speed;
        true
    }

    /// Moves to the next faster or slower preset.
    pub fn step_speed(&mut self, faster: bool) -> bool {
        let next = if faster {
            self.speed.increase(&self.speed_presets)
        } else {
            self.speed.decrease(&self.speed_presets)
        };
        if next == self.speed {
            return false;
        }
        self.change_speed(next.value())
    }

    /// Requests fullscreen or leaves it. `fullscreen` in the state changes
    /// only when the environment reports the change.
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.binding.toggle_fullscreen()
    }

    /// Switches to another quality, resuming at the same position, speed and
    /// play state once the new source is ready.
    ///
    /// Options outside the resolved quality list are rejected, and selecting
    /// the current quality again does nothing.
    pub fn change_quality(&mut self, option: &QualityOption) -> bool {
        if !self.qualities.contains(option) {
            log::warn!("Rejecting unknown quality {} ({})", option.label, option.url);
            return false;
        }
        if self.store.get().quality.as_ref() == Some(option) {
            log::debug!("Quality {} already selected", option.label);
            return false;
        }
        self.binding.change_quality(option, &mut self.store)
    }

    /// [`Player::change_quality`] by label, as a settings menu reports it.
    pub fn change_quality_by_label(&mut self, label: &str) -> bool {
        match self.qualities.find_by_label(label).cloned() {
            Some(option) => self.change_quality(&option),
            None => {
                log::warn!("No quality labelled {label}");
                false
            }
        }
    }

    /// Shows the controls and (re)arms the hide timer.
    pub fn show_controls_temporarily(&mut self, now: Instant) -> bool {
        if !self.is_mounted() {
            return false;
        }
        let effect = self.controls.handle(controls::Message::Activity(now));
        self.apply_controls_effect(effect);
        true
    }
}
