// SPDX-License-Identifier: MPL-2.0
//! The player core.
//!
//! [`Player`] ties the pieces together: the [`store::PlaybackStore`] holding
//! the one state record, the [`binding::MediaBinding`] owning the media
//! resource, the touch [`gesture::GestureRecognizer`] and the controls
//! auto-hide timer. Renderers read [`Player::state`] (or subscribe to it) and
//! send user intent through the commands in [`commands`].
//!
//! The host drives time: it calls [`Player::pump`] whenever the environment
//! may have queued events, and at [`Player::next_wakeup`] at the latest.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use touchplay::config::PlayerConfig;
//! use touchplay::infrastructure::headless::{HeadlessFullscreen, HeadlessMedia};
//! use touchplay::player::{Player, PlayerProps};
//!
//! let media = HeadlessMedia::new();
//! let mut player = Player::new(
//!     PlayerProps::new("https://cdn.example/intro.mp4").with_title("Intro"),
//!     PlayerConfig::default(),
//! );
//! player.mount(media.clone(), HeadlessFullscreen::new());
//!
//! media.finish_loading(42.0);
//! player.pump(Instant::now());
//! assert!(!player.state().loading);
//! ```

pub mod binding;
pub mod click;
pub mod commands;
pub mod controls;
pub mod gesture;
pub mod store;

pub use binding::{MediaBinding, PlaybackSnapshot};
pub use click::State as DoubleClickDetector;
pub use commands::Action;
pub use controls::State as ControlsVisibility;
pub use gesture::{
    GestureAction, GesturePhase, GestureRecognizer, InteractiveRegions, PlaybackSample, Surface,
    TouchInput,
};
pub use store::{Listener, ListenerId, PlaybackStore};

use crate::application::port::{FullscreenHost, MediaResource};
use crate::config::PlayerConfig;
use crate::domain::geometry::Point;
use crate::domain::video::{
    PlaybackSpeed, PlayerState, QualityList, SourceSpec, StateUpdate,
};
use crate::error::{MediaError, RequestError};
use std::time::Instant;

/// What the embedding page hands the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProps {
    pub source: SourceSpec,
    pub poster: Option<String>,
    pub title: Option<String>,
}

impl PlayerProps {
    #[must_use]
    pub fn new(source: impl Into<SourceSpec>) -> Self {
        Self {
            source: source.into(),
            poster: None,
            title: None,
        }
    }

    #[must_use]
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

pub struct Player<R: MediaResource, F: FullscreenHost> {
    config: PlayerConfig,
    qualities: QualityList,
    poster: Option<String>,
    title: Option<String>,
    store: PlaybackStore,
    binding: MediaBinding<R, F>,
    gestures: GestureRecognizer,
    controls: ControlsVisibility,
    clicks: DoubleClickDetector,
    speed: PlaybackSpeed,
    speed_presets: Vec<PlaybackSpeed>,
}

impl<R: MediaResource, F: FullscreenHost> Player<R, F> {
    /// Resolves the quality list and creates the initial state. Nothing is
    /// loaded until [`Player::mount`].
    #[must_use]
    pub fn new(props: PlayerProps, config: PlayerConfig) -> Self {
        let qualities = QualityList::resolve(&props.source);
        let state = PlayerState::initial(qualities.preferred().cloned());

        Self {
            qualities,
            poster: props.poster,
            title: props.title,
            store: PlaybackStore::new(state),
            binding: MediaBinding::new(config.time_update_throttle()),
            gestures: GestureRecognizer::from_config(&config),
            controls: ControlsVisibility::new(config.controls_hide_delay()),
            clicks: DoubleClickDetector::new(config.double_click_window()),
            speed: PlaybackSpeed::default(),
            speed_presets: config.speed_presets(),
            config,
        }
    }

    /// Hands the player its media resource and fullscreen capability, and
    /// starts loading the initial quality.
    pub fn mount(&mut self, resource: R, fullscreen: F) {
        log::info!(
            "Mounting player{} with {} quality option(s)",
            self.title
                .as_deref()
                .map(|t| format!(" \"{t}\""))
                .unwrap_or_default(),
            self.qualities.len()
        );
        if self.qualities.is_empty() {
            log::warn!("Player mounted without any source");
        }
        self.speed = PlaybackSpeed::default();
        self.binding.attach(
            resource,
            fullscreen,
            self.qualities.preferred(),
            self.config.initial_volume(),
            self.config.initial_muted(),
            &mut self.store,
        );
    }

    /// Releases the resource, cancels the hide timer and abandons any gesture.
    /// Completions still pending become no-ops.
    pub fn unmount(&mut self) {
        if !self.binding.is_attached() {
            return;
        }
        log::info!("Unmounting player");
        self.binding.detach();
        self.gestures.cancel();
        self.controls.handle(controls::Message::Cancel);
        self.clicks.handle(click::Message::Reset);
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.binding.is_attached()
    }

    /// Processes queued environment events and due timers.
    pub fn pump(&mut self, now: Instant) {
        self.binding.pump(now, &mut self.store);

        let effect = self.controls.handle(controls::Message::Tick {
            now,
            playing: self.store.get().playing,
        });
        self.apply_controls_effect(effect);
    }

    /// The next instant at which [`Player::pump`] has timer work to do.
    #[must_use]
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.controls.deadline()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Feeds one touch event to the gesture recognizer and runs the command
    /// it recognizes. Returns the recognized action.
    pub fn handle_touch(&mut self, input: TouchInput, now: Instant) -> Option<GestureAction> {
        let Some(sample) = self.binding.sample() else {
            self.gestures.cancel();
            return None;
        };
        if matches!(input, TouchInput::Start { .. }) {
            self.show_controls_temporarily(now);
        }

        let action = self.gestures.handle(input, sample)?;
        log::debug!("Gesture recognized: {action:?}");
        match action {
            GestureAction::Seek(seconds) => self.seek(seconds),
            GestureAction::SetVolume(volume) => self.set_volume(volume.value()),
            GestureAction::Skip(delta) => self.skip(delta),
            GestureAction::TogglePlay => self.toggle_play(),
        };
        Some(action)
    }

    /// Mouse moved over or entered the player.
    pub fn handle_pointer_activity(&mut self, now: Instant) {
        self.show_controls_temporarily(now);
    }

    /// A click on the video surface; a double click toggles fullscreen.
    /// Clicks on interactive controls are ignored. Returns true when the
    /// click completed a double click.
    pub fn handle_click(&mut self, position: Point, now: Instant) -> bool {
        if !self.is_mounted() || self.gestures.regions().contains(position) {
            return false;
        }
        match self.clicks.handle(click::Message::Click { position, now }) {
            click::Effect::DoubleClick => self.toggle_fullscreen(),
            click::Effect::None => false,
        }
    }

    pub fn set_surface(&mut self, surface: Surface) {
        self.gestures.set_surface(surface);
    }

    /// Replaces the rectangles of interactive controls; input starting inside
    /// them is never treated as a gesture or a surface click.
    pub fn set_control_regions(&mut self, regions: InteractiveRegions) {
        self.gestures.set_regions(regions);
    }

    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gestures.phase()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn state(&self) -> &PlayerState {
        self.store.get()
    }

    /// Incremented on every effective state change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Speed last applied through [`Player::change_speed`].
    #[must_use]
    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    #[must_use]
    pub fn speed_presets(&self) -> &[PlaybackSpeed] {
        &self.speed_presets
    }

    #[must_use]
    pub fn qualities(&self) -> &QualityList {
        &self.qualities
    }

    #[must_use]
    pub fn poster(&self) -> Option<&str> {
        self.poster.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Last media error; cleared when a new load starts.
    #[must_use]
    pub fn error(&self) -> Option<&MediaError> {
        self.binding.last_error()
    }

    /// Last rejected play or fullscreen request.
    #[must_use]
    pub fn last_rejection(&self) -> Option<&RequestError> {
        self.binding.last_rejection()
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    fn apply_controls_effect(&mut self, effect: controls::Effect) {
        if let controls::Effect::VisibilityChanged(visible) = effect {
            self.store
                .apply(StateUpdate::default().show_controls(visible));
        }
    }
}

impl<R: MediaResource, F: FullscreenHost> std::fmt::Debug for Player<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("title", &self.title)
            .field("mounted", &self.is_mounted())
            .field("state", self.store.get())
            .field("speed", &self.speed)
            .finish_non_exhaustive()
    }
}
