// SPDX-License-Identifier: MPL-2.0
//! Media binding: exclusive owner of the media resource.
//!
//! The binding translates the resource's event stream into store updates and
//! is the only code that issues requests to the resource. Resource events are
//! authoritative for every field the resource reports; commands issued here
//! only *request* changes and wait for the matching event.
//!
//! # Generations
//!
//! Every source swap, mount and unmount bumps a generation counter. A quality
//! switch registers a one-shot completion tagged with the generation it was
//! issued against; a completion whose tag no longer matches is discarded,
//! so a fast double switch cannot restore a stale position onto the final
//! source.

use super::gesture::PlaybackSample;
use super::store::PlaybackStore;
use crate::application::port::{FullscreenEvent, FullscreenHost, MediaEvent, MediaResource};
use crate::domain::video::{PlaybackSpeed, QualityOption, StateUpdate, Volume};
use crate::error::{MediaError, PendingRequest, RequestError};
use std::time::{Duration, Instant};

/// Playback values captured before a source swap and restored after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSnapshot {
    pub current_time: f64,
    pub playing: bool,
    pub speed: PlaybackSpeed,
}

/// A pending quality-switch completion.
#[derive(Debug, Clone)]
struct QualitySwitch {
    generation: u64,
    snapshot: PlaybackSnapshot,
    /// Set once the new source reported `loadstart`; data-ready signals seen
    /// before that belong to the previous source.
    load_started: bool,
}

/// Rate limiter for time-progress updates.
///
/// A deferred update is never dropped: it is applied by the next pump once
/// the interval has elapsed, or immediately by a pause, seek or end.
#[derive(Debug)]
struct TimeThrottle {
    interval: Duration,
    last_applied: Option<Instant>,
    pending: bool,
}

impl TimeThrottle {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_applied: None,
            pending: false,
        }
    }

    fn elapsed_enough(&self, now: Instant) -> bool {
        self.last_applied
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Returns true if the update may be applied now; otherwise it is deferred.
    fn offer(&mut self, now: Instant) -> bool {
        if self.elapsed_enough(now) {
            self.mark_applied(now);
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Returns true if a deferred update is due.
    fn take_due(&mut self, now: Instant) -> bool {
        if self.pending && self.elapsed_enough(now) {
            self.mark_applied(now);
            true
        } else {
            false
        }
    }

    fn mark_applied(&mut self, now: Instant) {
        self.last_applied = Some(now);
        self.pending = false;
    }

    fn reset(&mut self) {
        self.last_applied = None;
        self.pending = false;
    }
}

#[derive(Debug)]
pub struct MediaBinding<R: MediaResource, F: FullscreenHost> {
    resource: Option<R>,
    fullscreen: Option<F>,
    generation: u64,
    switches: Vec<QualitySwitch>,
    throttle: TimeThrottle,
    fullscreen_request: Option<PendingRequest>,
    last_error: Option<MediaError>,
    last_rejection: Option<RequestError>,
}

impl<R: MediaResource, F: FullscreenHost> MediaBinding<R, F> {
    #[must_use]
    pub fn new(time_update_throttle: Duration) -> Self {
        Self {
            resource: None,
            fullscreen: None,
            generation: 0,
            switches: Vec::new(),
            throttle: TimeThrottle::new(time_update_throttle),
            fullscreen_request: None,
            last_error: None,
            last_rejection: None,
        }
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.resource.is_some()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of registered quality-switch completions, stale ones included.
    #[must_use]
    pub fn pending_switches(&self) -> usize {
        self.switches.len()
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&MediaError> {
        self.last_error.as_ref()
    }

    #[must_use]
    pub fn last_rejection(&self) -> Option<&RequestError> {
        self.last_rejection.as_ref()
    }

    /// Takes ownership of the resource and the fullscreen capability, pushes
    /// the initial volume preference and starts loading `source`.
    pub fn attach(
        &mut self,
        mut resource: R,
        fullscreen: F,
        source: Option<&QualityOption>,
        volume: Volume,
        muted: bool,
        store: &mut PlaybackStore,
    ) {
        if self.is_attached() {
            self.detach();
        }
        self.generation += 1;

        resource.set_volume(volume.value());
        resource.set_muted(muted);
        if let Some(option) = source {
            log::info!("Loading initial source {} ({})", option.label, option.url);
            resource.set_src(&option.url);
            resource.load();
        }

        store.apply(
            StateUpdate::default()
                .volume(resource.volume())
                .muted(resource.muted())
                .fullscreen(fullscreen.is_fullscreen()),
        );

        self.resource = Some(resource);
        self.fullscreen = Some(fullscreen);
    }

    /// Releases the resource and invalidates every pending completion.
    pub fn detach(&mut self) {
        self.generation += 1;
        if !self.switches.is_empty() {
            log::debug!(
                "Dropping {} pending quality switch completion(s) on detach",
                self.switches.len()
            );
        }
        self.switches.clear();
        self.throttle.reset();
        self.fullscreen_request = None;

        if let Some(mut resource) = self.resource.take() {
            resource.release();
        }
        if let Some(mut fullscreen) = self.fullscreen.take() {
            fullscreen.release();
        }
    }

    /// Drains every queued environment event into the store, then applies a
    /// deferred time update if one is due.
    pub fn pump(&mut self, now: Instant, store: &mut PlaybackStore) {
        while let Some(event) = self.fullscreen.as_mut().and_then(FullscreenHost::poll_event) {
            self.handle_fullscreen_event(event, store);
        }
        while let Some(event) = self.resource.as_mut().and_then(MediaResource::poll_event) {
            self.handle_media_event(event, now, store);
        }
        if self.throttle.take_due(now) {
            self.apply_time(store);
        }
    }

    /// Applies one media event to the store.
    pub fn handle_media_event(
        &mut self,
        event: MediaEvent,
        now: Instant,
        store: &mut PlaybackStore,
    ) {
        if !self.is_attached() {
            return;
        }

        match event {
            MediaEvent::Play => {
                store.apply(StateUpdate::default().playing(true));
            }
            MediaEvent::Pause => {
                self.flush_time(now, store);
                store.apply(StateUpdate::default().playing(false));
            }
            MediaEvent::TimeUpdate => {
                if self.throttle.offer(now) {
                    self.apply_time(store);
                }
            }
            MediaEvent::Seeked => self.flush_time(now, store),
            MediaEvent::Ended => {
                self.flush_time(now, store);
                store.apply(StateUpdate::default().playing(false));
            }
            MediaEvent::DurationChange => {
                if let Some(resource) = &self.resource {
                    store.apply(StateUpdate::default().duration(resource.duration()));
                }
            }
            MediaEvent::Progress => self.apply_buffered(store),
            MediaEvent::LoadStart => {
                let generation = self.generation;
                for switch in self
                    .switches
                    .iter_mut()
                    .filter(|s| s.generation == generation)
                {
                    switch.load_started = true;
                }
                self.last_error = None;
                store.apply(StateUpdate::default().loading(true));
            }
            MediaEvent::Waiting | MediaEvent::Stalled => {
                store.apply(StateUpdate::default().loading(true));
            }
            MediaEvent::LoadedData => {
                if self.awaiting_new_source() {
                    log::debug!("Ignoring data-ready of the previous source");
                    return;
                }
                self.complete_switches();
                let mut update = StateUpdate::default().loading(false);
                if let Some(resource) = &self.resource {
                    update = update.duration(resource.duration());
                }
                store.apply(update);
            }
            MediaEvent::CanPlay => {
                store.apply(StateUpdate::default().loading(false));
            }
            MediaEvent::VolumeChange => {
                if let Some(resource) = &self.resource {
                    store.apply(
                        StateUpdate::default()
                            .volume(resource.volume())
                            .muted(resource.muted()),
                    );
                }
            }
            MediaEvent::Error(error) => {
                log::error!("Playback error: {error}");
                self.last_error = Some(error);
                store.apply(StateUpdate::default().loading(false));
            }
            MediaEvent::PlayRejected(reason) => {
                let rejection = RequestError::new(PendingRequest::Play, reason);
                log::warn!("{rejection}");
                self.last_rejection = Some(rejection);
            }
        }
    }

    /// Applies one fullscreen event to the store.
    pub fn handle_fullscreen_event(&mut self, event: FullscreenEvent, store: &mut PlaybackStore) {
        let Some(host) = &self.fullscreen else {
            return;
        };
        let fullscreen = host.is_fullscreen();

        match event {
            FullscreenEvent::Changed => {
                self.fullscreen_request = None;
            }
            FullscreenEvent::Rejected(reason) => {
                let request = self
                    .fullscreen_request
                    .take()
                    .unwrap_or(PendingRequest::EnterFullscreen);
                let rejection = RequestError::new(request, reason);
                log::warn!("{rejection}");
                self.last_rejection = Some(rejection);
            }
        }
        store.apply(StateUpdate::default().fullscreen(fullscreen));
    }

    fn apply_time(&self, store: &mut PlaybackStore) {
        if let Some(resource) = &self.resource {
            store.apply(
                StateUpdate::default()
                    .current_time(resource.current_time())
                    .duration(resource.duration()),
            );
        }
    }

    /// Applies the latest time unconditionally, superseding any deferred update.
    fn flush_time(&mut self, now: Instant, store: &mut PlaybackStore) {
        self.throttle.mark_applied(now);
        self.apply_time(store);
    }

    fn apply_buffered(&self, store: &mut PlaybackStore) {
        let Some(resource) = &self.resource else {
            return;
        };
        // No ranges: keep the previous value instead of regressing to 0.
        let Some(end) = resource.buffered().last_end() else {
            return;
        };
        let buffered = end.max(store.get().buffered);
        store.apply(StateUpdate::default().buffered(buffered));
    }

    /// A switch was issued but its source has not reported `loadstart` yet.
    fn awaiting_new_source(&self) -> bool {
        self.switches
            .iter()
            .any(|s| s.generation == self.generation && !s.load_started)
    }

    /// Runs the registered quality-switch completions on a data-ready signal.
    fn complete_switches(&mut self) {
        let registered = std::mem::take(&mut self.switches);
        for switch in registered {
            if switch.generation != self.generation {
                log::warn!(
                    "Discarding stale quality switch completion (generation {} superseded by {})",
                    switch.generation,
                    self.generation
                );
                continue;
            }
            if let Some(resource) = self.resource.as_mut() {
                let snapshot = switch.snapshot;
                log::info!(
                    "Quality switch ready, restoring {:.2}s at {}x (playing: {})",
                    snapshot.current_time,
                    snapshot.speed.value(),
                    snapshot.playing
                );
                resource.set_current_time(snapshot.current_time);
                resource.set_playback_rate(snapshot.speed.value());
                if snapshot.playing {
                    resource.play();
                }
            }
        }
    }

    // =========================================================================
    // Resource commands
    // =========================================================================

    /// Requests play when paused, pause otherwise. Returns false when detached.
    pub fn toggle_play(&mut self) -> bool {
        let Some(resource) = self.resource.as_mut() else {
            return false;
        };
        if resource.paused() {
            log::debug!("Requesting play");
            resource.play();
        } else {
            log::debug!("Requesting pause");
            resource.pause();
        }
        true
    }

    pub fn toggle_mute(&mut self) -> bool {
        let Some(resource) = self.resource.as_mut() else {
            return false;
        };
        let muted = !resource.muted();
        resource.set_muted(muted);
        true
    }

    /// Sets the volume; silence mutes, any audible level unmutes.
    pub fn set_volume(&mut self, volume: Volume) -> bool {
        let Some(resource) = self.resource.as_mut() else {
            return false;
        };
        resource.set_volume(volume.value());
        if volume.is_silent() {
            resource.set_muted(true);
        } else if resource.muted() {
            resource.set_muted(false);
        }
        true
    }

    /// Instantaneous values for relative gesture computations.
    #[must_use]
    pub fn sample(&self) -> Option<PlaybackSample> {
        self.resource.as_ref().map(|r| PlaybackSample {
            current_time: r.current_time(),
            duration: r.duration(),
            volume: r.volume(),
        })
    }

    /// Duration reported by the resource, `None` while unknown.
    fn known_duration(&self) -> Option<f64> {
        self.resource
            .as_ref()
            .map(MediaResource::duration)
            .filter(|d| d.is_finite() && *d > 0.0)
    }

    /// Seeks to `seconds` clamped to `[0, duration]`.
    ///
    /// While the duration is unknown there is no valid target, so the seek
    /// is ignored until metadata arrives.
    pub fn seek(&mut self, seconds: f64) -> bool {
        if seconds.is_nan() {
            log::debug!("Ignoring seek to NaN");
            return false;
        }
        let Some(duration) = self.known_duration() else {
            log::debug!("Ignoring seek to {seconds:.2}s: duration unknown");
            return false;
        };
        let Some(resource) = self.resource.as_mut() else {
            return false;
        };
        resource.set_current_time(seconds.clamp(0.0, duration));
        true
    }

    /// Seeks relative to the resource's current position.
    pub fn skip(&mut self, delta: f64) -> bool {
        let Some(base) = self.resource.as_ref().map(MediaResource::current_time) else {
            return false;
        };
        self.seek(base + delta)
    }

    /// Sets the playback rate. A pending quality switch restores this rate
    /// instead of the one it captured.
    pub fn set_playback_rate(&mut self, speed: PlaybackSpeed) -> bool {
        let Some(resource) = self.resource.as_mut() else {
            return false;
        };
        resource.set_playback_rate(speed.value());
        let generation = self.generation;
        for switch in self
            .switches
            .iter_mut()
            .filter(|s| s.generation == generation)
        {
            switch.snapshot.speed = speed;
        }
        true
    }

    /// Requests fullscreen, or leaves it. The store follows the environment's
    /// change event, never this request.
    pub fn toggle_fullscreen(&mut self) -> bool {
        let Some(host) = self.fullscreen.as_mut() else {
            return false;
        };
        if host.is_fullscreen() {
            self.fullscreen_request = Some(PendingRequest::ExitFullscreen);
            host.exit_fullscreen();
        } else {
            self.fullscreen_request = Some(PendingRequest::EnterFullscreen);
            host.request_fullscreen();
        }
        true
    }

    /// Swaps the source to `option`, restoring position, speed and play state
    /// once the new source reports data-ready.
    ///
    /// When a previous switch is still pending, its snapshot is carried over:
    /// the resource only reports transient values while a swap is loading.
    pub fn change_quality(&mut self, option: &QualityOption, store: &mut PlaybackStore) -> bool {
        let Some(resource) = self.resource.as_mut() else {
            return false;
        };

        let generation = self.generation;
        let carried = self
            .switches
            .iter()
            .rev()
            .find(|s| s.generation == generation)
            .map(|s| s.snapshot);
        let snapshot = carried.unwrap_or_else(|| PlaybackSnapshot {
            current_time: resource.current_time(),
            playing: !resource.paused(),
            speed: PlaybackSpeed::try_new(resource.playback_rate()).unwrap_or_default(),
        });

        self.generation += 1;
        self.throttle.reset();
        log::info!(
            "Switching quality to {} (generation {})",
            option.label,
            self.generation
        );

        resource.set_src(&option.url);
        resource.load();

        // Loading pauses the element without a `pause` event.
        store.apply(
            StateUpdate::default()
                .loading(true)
                .quality(option.clone())
                .buffered(0.0)
                .playing(!resource.paused()),
        );

        self.switches.push(QualitySwitch {
            generation: self.generation,
            snapshot,
            load_started: false,
        });
        true
    }
}

impl<R: MediaResource, F: FullscreenHost> Drop for MediaBinding<R, F> {
    fn drop(&mut self) {
        if self.is_attached() {
            self.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::TimeRanges;
    use crate::domain::video::PlayerState;
    use crate::infrastructure::headless::{HeadlessFullscreen, HeadlessMedia};
    use crate::test_utils::assert_abs_diff_eq;

    type Binding = MediaBinding<HeadlessMedia, HeadlessFullscreen>;

    fn attached(throttle_ms: u64) -> (Binding, HeadlessMedia, PlaybackStore, Instant) {
        let media = HeadlessMedia::new();
        let mut store = PlaybackStore::new(PlayerState::default());
        let mut binding = Binding::new(Duration::from_millis(throttle_ms));
        let source = QualityOption::new("720p", "https://cdn.test/720.mp4", 720);
        binding.attach(
            media.clone(),
            HeadlessFullscreen::new(),
            Some(&source),
            Volume::default(),
            false,
            &mut store,
        );
        let now = Instant::now();
        media.finish_loading(120.0);
        binding.pump(now, &mut store);
        (binding, media, store, now)
    }

    #[test]
    fn attach_loads_source_and_clears_loading_on_ready() {
        let (binding, media, store, _) = attached(0);
        assert!(binding.is_attached());
        assert_eq!(media.src(), "https://cdn.test/720.mp4");
        assert_eq!(media.load_count(), 1);
        assert!(!store.get().loading);
        assert_abs_diff_eq!(store.get().duration, 120.0);
    }

    #[test]
    fn loading_is_level_triggered() {
        let (mut binding, media, mut store, now) = attached(0);
        media.fire(MediaEvent::Waiting);
        media.fire(MediaEvent::Waiting);
        binding.pump(now, &mut store);
        assert!(store.get().loading);

        media.fire(MediaEvent::CanPlay);
        binding.pump(now, &mut store);
        assert!(!store.get().loading);
    }

    #[test]
    fn playing_follows_events_not_requests() {
        let (mut binding, media, mut store, now) = attached(0);
        media.block_play(Some("NotAllowedError"));

        assert!(binding.toggle_play());
        binding.pump(now, &mut store);

        assert!(!store.get().playing);
        assert_eq!(
            binding.last_rejection().map(|r| r.request),
            Some(PendingRequest::Play)
        );
    }

    #[test]
    fn buffered_never_regresses() {
        let (mut binding, media, mut store, now) = attached(0);
        media.set_buffered([(0.0, 40.0)].into_iter().collect());
        binding.pump(now, &mut store);
        assert_abs_diff_eq!(store.get().buffered, 40.0);

        media.set_buffered(TimeRanges::new());
        binding.pump(now, &mut store);
        assert_abs_diff_eq!(store.get().buffered, 40.0);

        media.set_buffered([(0.0, 10.0), (50.0, 65.0)].into_iter().collect());
        binding.pump(now, &mut store);
        assert_abs_diff_eq!(store.get().buffered, 65.0);
    }

    #[test]
    fn throttled_time_update_lands_within_one_interval() {
        let (mut binding, mut media, mut store, now) = attached(250);
        media.play();
        binding.pump(now, &mut store);

        media.advance(1.0);
        binding.pump(now, &mut store);
        assert_abs_diff_eq!(store.get().current_time, 1.0);

        let soon = now + Duration::from_millis(100);
        media.advance(1.0);
        binding.pump(soon, &mut store);
        assert_abs_diff_eq!(store.get().current_time, 1.0);

        binding.pump(now + Duration::from_millis(260), &mut store);
        assert_abs_diff_eq!(store.get().current_time, 2.0);
    }

    #[test]
    fn pause_flushes_deferred_time() {
        let (mut binding, mut media, mut store, now) = attached(1000);
        media.play();
        media.advance(1.0);
        binding.pump(now, &mut store);

        media.advance(0.5);
        media.pause();
        binding.pump(now + Duration::from_millis(10), &mut store);

        assert!(!store.get().playing);
        assert_abs_diff_eq!(store.get().current_time, 1.5);
    }

    #[test]
    fn error_clears_loading_and_is_kept() {
        let (mut binding, media, mut store, now) = attached(0);
        media.starve();
        media.fail(MediaError::Network("connection reset".into()));
        binding.pump(now, &mut store);

        assert!(!store.get().loading);
        assert!(matches!(binding.last_error(), Some(MediaError::Network(_))));
    }

    #[test]
    fn seek_ignored_while_duration_unknown() {
        let media = HeadlessMedia::new();
        let mut store = PlaybackStore::new(PlayerState::default());
        let mut binding = Binding::new(Duration::ZERO);
        binding.attach(
            media.clone(),
            HeadlessFullscreen::new(),
            None,
            Volume::default(),
            false,
            &mut store,
        );

        assert!(!binding.seek(30.0));
        assert_abs_diff_eq!(media.current_time(), 0.0);
    }

    #[test]
    fn stale_data_ready_before_loadstart_is_not_a_completion() {
        let (mut binding, media, mut store, now) = attached(0);
        // A data-ready signal of the old source still queued when the swap happens.
        media.fire(MediaEvent::LoadedData);
        let option = QualityOption::new("480p", "https://cdn.test/480.mp4", 480);
        binding.change_quality(&option, &mut store);
        binding.pump(now, &mut store);

        assert_eq!(binding.pending_switches(), 1);
        assert!(store.get().loading);
    }

    #[test]
    fn rate_change_during_switch_survives_completion() {
        let (mut binding, media, mut store, now) = attached(0);
        binding.set_playback_rate(PlaybackSpeed::try_new(1.5).unwrap());
        let option = QualityOption::new("480p", "https://cdn.test/480.mp4", 480);
        binding.change_quality(&option, &mut store);
        binding.pump(now, &mut store);

        binding.set_playback_rate(PlaybackSpeed::try_new(2.0).unwrap());
        media.finish_loading(120.0);
        binding.pump(now, &mut store);

        assert_eq!(binding.pending_switches(), 0);
        assert_abs_diff_eq!(media.playback_rate(), 2.0);
    }

    #[test]
    fn switch_syncs_playing_with_silent_load_pause() {
        let (mut binding, media, mut store, now) = attached(0);
        binding.toggle_play();
        binding.pump(now, &mut store);
        assert!(store.get().playing);

        let option = QualityOption::new("480p", "https://cdn.test/480.mp4", 480);
        binding.change_quality(&option, &mut store);
        assert!(!store.get().playing);

        media.fail(MediaError::Network("connection reset".to_string()));
        binding.pump(now, &mut store);
        assert!(!store.get().playing);
        assert!(media.paused());
        assert!(binding.last_error().is_some());
    }

    #[test]
    fn detach_releases_and_invalidates() {
        let (mut binding, media, mut store, _) = attached(0);
        let option = QualityOption::new("480p", "https://cdn.test/480.mp4", 480);
        binding.change_quality(&option, &mut store);
        let generation = binding.generation();

        binding.detach();
        assert!(media.is_released());
        assert_eq!(binding.pending_switches(), 0);
        assert!(binding.generation() > generation);
        assert!(!binding.toggle_play());
        assert!(!binding.change_quality(&option, &mut store));
    }
}
