// SPDX-License-Identifier: MPL-2.0
//! In-memory media element and fullscreen host.
//!
//! [`HeadlessMedia`] behaves like a browser media element reduced to the
//! parts the player core observes: requests mutate its attributes and queue
//! the same events a `<video>` element would fire, in the same order.
//! Hosts without a DOM (native shells, server-side previews) drive it from
//! their own decoder, and the test suites script it directly.
//!
//! Both types are cheap shared handles, like DOM objects: the player owns
//! one clone, the host keeps another to report what the real media does.

use crate::application::port::{
    FullscreenEvent, FullscreenHost, MediaEvent, MediaResource, TimeRanges,
};
use crate::error::MediaError;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// =============================================================================
// HeadlessMedia
// =============================================================================

#[derive(Debug)]
struct ElementState {
    src: String,
    paused: bool,
    current_time: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    playback_rate: f64,
    buffered: TimeRanges,
    ready: bool,
    play_blocked: Option<String>,
    load_count: u32,
    released: bool,
    events: VecDeque<MediaEvent>,
}

impl Default for ElementState {
    fn default() -> Self {
        Self {
            src: String::new(),
            paused: true,
            current_time: 0.0,
            duration: f64::NAN,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
            buffered: TimeRanges::new(),
            ready: false,
            play_blocked: None,
            load_count: 0,
            released: false,
            events: VecDeque::new(),
        }
    }
}

impl ElementState {
    fn fire(&mut self, event: MediaEvent) {
        if !self.released {
            self.events.push_back(event);
        }
    }
}

/// Shared handle to an in-memory media element.
#[derive(Debug, Clone, Default)]
pub struct HeadlessMedia {
    inner: Rc<RefCell<ElementState>>,
}

impl HeadlessMedia {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The URL the element currently points at.
    #[must_use]
    pub fn src(&self) -> String {
        self.inner.borrow().src.clone()
    }

    /// How many times `load()` was requested.
    #[must_use]
    pub fn load_count(&self) -> u32 {
        self.inner.borrow().load_count
    }

    /// Whether the player released the element.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.inner.borrow().released
    }

    /// Number of events not yet drained by the player.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.inner.borrow().events.len()
    }

    /// Makes subsequent play requests fail with `reason` (autoplay policy),
    /// or lets them succeed again with `None`.
    pub fn block_play(&self, reason: Option<&str>) {
        self.inner.borrow_mut().play_blocked = reason.map(str::to_string);
    }

    /// Reports that the current source finished loading metadata and the
    /// first frame: fires `durationchange`, `loadeddata` and `canplay`.
    pub fn finish_loading(&self, duration: f64) {
        let mut el = self.inner.borrow_mut();
        el.ready = true;
        el.duration = duration;
        el.fire(MediaEvent::DurationChange);
        el.fire(MediaEvent::LoadedData);
        el.fire(MediaEvent::CanPlay);
    }

    /// Advances playback by `seconds` of wall time when playing. Reaching the
    /// end pauses the element and fires `pause` then `ended`.
    pub fn advance(&self, seconds: f64) {
        let mut el = self.inner.borrow_mut();
        if el.paused {
            return;
        }
        let mut position = el.current_time + seconds * el.playback_rate;
        let ended = el.duration.is_finite() && position >= el.duration;
        if ended {
            position = el.duration;
        }
        el.current_time = position;
        el.fire(MediaEvent::TimeUpdate);
        if ended {
            el.paused = true;
            el.fire(MediaEvent::Pause);
            el.fire(MediaEvent::Ended);
        }
    }

    /// Replaces the buffered ranges and fires `progress`.
    pub fn set_buffered(&self, ranges: TimeRanges) {
        let mut el = self.inner.borrow_mut();
        el.buffered = ranges;
        el.fire(MediaEvent::Progress);
    }

    /// Data ran out: the element waits for more.
    pub fn starve(&self) {
        let mut el = self.inner.borrow_mut();
        el.ready = false;
        el.fire(MediaEvent::Waiting);
    }

    /// Enough data arrived again after `starve`.
    pub fn resume_data(&self) {
        let mut el = self.inner.borrow_mut();
        el.ready = true;
        el.fire(MediaEvent::CanPlay);
    }

    /// Reports a loading or decoding failure.
    pub fn fail(&self, error: MediaError) {
        self.inner.borrow_mut().fire(MediaEvent::Error(error));
    }

    /// Queues an arbitrary event, for scripting unusual orderings.
    pub fn fire(&self, event: MediaEvent) {
        self.inner.borrow_mut().fire(event);
    }
}

impl MediaResource for HeadlessMedia {
    fn paused(&self) -> bool {
        self.inner.borrow().paused
    }

    fn current_time(&self) -> f64 {
        self.inner.borrow().current_time
    }

    fn duration(&self) -> f64 {
        self.inner.borrow().duration
    }

    fn volume(&self) -> f64 {
        self.inner.borrow().volume
    }

    fn muted(&self) -> bool {
        self.inner.borrow().muted
    }

    fn playback_rate(&self) -> f64 {
        self.inner.borrow().playback_rate
    }

    fn buffered(&self) -> TimeRanges {
        self.inner.borrow().buffered.clone()
    }

    fn play(&mut self) {
        let mut el = self.inner.borrow_mut();
        if let Some(reason) = el.play_blocked.clone() {
            el.fire(MediaEvent::PlayRejected(reason));
            return;
        }
        if el.paused {
            el.paused = false;
            el.fire(MediaEvent::Play);
            if !el.ready {
                el.fire(MediaEvent::Waiting);
            }
        }
    }

    fn pause(&mut self) {
        let mut el = self.inner.borrow_mut();
        if !el.paused {
            el.paused = true;
            el.fire(MediaEvent::Pause);
        }
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut el = self.inner.borrow_mut();
        let upper = if el.duration.is_finite() {
            el.duration
        } else {
            f64::MAX
        };
        el.current_time = seconds.clamp(0.0, upper);
        el.fire(MediaEvent::TimeUpdate);
        el.fire(MediaEvent::Seeked);
    }

    fn set_volume(&mut self, volume: f64) {
        let mut el = self.inner.borrow_mut();
        if (el.volume - volume).abs() > f64::EPSILON {
            el.volume = volume;
            el.fire(MediaEvent::VolumeChange);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        let mut el = self.inner.borrow_mut();
        if el.muted != muted {
            el.muted = muted;
            el.fire(MediaEvent::VolumeChange);
        }
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.inner.borrow_mut().playback_rate = rate;
    }

    fn set_src(&mut self, url: &str) {
        self.inner.borrow_mut().src = url.to_string();
    }

    fn load(&mut self) {
        // The load algorithm pauses silently: no `pause` event is fired.
        let mut el = self.inner.borrow_mut();
        el.paused = true;
        el.ready = false;
        el.current_time = 0.0;
        el.duration = f64::NAN;
        el.buffered = TimeRanges::new();
        el.playback_rate = 1.0;
        el.load_count += 1;
        el.fire(MediaEvent::LoadStart);
    }

    fn poll_event(&mut self) -> Option<MediaEvent> {
        self.inner.borrow_mut().events.pop_front()
    }

    fn release(&mut self) {
        let mut el = self.inner.borrow_mut();
        el.released = true;
        el.events.clear();
    }
}

// =============================================================================
// HeadlessFullscreen
// =============================================================================

#[derive(Debug, Default)]
struct FullscreenState {
    fullscreen: bool,
    denied: Option<String>,
    released: bool,
    events: VecDeque<FullscreenEvent>,
}

impl FullscreenState {
    fn fire(&mut self, event: FullscreenEvent) {
        if !self.released {
            self.events.push_back(event);
        }
    }
}

/// Shared handle to an in-memory fullscreen capability.
#[derive(Debug, Clone, Default)]
pub struct HeadlessFullscreen {
    inner: Rc<RefCell<FullscreenState>>,
}

impl HeadlessFullscreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent requests fail with `reason`, or succeed with `None`.
    pub fn deny_requests(&self, reason: Option<&str>) {
        self.inner.borrow_mut().denied = reason.map(str::to_string);
    }

    /// The user left fullscreen outside the player (Escape key, OS gesture).
    pub fn user_exit(&self) {
        let mut fs = self.inner.borrow_mut();
        if fs.fullscreen {
            fs.fullscreen = false;
            fs.fire(FullscreenEvent::Changed);
        }
    }

    #[must_use]
    pub fn is_released(&self) -> bool {
        self.inner.borrow().released
    }
}

impl FullscreenHost for HeadlessFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.inner.borrow().fullscreen
    }

    fn request_fullscreen(&mut self) {
        let mut fs = self.inner.borrow_mut();
        if let Some(reason) = fs.denied.clone() {
            fs.fire(FullscreenEvent::Rejected(reason));
        } else if !fs.fullscreen {
            fs.fullscreen = true;
            fs.fire(FullscreenEvent::Changed);
        }
    }

    fn exit_fullscreen(&mut self) {
        let mut fs = self.inner.borrow_mut();
        if fs.fullscreen {
            fs.fullscreen = false;
            fs.fire(FullscreenEvent::Changed);
        } else {
            fs.fire(FullscreenEvent::Rejected("not in fullscreen".to_string()));
        }
    }

    fn poll_event(&mut self) -> Option<FullscreenEvent> {
        self.inner.borrow_mut().events.pop_front()
    }

    fn release(&mut self) {
        let mut fs = self.inner.borrow_mut();
        fs.released = true;
        fs.events.clear();
    }
}
