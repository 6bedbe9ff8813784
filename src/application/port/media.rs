// SPDX-License-Identifier: MPL-2.0
//! Media resource port definition.
//!
//! This module defines the [`MediaResource`] trait the player core drives.
//! Infrastructure adapters (a browser `<video>` element, an in-memory
//! headless element) implement it.
//!
//! # Design Notes
//!
//! - Reads are **instantaneous** - they return what the resource reports now
//! - Requests are **fire-and-forget** - `play()` and friends never block and
//!   never fail synchronously; outcomes arrive later as [`MediaEvent`]s
//! - Events are **queued** by the adapter and drained with
//!   [`poll_event`](MediaResource::poll_event), in arrival order
//! - Events carry no state: handlers read the resource when they run, the way
//!   DOM media event handlers do

use crate::error::MediaError;

// =============================================================================
// TimeRanges
// =============================================================================

/// Buffered time ranges, in seconds, as reported by the resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeRanges {
    ranges: Vec<(f64, f64)>,
}

impl TimeRanges {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, start: f64, end: f64) {
        self.ranges.push((start, end));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    #[must_use]
    pub fn start(&self, index: usize) -> Option<f64> {
        self.ranges.get(index).map(|(s, _)| *s)
    }

    #[must_use]
    pub fn end(&self, index: usize) -> Option<f64> {
        self.ranges.get(index).map(|(_, e)| *e)
    }

    /// End of the last range, `None` when nothing is buffered.
    #[must_use]
    pub fn last_end(&self) -> Option<f64> {
        self.ranges.last().map(|(_, e)| *e)
    }
}

impl FromIterator<(f64, f64)> for TimeRanges {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// MediaEvent
// =============================================================================

/// Lifecycle signals of a media resource.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback started (`play`).
    Play,
    /// Playback paused (`pause`).
    Pause,
    /// Playback position advanced (`timeupdate`).
    TimeUpdate,
    /// Duration became known or changed (`durationchange`).
    DurationChange,
    /// More data was buffered (`progress`).
    Progress,
    /// A new load began (`loadstart`).
    LoadStart,
    /// The first frame is available (`loadeddata`).
    LoadedData,
    /// Playback stopped for lack of data (`waiting`).
    Waiting,
    /// Data fetching stalled (`stalled`).
    Stalled,
    /// Enough data to start playing (`canplay`).
    CanPlay,
    /// A seek completed (`seeked`).
    Seeked,
    /// Playback reached the end (`ended`).
    Ended,
    /// Volume or mute flag changed (`volumechange`).
    VolumeChange,
    /// Loading or decoding failed (`error`).
    Error(MediaError),
    /// A play request was refused (rejected `play()` promise).
    PlayRejected(String),
}

impl MediaEvent {
    /// Maps a DOM media event type to a payload-free event.
    ///
    /// `error` is not mapped here; adapters read the element's error
    /// and build [`MediaEvent::Error`] themselves.
    #[must_use]
    pub fn from_dom_type(event_type: &str) -> Option<Self> {
        let event = match event_type {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "timeupdate" => Self::TimeUpdate,
            "durationchange" => Self::DurationChange,
            "progress" => Self::Progress,
            "loadstart" => Self::LoadStart,
            "loadeddata" => Self::LoadedData,
            "waiting" => Self::Waiting,
            "stalled" => Self::Stalled,
            "canplay" => Self::CanPlay,
            "seeked" => Self::Seeked,
            "ended" => Self::Ended,
            "volumechange" => Self::VolumeChange,
            _ => return None,
        };
        Some(event)
    }

    /// DOM event types adapters subscribe to, `error` included.
    pub const DOM_TYPES: &'static [&'static str] = &[
        "play",
        "pause",
        "timeupdate",
        "durationchange",
        "progress",
        "loadstart",
        "loadeddata",
        "waiting",
        "stalled",
        "canplay",
        "seeked",
        "ended",
        "volumechange",
        "error",
    ];
}

// =============================================================================
// MediaResource Trait
// =============================================================================

/// Port for the one playable media handle a player owns.
///
/// # Lifecycle
///
/// 1. The host creates the resource and hands it to `Player::mount`
/// 2. The core issues requests and drains events through `poll_event`
/// 3. On unmount the core calls `release`, after which no events are read
pub trait MediaResource {
    /// Whether the resource is paused.
    fn paused(&self) -> bool;

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Duration in seconds; `NaN` while unknown.
    fn duration(&self) -> f64;

    /// Volume in `[0, 1]`.
    fn volume(&self) -> f64;

    fn muted(&self) -> bool;

    fn playback_rate(&self) -> f64;

    fn buffered(&self) -> TimeRanges;

    /// Requests playback. The outcome arrives as [`MediaEvent::Play`] or
    /// [`MediaEvent::PlayRejected`].
    fn play(&mut self);

    fn pause(&mut self);

    fn set_current_time(&mut self, seconds: f64);

    fn set_volume(&mut self, volume: f64);

    fn set_muted(&mut self, muted: bool);

    fn set_playback_rate(&mut self, rate: f64);

    /// Points the resource at a new URL without loading it.
    fn set_src(&mut self, url: &str);

    /// Restarts resource selection and loading for the current source.
    fn load(&mut self);

    /// Returns the next queued event, if any.
    fn poll_event(&mut self) -> Option<MediaEvent>;

    /// De-registers listeners. Called once, on unmount.
    fn release(&mut self) {}
}
