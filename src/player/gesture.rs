// SPDX-License-Identifier: MPL-2.0
//! Touch gesture recognizer.
//!
//! Interprets one touch sequence, from contact to release, as exactly one of:
//! a horizontal drag that seeks, a vertical drag that changes volume, or a
//! tap that skips (left or right edge zone) or toggles playback (center).
//!
//! ```text
//! Idle ──start──▶ Pending ──moved past threshold──▶ Dragging(Seek | Volume)
//!   ▲                │                                      │
//!   └──── release ───┴──────────── release / cancel ────────┘
//! ```
//!
//! The axis is locked when the threshold is crossed and never re-evaluated.
//! Input originating inside an interactive control never leaves `Idle`.

use crate::config::defaults::{
    DEFAULT_DRAG_THRESHOLD_PX, DEFAULT_EDGE_ZONE_RATIO, DEFAULT_VOLUME_SENSITIVITY_PX,
};
use crate::config::PlayerConfig;
use crate::domain::geometry::{Point, Rect};
use crate::domain::video::{SkipStep, Volume};

/// Rectangles of interactive controls (buttons, sliders, menus) laid over
/// the video surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractiveRegions {
    regions: Vec<Rect>,
}

impl InteractiveRegions {
    #[must_use]
    pub fn new(regions: Vec<Rect>) -> Self {
        Self { regions }
    }

    /// Whether `point` falls inside any interactive control.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.regions.iter().any(|r| r.contains(point))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<Rect> for InteractiveRegions {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Geometry the recognizer maps positions against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// The touch target; taps are classified against its width.
    pub bounds: Rect,
    /// Width a full-length horizontal drag spans; seeks scale against it.
    pub viewport_width: f64,
}

impl Surface {
    /// A surface filling the whole viewport.
    #[must_use]
    pub fn fullscreen(width: f64, height: f64) -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, width, height),
            viewport_width: width,
        }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::fullscreen(0.0, 0.0)
    }
}

/// Instantaneous playback values read when a touch event arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSample {
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
}

/// Raw touch input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchInput {
    /// Contact began; `touches` is the number of simultaneous contacts.
    Start { position: Point, touches: usize },
    Move { position: Point },
    /// Release; `position` is where the lifted contact was.
    End { position: Point },
    /// The platform interrupted the sequence.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIntent {
    Seek,
    Volume,
}

impl From<Axis> for DragIntent {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::Seek,
            Axis::Vertical => Self::Volume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Idle,
    Pending,
    Dragging(DragIntent),
}

/// Per-gesture state, created at contact and discarded at release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureState {
    pub start: Point,
    /// Playback time at contact.
    pub start_time: f64,
    pub start_volume: f64,
    pub dragging: bool,
    pub axis_locked: Option<Axis>,
    pub intent: Option<DragIntent>,
}

impl GestureState {
    fn new(start: Point, sample: PlaybackSample) -> Self {
        Self {
            start,
            start_time: sample.current_time,
            start_volume: sample.volume,
            dragging: false,
            axis_locked: None,
            intent: None,
        }
    }
}

/// What a recognized gesture asks the player to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureAction {
    Seek(f64),
    SetVolume(Volume),
    Skip(f64),
    TogglePlay,
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    drag_threshold: f64,
    volume_sensitivity: f64,
    edge_zone_ratio: f64,
    skip_step: SkipStep,
    surface: Surface,
    regions: InteractiveRegions,
    current: Option<GestureState>,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD_PX,
            volume_sensitivity: DEFAULT_VOLUME_SENSITIVITY_PX,
            edge_zone_ratio: DEFAULT_EDGE_ZONE_RATIO,
            skip_step: SkipStep::default(),
            surface: Surface::default(),
            regions: InteractiveRegions::default(),
            current: None,
        }
    }
}

impl GestureRecognizer {
    #[must_use]
    pub fn from_config(config: &PlayerConfig) -> Self {
        Self {
            drag_threshold: config.drag_threshold_px(),
            volume_sensitivity: config.volume_sensitivity_px(),
            edge_zone_ratio: config.edge_zone_ratio(),
            skip_step: config.skip_step(),
            ..Self::default()
        }
    }

    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    #[must_use]
    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn set_regions(&mut self, regions: InteractiveRegions) {
        self.regions = regions;
    }

    #[must_use]
    pub fn regions(&self) -> &InteractiveRegions {
        &self.regions
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        match self.current {
            None => GesturePhase::Idle,
            Some(GestureState {
                intent: Some(intent),
                ..
            }) => GesturePhase::Dragging(intent),
            Some(_) => GesturePhase::Pending,
        }
    }

    #[must_use]
    pub fn gesture(&self) -> Option<&GestureState> {
        self.current.as_ref()
    }

    /// Abandons the current gesture without firing anything.
    pub fn cancel(&mut self) {
        if self.current.take().is_some() {
            log::debug!("Touch gesture cancelled");
        }
    }

    /// Feeds one touch event; returns the action it triggers, if any.
    pub fn handle(&mut self, input: TouchInput, sample: PlaybackSample) -> Option<GestureAction> {
        match input {
            TouchInput::Start { position, touches } => {
                self.start(position, touches, sample);
                None
            }
            TouchInput::Move { position } => self.track(position, sample),
            TouchInput::End { position } => self.release(position),
            TouchInput::Cancel => {
                self.cancel();
                None
            }
        }
    }

    fn start(&mut self, position: Point, touches: usize, sample: PlaybackSample) {
        if touches > 1 || self.current.is_some() {
            self.cancel();
            return;
        }
        if self.regions.contains(position) {
            log::debug!("Touch started on an interactive control, not a gesture");
            return;
        }
        self.current = Some(GestureState::new(position, sample));
    }

    fn track(&mut self, position: Point, sample: PlaybackSample) -> Option<GestureAction> {
        let gesture = self.current.as_mut()?;
        let dx = position.x - gesture.start.x;
        let dy = position.y - gesture.start.y;

        if !gesture.dragging {
            if gesture.start.distance(position) <= self.drag_threshold {
                return None;
            }
            let axis = if dy.abs() > dx.abs() {
                Axis::Vertical
            } else {
                Axis::Horizontal
            };
            gesture.dragging = true;
            gesture.axis_locked = Some(axis);
            gesture.intent = Some(axis.into());
        }

        match gesture.intent? {
            DragIntent::Seek => {
                let duration = sample.duration;
                if !(duration.is_finite() && duration > 0.0) || self.surface.viewport_width <= 0.0 {
                    return None;
                }
                let progress = dx / self.surface.viewport_width;
                let target = gesture.start_time + progress * duration;
                Some(GestureAction::Seek(target.clamp(0.0, duration)))
            }
            DragIntent::Volume => {
                let volume = gesture.start_volume - dy / self.volume_sensitivity;
                Some(GestureAction::SetVolume(Volume::new(volume)))
            }
        }
    }

    fn release(&mut self, position: Point) -> Option<GestureAction> {
        let gesture = self.current.take()?;
        if gesture.dragging {
            return None;
        }
        Some(self.classify_tap(position))
    }

    fn classify_tap(&self, position: Point) -> GestureAction {
        let bounds = self.surface.bounds;
        let x = position.x - bounds.x;
        let step = self.skip_step.value();

        if x < bounds.width * self.edge_zone_ratio {
            GestureAction::Skip(-step)
        } else if x > bounds.width * (1.0 - self.edge_zone_ratio) {
            GestureAction::Skip(step)
        } else {
            GestureAction::TogglePlay
        }
    }
}
