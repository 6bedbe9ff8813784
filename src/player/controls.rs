// SPDX-License-Identifier: MPL-2.0
//! Controls auto-hide sub-component.
//!
//! Any activity shows the controls and re-arms a one-shot hide deadline.
//! When the deadline passes the controls hide, but only if playback is
//! running at that moment: a paused player keeps its controls on screen.

use std::time::{Duration, Instant};

/// Auto-hide timer state.
#[derive(Debug, Clone)]
pub struct State {
    hide_delay: Duration,
    deadline: Option<Instant>,
}

/// Messages for the controls sub-component.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// User activity: show controls and restart the hide timer.
    Activity(Instant),
    /// Time passed; `playing` is the playback state at `now`.
    Tick { now: Instant, playing: bool },
    /// Drop the pending hide without firing it.
    Cancel,
}

/// Effects produced by the controls sub-component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    VisibilityChanged(bool),
}

impl State {
    #[must_use]
    pub fn new(hide_delay: Duration) -> Self {
        Self {
            hide_delay,
            deadline: None,
        }
    }

    #[must_use]
    pub fn hide_delay(&self) -> Duration {
        self.hide_delay
    }

    /// When the pending hide fires, if one is armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Activity(now) => {
                // At most one pending hide: re-arming replaces the previous one.
                self.deadline = Some(now + self.hide_delay);
                Effect::VisibilityChanged(true)
            }
            Message::Tick { now, playing } => match self.deadline {
                Some(deadline) if now >= deadline => {
                    self.deadline = None;
                    if playing {
                        Effect::VisibilityChanged(false)
                    } else {
                        Effect::None
                    }
                }
                _ => Effect::None,
            },
            Message::Cancel => {
                self.deadline = None;
                Effect::None
            }
        }
    }
}
