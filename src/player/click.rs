// SPDX-License-Identifier: MPL-2.0
//! Double-click detection for the video surface.

use crate::domain::geometry::Point;
use std::time::{Duration, Instant};

/// Click sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    window: Duration,
    last_click: Option<Instant>,
    last_position: Option<Point>,
}

/// Messages for the click sub-component.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    Click { position: Point, now: Instant },
    /// Forget the last click, e.g. after a touch gesture consumed the input.
    Reset,
}

/// Effects produced by clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Second click within the window: the orchestrator toggles fullscreen.
    DoubleClick,
}

impl State {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_click: None,
            last_position: None,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Click { position, now } => {
                let is_double_click = self
                    .last_click
                    .is_some_and(|t| now.saturating_duration_since(t) < self.window);

                self.last_position = Some(position);
                if is_double_click {
                    self.last_click = None; // Reset to avoid triple-click
                    Effect::DoubleClick
                } else {
                    self.last_click = Some(now);
                    Effect::None
                }
            }
            Message::Reset => {
                self.last_click = None;
                Effect::None
            }
        }
    }

    #[must_use]
    pub fn last_position(&self) -> Option<Point> {
        self.last_position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(350);

    fn click(state: &mut State, now: Instant) -> Effect {
        state.handle(Message::Click {
            position: Point::new(10.0, 10.0),
            now,
        })
    }

    #[test]
    fn second_click_within_window_is_double() {
        let mut state = State::new(WINDOW);
        let now = Instant::now();
        assert_eq!(click(&mut state, now), Effect::None);
        assert_eq!(
            click(&mut state, now + Duration::from_millis(200)),
            Effect::DoubleClick
        );
    }

    #[test]
    fn slow_clicks_stay_single() {
        let mut state = State::new(WINDOW);
        let now = Instant::now();
        click(&mut state, now);
        assert_eq!(click(&mut state, now + WINDOW), Effect::None);
    }

    #[test]
    fn triple_click_yields_one_double() {
        let mut state = State::new(WINDOW);
        let now = Instant::now();
        click(&mut state, now);
        assert_eq!(
            click(&mut state, now + Duration::from_millis(100)),
            Effect::DoubleClick
        );
        assert_eq!(
            click(&mut state, now + Duration::from_millis(200)),
            Effect::None
        );
    }

    #[test]
    fn reset_forgets_pending_click() {
        let mut state = State::new(WINDOW);
        let now = Instant::now();
        click(&mut state, now);
        state.handle(Message::Reset);
        assert_eq!(
            click(&mut state, now + Duration::from_millis(100)),
            Effect::None
        );
        assert_eq!(state.last_position(), Some(Point::new(10.0, 10.0)));
    }
}
