// SPDX-License-Identifier: MPL-2.0
//! Fullscreen capability port.
//!
//! Fullscreen belongs to the environment (the document or window), not to
//! the player. The core asks for it and learns the outcome from
//! [`FullscreenEvent::Changed`]; it never infers the flag from the request.

/// Outcomes reported by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FullscreenEvent {
    /// The environment's fullscreen flag changed; read `is_fullscreen`.
    Changed,
    /// A request or exit was refused.
    Rejected(String),
}

/// Port for the environment's fullscreen capability.
pub trait FullscreenHost {
    /// Whether the player container is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Asks the environment to show the player container fullscreen.
    fn request_fullscreen(&mut self);

    /// Asks the environment to leave fullscreen.
    fn exit_fullscreen(&mut self);

    /// Returns the next queued event, if any.
    fn poll_event(&mut self) -> Option<FullscreenEvent>;

    /// De-registers listeners. Called once, on unmount.
    fn release(&mut self) {}
}
