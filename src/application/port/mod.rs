// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines the environment boundary of the player core. The core
//! only talks to the outside world through these traits, so it runs the same
//! against a browser `<video>` element and against the in-memory headless
//! element used by hosts without a DOM and by tests.
//!
//! # Available Ports
//!
//! - [`media`]: The playable media resource and its event stream
//! - [`fullscreen`]: The environment's fullscreen capability
//!
//! # Design Notes
//!
//! - Traits are single-threaded (no `Send` bound): the core runs on the UI thread
//! - No `async fn` - asynchronous outcomes come back as queued events

pub mod fullscreen;
pub mod media;

pub use fullscreen::{FullscreenEvent, FullscreenHost};
pub use media::{MediaEvent, MediaResource, TimeRanges};
