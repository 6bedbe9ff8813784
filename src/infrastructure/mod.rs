// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`headless`]: In-memory media element and fullscreen host (no DOM)
//! - `web`: Browser `<video>` element and Fullscreen API (feature `web`)
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Asynchronous outcomes are queued as port events, never returned

pub mod headless;
#[cfg(feature = "web")]
pub mod web;

pub use headless::{HeadlessFullscreen, HeadlessMedia};
#[cfg(feature = "web")]
pub use web::{WebFullscreen, WebMedia};
