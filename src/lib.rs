// SPDX-License-Identifier: MPL-2.0
//! `touchplay` is the headless core of a touch-friendly video player.
//!
//! It derives one consistent [`PlayerState`](domain::video::PlayerState) from
//! an asynchronous media resource, turns touch sequences into seek, volume,
//! skip and play intents, and exposes the commands a control surface needs.
//! Rendering is left to the host, which reads the state and draws it.
//!
//! # Layers
//!
//! - [`domain`]: value types (volume, speed, qualities, state record)
//! - [`application`]: the ports the core talks to the environment through
//! - [`player`]: the core itself
//! - [`infrastructure`]: port adapters (headless, and browser with `web`)
//! - [`config`]: tuning values loaded from TOML

#![doc(html_root_url = "https://docs.rs/touchplay/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod player;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::{Error, MediaError, RequestError, Result};
pub use player::{Action, Player, PlayerProps};
