// SPDX-License-Identifier: MPL-2.0
//! Video playback domain types.
//!
//! This module contains video-related value objects that are independent of
//! any environment or presentation concerns.

pub mod newtypes;
pub mod quality;
pub mod state;
pub mod timecode;

// Re-export commonly used types
pub use newtypes::{PlaybackSpeed, SkipStep, Volume};
pub use quality::{QualityList, QualityOption, SourceSpec};
pub use state::{PlayerState, StateUpdate};
