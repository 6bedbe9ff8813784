// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value types with no environment dependencies.
//!
//! # Modules
//!
//! - [`geometry`]: Pointer coordinates ([`Point`](geometry::Point), [`Rect`](geometry::Rect))
//! - [`video`]: Playback values ([`PlayerState`](video::PlayerState),
//!   [`QualityOption`](video::QualityOption), [`Volume`](video::Volume),
//!   [`PlaybackSpeed`](video::PlaybackSpeed))

pub mod geometry;
pub mod video;
