// SPDX-License-Identifier: MPL-2.0
//! Application layer - the environment boundary.
//!
//! - [`port`]: Trait definitions the infrastructure adapters implement
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The player core drives the ports and never names an adapter
//!
//! # Example
//!
//! ```ignore
//! use touchplay::application::port::{MediaEvent, MediaResource};
//!
//! struct NativeVideo { /* ... */ }
//! impl MediaResource for NativeVideo { /* ... */ }
//! ```

pub mod port;
