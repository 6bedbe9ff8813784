// SPDX-License-Identifier: MPL-2.0
//! Error types for the player core.
//!
//! Commands never return these: expected edge cases are clamped, ignored or
//! logged at the command boundary. The types here describe what the
//! environment reports back (media errors, rejected requests) and what the
//! fallible setup paths (configuration) can fail with.

use std::fmt;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Media Error: {0}")]
    Media(#[from] MediaError),

    /// A browser adapter could not be set up.
    #[error("Web Error: {0}")]
    Web(String),
}

/// Playback failure reported by the media resource.
///
/// Mirrors the error codes a browser media element exposes, plus a catch-all
/// for environments that only report a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    /// Fetching was aborted at the user's request.
    #[error("Media loading aborted")]
    Aborted,

    /// A network error stopped the fetch.
    #[error("Network error: {0}")]
    Network(String),

    /// The resource could not be decoded.
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// The source URL or its format is not supported.
    #[error("Source not supported: {0}")]
    SourceNotSupported(String),

    /// Generic error with raw message.
    #[error("{0}")]
    Other(String),
}

impl MediaError {
    /// Builds an error from a media element error code (1-4) and its message.
    pub fn from_code(code: u16, message: &str) -> Self {
        match code {
            1 => MediaError::Aborted,
            2 => MediaError::Network(message.to_string()),
            3 => MediaError::Decode(message.to_string()),
            4 => MediaError::SourceNotSupported(message.to_string()),
            _ => MediaError::Other(message.to_string()),
        }
    }

    /// Returns a stable message key renderers can map to localized text.
    pub fn key(&self) -> &'static str {
        match self {
            MediaError::Aborted => "error-media-aborted",
            MediaError::Network(_) => "error-media-network",
            MediaError::Decode(_) => "error-media-decode",
            MediaError::SourceNotSupported(_) => "error-media-source-not-supported",
            MediaError::Other(_) => "error-media-general",
        }
    }
}

/// An asynchronous request issued to the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    Play,
    EnterFullscreen,
    ExitFullscreen,
}

impl fmt::Display for PendingRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingRequest::Play => write!(f, "play"),
            PendingRequest::EnterFullscreen => write!(f, "enter fullscreen"),
            PendingRequest::ExitFullscreen => write!(f, "exit fullscreen"),
        }
    }
}

/// The environment refused an asynchronous request (autoplay policy,
/// missing user gesture, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{request} request rejected: {reason}")]
pub struct RequestError {
    pub request: PendingRequest,
    pub reason: String,
}

impl RequestError {
    pub fn new(request: PendingRequest, reason: impl Into<String>) -> Self {
        Self {
            request,
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
