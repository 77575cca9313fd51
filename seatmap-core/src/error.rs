//! Error taxonomy
//!
//! Only [`VenueLoadError`] ends a session. Persistence failures are logged and
//! recovered from, and selection refusals are not errors at all (see
//! [`ToggleOutcome`](crate::selection::ToggleOutcome)).

use std::path::PathBuf;

use thiserror::Error;

/// The venue document could not be fetched or did not match the venue shape.
///
/// Terminal for the session until the caller retries the fetch. The error is
/// `Clone` so it can travel inside a [`SessionAction`](crate::SessionAction).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueLoadError {
    /// Reading a local venue file failed
    #[error("failed to read venue file {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// The HTTP request never produced a response
    #[error("failed to fetch venue from {url}: {message}")]
    Http { url: String, message: String },

    /// The server answered with a non-success status
    #[error("venue request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The document is not a venue
    #[error("malformed venue data: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for VenueLoadError {
    fn from(err: serde_json::Error) -> Self {
        VenueLoadError::Parse(err.to_string())
    }
}

/// Durable selection storage failed.
///
/// Never propagated to the user: reads fall back to an empty selection and
/// writes leave the in-memory selection as it is.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The storage backend could not be read
    #[error("failed to read stored selection: {0}")]
    Read(#[source] std::io::Error),

    /// The stored value is not a JSON array of seat identifiers
    #[error("stored selection is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The storage backend rejected a write or removal
    #[error("failed to write stored selection: {0}")]
    Write(#[source] std::io::Error),
}

/// A configuration file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown key {0:?} in keybindings")]
    UnknownKey(String),
}
