//! Error types for each layer of the bridge
//!
//! None of these reach the player. Store and codec failures are logged and
//! collapse to "no state" or a dropped save at the message boundary.

use thiserror::Error;

/// Persistent store access failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Storage handle could not be obtained (no window, storage disabled)
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A single get/set threw
    #[error("storage access failed for key {key}: {message}")]
    Access { key: String, message: String },
}

/// Stored text is not a valid serialized day state
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed day state: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Sync bridge failure for one load/save operation
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("day {0} is outside the calendar (1-24)")]
    InvalidDay(u8),
}

/// Bridge configuration could not be parsed
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bridge config: {0}")]
    Parse(#[from] serde_json::Error),
}
