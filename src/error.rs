//! Error types

use thiserror::Error;

/// Invalid static configuration. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("catalog has no {0} cities")]
    EmptyTier(&'static str),
    #[error("catalog needs at least 2 distinct city names, found {0}")]
    TooFewDistinctNames(usize),
    #[error("city {name:?} has out-of-range coordinates ({lat}, {lng})")]
    InvalidCoordinates { name: String, lat: f64, lng: f64 },
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),
    #[error("malformed date key {0:?} (expected YYYY-MM-DD)")]
    MalformedDateKey(String),
}

/// Trusted-time check failed. Recovered by falling back to the local clock.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimeSourceError {
    #[error("trusted time is not available on this platform")]
    Unsupported,
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("response has no Date header")]
    MissingDateHeader,
    #[error("malformed Date header {0:?}")]
    MalformedDate(String),
}

/// An action arrived in a state that does not accept it.
///
/// State is never modified when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidTransition {
    #[error("today's game is already finished")]
    AlreadyFinished,
    #[error("not currently playing a round")]
    NotPlaying,
    #[error("guess ({0}, {1}) is not a point on the globe")]
    OffGlobe(f64, f64),
    #[error("no pending guess to confirm")]
    NoPendingGuess,
    #[error("all hints already used")]
    HintsExhausted,
    #[error("round result is not being shown")]
    NotRevealed,
    #[error("no daily data loaded for round {0}")]
    MissingRound(u8),
}

/// Saving or loading the local game blob failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("write failed: {0}")]
    Write(String),
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
