//! Error types for the gearbox crate

use thiserror::Error;

/// Main error type for the gearbox crate
///
/// Every variant describes a programming or environment error. A turn that
/// breaks the game rules is not an error: it is reported through
/// [`crate::outcome::TurnValidity`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("player index {player} is out of range for {participants} participants")]
    PlayerOutOfRange { player: usize, participants: usize },

    #[error("player index {value} is negative")]
    NegativePlayerIndex { value: i64 },

    #[error("per-player field '{field}' has {got} entries, expected {expected}")]
    ShapeMismatch {
        field: String,
        expected: usize,
        got: usize,
    },

    #[error("a valid turn cannot have the receiving participant at fault")]
    InconsistentValidity,

    #[error("invalid participant count: {count}")]
    InvalidParticipantCount { count: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unknown move '{input}' (expected one of: rock, paper, scissors)")]
    UnknownMove { input: String },

    #[error("unknown agent '{input}'. Expected one of: {expected}")]
    UnknownAgent { input: String, expected: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
