//! Error types for eventbot.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An event record carries a date that is not `YYYY-MM-DD`.
    #[error("event {event:?} has malformed {field} date {value:?}: {source}")]
    MalformedDate {
        event: String,
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("event not found: {0}")]
    NotFound(String),

    #[error("invalid event: {0}")]
    Invalid(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
