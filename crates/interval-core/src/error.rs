//! Error types for the date-time and duration delegates.
//!
//! These never cross the interval surface: the parser downgrades them to an
//! invalid [`Interval`](crate::Interval).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid ISO 8601 date-time: {0}")]
    DateTime(String),

    #[error("Invalid ISO 8601 duration: {0}")]
    Duration(String),

    #[error("Invalid timezone: {0}")]
    Timezone(String),

    #[error("Nonexistent local time: {0}")]
    NonexistentLocalTime(String),
}

pub type Result<T> = std::result::Result<T, ParseError>;
