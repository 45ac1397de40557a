//! Error types for eventboard.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::event::{Event, EventId};

/// Errors that can occur in eventboard operations.
#[derive(Error, Debug)]
pub enum EventBoardError {
    #[error("Invalid time window: end ({end}) must be after start ({start})")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("Event time overlaps with '{}' ({} - {})", .0.title, .0.start, .0.end)]
    OverlapConflict(Box<Event>),

    #[error("Event not found: {0}")]
    NotFound(EventId),

    #[error("An event with id '{0}' already exists")]
    DuplicateId(EventId),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("An account for '{0}' already exists")]
    EmailTaken(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EventBoardError {
    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        EventBoardError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// The stored event a candidate collided with, if this is an overlap rejection.
    pub fn conflict(&self) -> Option<&Event> {
        match self {
            EventBoardError::OverlapConflict(event) => Some(event),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for EventBoardError {
    fn from(err: serde_json::Error) -> Self {
        EventBoardError::Serialization(err.to_string())
    }
}

/// Result type alias for eventboard operations.
pub type EventBoardResult<T> = Result<T, EventBoardError>;
