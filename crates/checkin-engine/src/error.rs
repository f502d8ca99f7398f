//! Error types for checkin-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckinError {
    #[error("Malformed time '{0}': expected HH:MM")]
    MalformedTime(String),

    #[error("Check-in from {start} to {end} must be shorter than a day")]
    InvalidSpan { start: String, end: String },

    #[error("Cannot decode check-in record field '{field}': {reason}")]
    Decode { field: &'static str, reason: String },

    #[error("Invalid check-in records JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Intervals {first} and {second} still overlap by {overlap_minutes} min after adjustment")]
    UnresolvedOverlap {
        first: String,
        second: String,
        overlap_minutes: u32,
    },
}

pub type Result<T> = std::result::Result<T, CheckinError>;
