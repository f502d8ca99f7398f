//! Mapping between stored check-in rows and [`Interval`]s.
//!
//! The store hands back times either as bare `HH:MM` or as full timestamps.
//! Decoding runs the lenient [`extract_time_of_day`] once and then parses
//! strictly, so every malformed value is rejected here, before any conflict
//! math runs.
//!
//! Stored times are wall-clock `HH:MM` only. On the way in they are anchored to
//! a [`SessionWindow`], so a row written as `00:30` for a check-in made at
//! 24:30 reads back at minute 1470 and still collides with later check-ins
//! from the same night.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CheckinError, Result};
use crate::interval::{Interval, OwnerId};
use crate::options::SessionWindow;
use crate::time::{extract_time_of_day, TimeOfDay};

/// Postgres-style timestamp with a short `+00` offset.
const POSTGRES_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S%.f%#z";

/// A check-in row as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCheckIn {
    pub id: String,
    pub venue: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// A check-in row to insert; the store mints `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCheckIn {
    pub venue: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

/// Parse a JSON array of stored rows.
pub fn parse_records(json: &str) -> Result<Vec<StoredCheckIn>> {
    Ok(serde_json::from_str(json)?)
}

/// Map a stored row into an [`Interval`] on the default session, deriving its
/// duration.
pub fn decode_record(record: &StoredCheckIn) -> Result<Interval> {
    decode_record_in(record, &SessionWindow::default())
}

/// Map a stored row into an [`Interval`], anchoring its start to `window`.
///
/// Fails with [`CheckinError::InvalidSpan`] for a row spanning a day or more.
/// A `created_at` that cannot be read is logged and left out; it is only shown
/// to users and never takes part in conflict math.
pub fn decode_record_in(record: &StoredCheckIn, window: &SessionWindow) -> Result<Interval> {
    let start = decode_time("start_time", &record.start_time)?;
    let end = decode_time("end_time", &record.end_time)?;

    let mut interval = Interval::try_new(window.anchor(start), end)?
        .with_id(&record.id)
        .with_venue(&record.venue);
    if let Some(created_at) = decode_timestamp(&record.id, &record.created_at) {
        interval = interval.with_created_at(created_at);
    }

    Ok(match &record.owner_id {
        Some(owner) => interval.with_owner(OwnerId::new(owner)),
        None => interval,
    })
}

/// Decode a batch of rows on the default session, stopping at the first one
/// that fails.
pub fn decode_records(records: &[StoredCheckIn]) -> Result<Vec<Interval>> {
    decode_records_in(records, &SessionWindow::default())
}

pub fn decode_records_in(
    records: &[StoredCheckIn],
    window: &SessionWindow,
) -> Result<Vec<Interval>> {
    records
        .iter()
        .map(|record| decode_record_in(record, window))
        .collect()
}

/// The insert row for a newly submitted interval.
pub fn encode_interval(interval: &Interval) -> NewCheckIn {
    NewCheckIn {
        venue: interval.venue.clone(),
        start_time: interval.start.to_string(),
        end_time: interval.end.to_string(),
        owner_id: interval.owner.as_ref().map(|owner| owner.as_str().to_string()),
    }
}

fn decode_time(field: &'static str, raw: &str) -> Result<TimeOfDay> {
    extract_time_of_day(raw)
        .parse()
        .map_err(|_| CheckinError::Decode {
            field,
            reason: format!("'{}' does not contain an HH:MM time of day", raw),
        })
}

fn decode_timestamp(id: &str, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, POSTGRES_TIMESTAMP));
    match parsed {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(id, created_at = raw, error = %e, "ignoring unreadable created_at");
            None
        }
    }
}
