//! Check-in intervals, their identifiers, and owner tagging.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CheckinError, Result};
use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// Opaque identifier of a stored check-in, unique within its collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntervalId(String);

impl IntervalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntervalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies whose timeline an interval belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single check-in: a venue occupied over `[start, end)`.
///
/// `end` is never numerically before `start`; an end time that falls after
/// midnight is carried on the following day (e.g. 23:00–01:00 is stored as
/// minutes 1380–1500). `duration_minutes` always equals the wall-clock distance
/// from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interval {
    /// `None` for a candidate that has not been stored yet.
    pub id: Option<IntervalId>,
    pub venue: String,
    pub owner: Option<OwnerId>,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub duration_minutes: u32,
    /// Display ordering only; never consulted by conflict logic.
    pub created_at: Option<DateTime<Utc>>,
}

impl Interval {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        let mut interval = Self {
            id: None,
            venue: String::new(),
            owner: None,
            start,
            end,
            duration_minutes: 0,
            created_at: None,
        };
        interval.set_range(start, end);
        interval
    }

    pub fn starting_at(start: TimeOfDay, duration_minutes: u32) -> Self {
        Self::new(start, start.add_minutes(duration_minutes))
    }

    /// Like [`Interval::new`], but rejects ranges spanning a full day or more,
    /// whose wall-clock duration cannot be told apart from zero.
    pub fn try_new(start: TimeOfDay, end: TimeOfDay) -> Result<Self> {
        let interval = Self::new(start, end);
        if !interval.is_consistent() {
            return Err(CheckinError::InvalidSpan {
                start: start.to_session_string(),
                end: end.to_session_string(),
            });
        }
        Ok(interval)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(IntervalId::new(id));
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    pub fn with_owner(mut self, owner: OwnerId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Replace the time range, rolling `end` onto the next day if needed and
    /// recomputing the duration.
    pub fn set_range(&mut self, start: TimeOfDay, end: TimeOfDay) {
        let mut end = end;
        while end < start {
            end = end.add_minutes(MINUTES_PER_DAY);
        }
        self.start = start;
        self.end = end;
        self.duration_minutes = start.minutes_until(end);
    }

    /// Whether the range is shorter than a day and `duration_minutes` matches it.
    pub fn is_consistent(&self) -> bool {
        self.end >= self.start
            && self.end.minutes() - self.start.minutes() < MINUTES_PER_DAY
            && self.duration_minutes == self.start.minutes_until(self.end)
    }

    /// Half-open overlap: `self.start < other.end && other.start < self.end`.
    ///
    /// Intervals that only touch (one ends exactly when the other starts) do not
    /// overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Length of the shared part of both ranges, zero when they do not overlap.
    pub fn overlap_minutes(&self, other: &Interval) -> u32 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        end.minutes().saturating_sub(start.minutes())
    }

    /// Identifier for log and error messages.
    pub fn display_id(&self) -> String {
        match &self.id {
            Some(id) => id.to_string(),
            None => "<pending>".to_string(),
        }
    }
}

/// The part of `intervals` that belongs to `owner`, in input order.
///
/// Conflicts are only ever computed against one owner's own timeline; callers
/// narrow the collection with this before detection.
pub fn owned_by(intervals: &[Interval], owner: &OwnerId) -> Vec<Interval> {
    intervals
        .iter()
        .filter(|interval| interval.owner.as_ref() == Some(owner))
        .cloned()
        .collect()
}
