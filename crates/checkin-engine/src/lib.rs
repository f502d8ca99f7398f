//! # checkin-engine
//!
//! Overlap detection and adjustment for venue check-in timelines.
//!
//! A check-in occupies a venue over a half-open time window. When a user submits
//! a new check-in, any of their own earlier check-ins that overlap it are
//! shrunk so the timeline stays free of overlaps, while the new check-in keeps
//! exactly the window that was requested.
//!
//! ## Modules
//!
//! - [`time`] — `HH:MM` ↔ minutes since midnight, durations, display formats
//! - [`options`] — Start-time and duration choices for a session
//! - [`interval`] — The check-in interval model and owner filtering
//! - [`conflict`] — Find check-ins that overlap a candidate
//! - [`resolver`] — Shrink conflicting check-ins and merge the timeline
//! - [`record`] — Decode stored rows into intervals and back
//! - [`error`] — Error types

pub mod conflict;
pub mod error;
pub mod interval;
pub mod options;
pub mod record;
pub mod resolver;
pub mod time;

pub use conflict::{find_conflicts, find_overlapping_pairs, overlaps, Overlap};
pub use error::CheckinError;
pub use interval::{owned_by, Interval, IntervalId, OwnerId};
pub use options::{candidate_durations, candidate_start_times, DurationOption, SessionWindow};
pub use record::{
    decode_record, decode_record_in, decode_records, decode_records_in, encode_interval,
    NewCheckIn, StoredCheckIn,
};
pub use resolver::{adjust, compute_display_adjustments, resolve, Adjustment, Resolution};
pub use time::TimeOfDay;
