//! Time codec: `HH:MM` strings to and from minutes since midnight.
//!
//! All arithmetic is done on [`TimeOfDay`], an unbounded count of minutes since
//! the session's reference midnight. A session that runs past midnight keeps
//! counting (01:30 the next morning is minute 1530), so comparisons never have
//! to guess about rollover. Wrapping into a single 24-hour day happens only when
//! a value is formatted for storage or display.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{CheckinError, Result};

/// Number of minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Compact date-time layouts tried by the lenient extractor once the `HH:MM`
/// pattern search has failed.
const COMPACT_LAYOUTS: &[&str] = &["%Y%m%dT%H%M%S", "%Y%m%dT%H%M", "%Y%m%d%H%M%S"];

/// Minutes since the reference midnight of a check-in session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u32);

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self(0);

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub const fn from_hm(hours: u32, minutes: u32) -> Self {
        Self(hours * 60 + minutes)
    }

    pub const fn minutes(self) -> u32 {
        self.0
    }

    /// Raw hour count; exceeds 23 for times past midnight of the same session.
    pub const fn hour(self) -> u32 {
        self.0 / 60
    }

    pub const fn minute(self) -> u32 {
        self.0 % 60
    }

    /// The same wall-clock time folded into the first day.
    pub const fn wrapped(self) -> Self {
        Self(self.0 % MINUTES_PER_DAY)
    }

    pub const fn add_minutes(self, minutes: u32) -> Self {
        Self(self.0.saturating_add(minutes))
    }

    /// Wall-clock minutes from `self` until `end`.
    ///
    /// Both values are folded into one day first; an `end` that lands before
    /// `self` is taken to be on the following day. At most one midnight crossing
    /// is assumed, so the result is always below [`MINUTES_PER_DAY`].
    pub const fn minutes_until(self, end: Self) -> u32 {
        let start = self.wrapped().0;
        let end = end.wrapped().0;
        if end < start {
            end + MINUTES_PER_DAY - start
        } else {
            end - start
        }
    }

    /// `HH:MM` without folding the hour, e.g. `25:30` for 01:30 the next morning.
    pub fn to_session_string(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// 12-hour clock with an AM/PM suffix, e.g. `1:05 PM`.
    pub fn to_12_hour(self) -> String {
        let hour = self.wrapped().hour();
        let suffix = if hour >= 12 { "PM" } else { "AM" };
        let hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour, self.minute(), suffix)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wrapped = self.wrapped();
        write!(f, "{:02}:{:02}", wrapped.hour(), wrapped.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = CheckinError;

    /// Strict `HH:MM` parse. Hours may exceed 23 (session times past midnight);
    /// minutes must be below 60.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = || CheckinError::MalformedTime(s.to_string());

        let mut parts = s.split(':');
        let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };
        let hours = parse_component(hours).ok_or_else(malformed)?;
        let minutes = parse_component(minutes).ok_or_else(malformed)?;
        if minutes >= 60 {
            return Err(malformed());
        }

        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .map(Self)
            .ok_or_else(malformed)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = CheckinError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

fn parse_component(part: &str) -> Option<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a bare `HH:MM` string into minutes since midnight.
pub fn to_minutes(time: &str) -> Result<u32> {
    time.parse::<TimeOfDay>().map(TimeOfDay::minutes)
}

/// Format minutes since midnight as `HH:MM`, folding the hour into 0–23.
///
/// Day-rollover information is lost; negative inputs fold backwards from
/// midnight.
pub fn to_time_string(minutes: i64) -> String {
    let folded = minutes.rem_euclid(i64::from(MINUTES_PER_DAY));
    format!("{:02}:{:02}", folded / 60, folded % 60)
}

/// End time of an interval starting at `start` and lasting `duration_minutes`.
///
/// Negative durations are not rejected, but callers should not pass them.
pub fn add_duration(start: &str, duration_minutes: i64) -> Result<String> {
    let start = to_minutes(start)?;
    Ok(to_time_string(i64::from(start) + duration_minutes))
}

/// Format an `HH:MM` string on the 12-hour clock: `00:00` becomes `12:00 AM`.
pub fn format_for_display(time: &str) -> Result<String> {
    Ok(time.parse::<TimeOfDay>()?.to_12_hour())
}

/// Best-effort extraction of an `HH:MM` time of day from a stored value.
///
/// Uses the local timezone when the value carries an offset and has to be
/// parsed as a full date-time. See [`extract_time_of_day_in`].
pub fn extract_time_of_day(value: &str) -> String {
    extract_time_of_day_in(value, &Local)
}

/// Best-effort extraction of an `HH:MM` time of day, converting offset-carrying
/// date-times into `tz`.
///
/// In order:
/// 1. A bare `HH:MM` string is returned unchanged.
/// 2. The first embedded `HH:MM` pattern is returned (e.g. the time part of
///    `2024-01-01T10:30:00+00:00`).
/// 3. The value is parsed as a date-time and its hour and minute are returned.
/// 4. The input is returned unchanged.
///
/// This never fails. Strict parsing is left to the caller (see
/// [`crate::record::decode_record`]), which is where malformed values surface.
pub fn extract_time_of_day_in<Tz: TimeZone>(value: &str, tz: &Tz) -> String {
    if let Some(found) = find_hh_mm(value) {
        return found.to_string();
    }

    if let Some((hour, minute)) = parse_date_time(value, tz) {
        return format!("{:02}:{:02}", hour, minute);
    }

    tracing::warn!(value, "could not extract a time of day, passing value through");
    value.to_string()
}

/// First `\d{2}:\d{2}` match in `value`.
fn find_hh_mm(value: &str) -> Option<&str> {
    let bytes = value.as_bytes();
    bytes.windows(5).position(is_hh_mm).map(|i| &value[i..i + 5])
}

fn is_hh_mm(window: &[u8]) -> bool {
    window[0].is_ascii_digit()
        && window[1].is_ascii_digit()
        && window[2] == b':'
        && window[3].is_ascii_digit()
        && window[4].is_ascii_digit()
}

fn parse_date_time<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<(u32, u32)> {
    let value = value.trim();

    let parsed = DateTime::parse_from_rfc3339(value).or_else(|_| DateTime::parse_from_rfc2822(value));
    if let Ok(dt) = parsed {
        let local = dt.with_timezone(tz);
        return Some((local.hour(), local.minute()));
    }

    COMPACT_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .map(|naive| (naive.hour(), naive.minute()))
}

/// Minutes elapsed from `start` to `end`, both normalized with
/// [`extract_time_of_day`].
///
/// An `end` numerically before `start` is taken to be on the next day, so the
/// result is never negative.
pub fn elapsed_minutes(start: &str, end: &str) -> Result<u32> {
    let start: TimeOfDay = extract_time_of_day(start).parse()?;
    let end: TimeOfDay = extract_time_of_day(end).parse()?;
    Ok(start.minutes_until(end))
}
