//! Start-time and duration choices offered when submitting a check-in.

use serde::{Deserialize, Serialize};

use crate::time::{TimeOfDay, MINUTES_PER_DAY};

/// The evening session start times are drawn from.
///
/// `closes` may run past midnight (hour 24 and up), so a whole session is one
/// continuous run of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionWindow {
    pub opens: TimeOfDay,
    /// Last offered start time, inclusive.
    pub closes: TimeOfDay,
    pub step_minutes: u32,
}

impl Default for SessionWindow {
    /// 17:00 until 02:00 the next morning, every 30 minutes.
    fn default() -> Self {
        Self {
            opens: TimeOfDay::from_hm(17, 0),
            closes: TimeOfDay::from_hm(26, 0),
            step_minutes: 30,
        }
    }
}

impl SessionWindow {
    /// Place a wall-clock time on the session's minute line.
    ///
    /// A session runs from `opens` until `opens` the next day, so a time earlier
    /// than `opens` belongs to the following morning: `00:30` becomes `24:30`
    /// under the default window. Times already past midnight (hour 24 and up)
    /// are kept.
    pub fn anchor(&self, time: TimeOfDay) -> TimeOfDay {
        if time.minutes() < MINUTES_PER_DAY && time < self.opens.wrapped() {
            time.add_minutes(MINUTES_PER_DAY)
        } else {
            time
        }
    }

    /// Start times from `opens`, or from the first step boundary at or after
    /// `reference` once the session has opened, through `closes`.
    pub fn start_times(&self, reference: TimeOfDay) -> StartTimes {
        let step = self.step_minutes.max(1);
        let reference = reference.wrapped();

        let first = if reference > self.opens {
            let minutes = reference.minutes().div_ceil(step) * step;
            TimeOfDay::from_minutes(minutes)
        } else {
            self.opens
        };

        StartTimes {
            next: first,
            last: self.closes,
            step,
        }
    }
}

/// Finite, restartable sequence of start times; clone it to start over.
#[derive(Debug, Clone)]
pub struct StartTimes {
    next: TimeOfDay,
    last: TimeOfDay,
    step: u32,
}

impl Iterator for StartTimes {
    type Item = TimeOfDay;

    fn next(&mut self) -> Option<TimeOfDay> {
        if self.next > self.last {
            return None;
        }
        let current = self.next;
        self.next = current.add_minutes(self.step);
        Some(current)
    }
}

/// Start times for the default session. Format them with
/// [`TimeOfDay::to_session_string`] to keep hours past midnight as 24 and up.
pub fn candidate_start_times(reference: TimeOfDay) -> StartTimes {
    SessionWindow::default().start_times(reference)
}

/// One selectable check-in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationOption {
    pub minutes: u32,
    pub label: String,
    /// `HH:MM` end time, present only when a start time was given.
    pub end_time: Option<String>,
}

/// Quarter hours up to one hour, then half hours from 1.5 to 6 hours.
pub fn candidate_durations(start: Option<TimeOfDay>) -> Vec<DurationOption> {
    (15..=60)
        .step_by(15)
        .chain((90..=360).step_by(30))
        .map(|minutes| DurationOption {
            minutes,
            label: duration_label(minutes),
            end_time: start.map(|start| start.add_minutes(minutes).to_string()),
        })
        .collect()
}

fn duration_label(minutes: u32) -> String {
    let hours = minutes / 60;
    let plural = if hours > 1 { "s" } else { "" };

    match minutes % 60 {
        _ if hours == 0 => format!("{} min", minutes),
        0 => format!("{} hour{}", hours, plural),
        30 => format!("{}.5 hours", hours),
        rest => format!("{} hour{} {} min", hours, plural, rest),
    }
}
