//! Shrink existing check-ins so they no longer overlap a new one.
//!
//! The candidate is never changed. Each conflicting interval is clipped against
//! the candidate alone, never against the other conflicts:
//!
//! - candidate starts first: the conflict now starts where the candidate ends;
//! - conflict starts first: the conflict now ends where the candidate starts;
//! - both start together: the conflict now ends where the candidate ends.
//!
//! [`resolve`] wraps this in the full submission round: detect, adjust, merge,
//! and check that the merged timeline is still free of overlaps. A conflict
//! that shared the candidate's start ends up covering exactly the candidate's
//! range, so `resolve` reports it as superseded and leaves it out of the
//! timeline.

use std::cmp::Ordering;

use serde::Serialize;

use crate::conflict::find_conflicts;
use crate::error::{CheckinError, Result};
use crate::interval::Interval;

/// A conflicting interval before and after adjustment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub original: Interval,
    pub adjusted: Interval,
}

/// Outcome of submitting a candidate against an existing timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// The submitted interval, unchanged.
    pub candidate: Interval,
    /// Before/after pairs for every conflict, in input order.
    pub adjustments: Vec<Adjustment>,
    /// Adjusted conflicts that shared the candidate's start and now coincide
    /// with it. They are not part of `timeline`; removing them from the store
    /// is up to the caller.
    pub superseded: Vec<Interval>,
    /// The merged timeline: candidate, then the remaining adjusted conflicts,
    /// then untouched intervals in input order.
    pub timeline: Vec<Interval>,
}

impl Resolution {
    pub fn has_conflicts(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

/// Adjusted copies of `conflicts`, position-for-position with the input.
///
/// Conflicts are processed in ascending start order, but since each one is
/// clipped only against `candidate`, the order does not change the result.
/// Every returned interval has its duration recomputed from its new range.
pub fn adjust(candidate: &Interval, conflicts: &[Interval]) -> Vec<Interval> {
    let mut order: Vec<usize> = (0..conflicts.len()).collect();
    order.sort_by_key(|&i| conflicts[i].start);

    let mut adjusted = conflicts.to_vec();
    for i in order {
        adjusted[i] = adjust_one(candidate, &conflicts[i]);
    }
    adjusted
}

fn adjust_one(candidate: &Interval, conflict: &Interval) -> Interval {
    let mut adjusted = conflict.clone();

    match candidate.start.cmp(&conflict.start) {
        Ordering::Less => {
            if candidate.end > conflict.start {
                if candidate.end > conflict.end {
                    tracing::warn!(
                        conflict = %conflict.display_id(),
                        "candidate engulfs conflict; its end rolls onto the next day"
                    );
                }
                adjusted.set_range(candidate.end, conflict.end);
            }
        }
        Ordering::Greater => {
            if candidate.start < conflict.end {
                adjusted.set_range(conflict.start, candidate.start);
            }
        }
        Ordering::Equal => {
            adjusted.set_range(conflict.start, candidate.end);
        }
    }

    debug_assert!(adjusted.is_consistent());
    tracing::debug!(
        conflict = %conflict.display_id(),
        start = %adjusted.start,
        end = %adjusted.end,
        duration = adjusted.duration_minutes,
        "adjusted conflicting check-in"
    );

    adjusted
}

/// Pair each conflict with its adjusted version for a before/after preview.
pub fn compute_display_adjustments(candidate: &Interval, conflicts: &[Interval]) -> Vec<Adjustment> {
    conflicts
        .iter()
        .cloned()
        .zip(adjust(candidate, conflicts))
        .map(|(original, adjusted)| Adjustment { original, adjusted })
        .collect()
}

/// Run a full submission round of `candidate` against `existing`.
///
/// `existing` should already be narrowed to the candidate owner's timeline
/// (see [`crate::interval::owned_by`]). Conflicts sharing the candidate's
/// start are moved to [`Resolution::superseded`]. Fails with
/// [`CheckinError::UnresolvedOverlap`] if an adjusted interval still overlaps
/// the candidate, another adjusted interval or an untouched one, which can only
/// happen when `existing` overlapped itself to begin with or the candidate
/// engulfed a conflict.
pub fn resolve(candidate: &Interval, existing: &[Interval]) -> Result<Resolution> {
    let conflicts = find_conflicts(candidate, existing);
    let adjustments = compute_display_adjustments(candidate, &conflicts);

    let (superseded, adjusted): (Vec<Interval>, Vec<Interval>) = adjustments
        .iter()
        .map(|a| a.adjusted.clone())
        .partition(|adjusted| adjusted.start == candidate.start);
    for interval in &superseded {
        tracing::debug!(
            conflict = %interval.display_id(),
            "conflict shares the candidate's start and is superseded"
        );
    }

    let untouched: Vec<Interval> = existing
        .iter()
        .filter(|interval| !candidate.overlaps(interval))
        .cloned()
        .collect();

    ensure_disjoint(candidate, &adjusted, &untouched)?;

    let mut timeline = Vec::with_capacity(1 + adjusted.len() + untouched.len());
    timeline.push(candidate.clone());
    timeline.extend(adjusted);
    timeline.extend(untouched);

    Ok(Resolution {
        candidate: candidate.clone(),
        adjustments,
        superseded,
        timeline,
    })
}

/// Every adjusted interval must be clear of the candidate, of the other
/// adjusted intervals and of everything left untouched.
fn ensure_disjoint(
    candidate: &Interval,
    adjusted: &[Interval],
    untouched: &[Interval],
) -> Result<()> {
    for (i, first) in adjusted.iter().enumerate() {
        let others = std::iter::once(candidate)
            .chain(&adjusted[i + 1..])
            .chain(untouched);
        for second in others {
            if first.overlaps(second) {
                return Err(CheckinError::UnresolvedOverlap {
                    first: first.display_id(),
                    second: second.display_id(),
                    overlap_minutes: first.overlap_minutes(second),
                });
            }
        }
    }
    Ok(())
}
