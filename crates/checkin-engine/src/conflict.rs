//! Detect check-ins that overlap a newly submitted one.
//!
//! Overlap is half-open: `[a.start, a.end)` and `[b.start, b.end)` overlap iff
//! `a.start < b.end && b.start < a.end`. Adjacent check-ins (one ends exactly
//! when another starts) are NOT conflicts.

use serde::Serialize;

use crate::error::Result;
use crate::interval::Interval;
use crate::time::to_minutes;

/// Two intervals of one collection that overlap each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlap {
    pub first: Interval,
    pub second: Interval,
    pub overlap_minutes: u32,
}

/// Whether `[a_start, a_end)` overlaps `[b_start, b_end)`, given as `HH:MM`.
///
/// Compares raw minutes since midnight, so a range that wraps past midnight is
/// not handled here; use [`Interval::overlaps`] for rollover-aware ranges.
pub fn overlaps(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> Result<bool> {
    let (a_start, a_end) = (to_minutes(a_start)?, to_minutes(a_end)?);
    let (b_start, b_end) = (to_minutes(b_start)?, to_minutes(b_end)?);
    Ok(a_start < b_end && b_start < a_end)
}

/// Every interval of `existing` that overlaps `candidate`, in input order.
pub fn find_conflicts(candidate: &Interval, existing: &[Interval]) -> Vec<Interval> {
    let conflicts: Vec<Interval> = existing
        .iter()
        .filter(|interval| candidate.overlaps(interval))
        .cloned()
        .collect();

    tracing::debug!(
        candidate = %candidate.display_id(),
        checked = existing.len(),
        conflicts = conflicts.len(),
        "conflict scan finished"
    );

    conflicts
}

/// Find all pairs of overlapping intervals within one collection.
///
/// Pairs are reported once, `first` preceding `second` in input order. The
/// overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_overlapping_pairs(intervals: &[Interval]) -> Vec<Overlap> {
    let mut overlaps = Vec::new();

    for (i, first) in intervals.iter().enumerate() {
        for second in &intervals[i + 1..] {
            if first.overlaps(second) {
                overlaps.push(Overlap {
                    first: first.clone(),
                    second: second.clone(),
                    overlap_minutes: first.overlap_minutes(second),
                });
            }
        }
    }

    overlaps
}
