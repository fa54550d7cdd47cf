//! Interval trimming
//!
//! Reduces each location to a geometrically valid, non-nested set of intervals:
//! 1. Drop intervals with a missing side, a non-positive depth, or no thickness
//! 2. Drop intervals strictly nested in any other surviving interval
//! 3. Drop locations left empty
//!
//! Both filters decide against a fixed snapshot of their input before removing
//! anything, so the outcome does not depend on visiting order.

use crate::domain::model::{HorizonInterval, LocationTable, TrimStats};
use rayon::prelude::*;

/// Trims one location's intervals in place.
///
/// `locations_dropped` in the returned stats is always zero here; only
/// [`trim_table`] removes locations.
pub fn trim_intervals(intervals: &mut Vec<HorizonInterval>) -> TrimStats {
    debug_assert!(
        has_unique_identities(intervals),
        "more than one interval per (location, pair_index)"
    );

    let before = intervals.len();
    intervals.retain(HorizonInterval::is_well_formed);
    let invalid_removed = before - intervals.len();

    let nested: Vec<bool> = intervals
        .iter()
        .map(|candidate| {
            intervals
                .iter()
                .any(|container| candidate.is_nested_in(container))
        })
        .collect();
    let nested_removed = nested.iter().filter(|&&flag| flag).count();

    // retain visits elements in order, matching the flags computed above
    let mut flags = nested.into_iter();
    intervals.retain(|_| !flags.next().unwrap_or(false));

    TrimStats {
        invalid_removed,
        nested_removed,
        locations_dropped: 0,
    }
}

/// Trims every location and removes those left without intervals.
pub fn trim_table(table: &mut LocationTable, parallel: bool) -> TrimStats {
    let stats = if parallel {
        table
            .entries_mut()
            .par_iter_mut()
            .map(|(_, intervals)| trim_intervals(intervals))
            .reduce(TrimStats::default, TrimStats::merge)
    } else {
        table
            .entries_mut()
            .values_mut()
            .map(trim_intervals)
            .fold(TrimStats::default(), TrimStats::merge)
    };

    let locations_dropped = table.remove_empty_locations();
    if locations_dropped > 0 {
        tracing::debug!("{} locations have no valid intervals left", locations_dropped);
    }

    TrimStats {
        locations_dropped,
        ..stats
    }
}

fn has_unique_identities(intervals: &[HorizonInterval]) -> bool {
    intervals
        .iter()
        .enumerate()
        .all(|(i, a)| intervals[i + 1..].iter().all(|b| a != b))
}
