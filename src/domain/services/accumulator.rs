//! Thickness sweep
//!
//! Sorts a location's trimmed intervals by top depth and walks them once,
//! subtracting each interval's thickness from a running total and adding back
//! the span it shares with the *next* interval only. This is not a general
//! interval union: when an interval overlaps something other than its immediate
//! successor (equal tops with the longer interval sorted first, for instance)
//! the shared span is counted more than once or subtracted too far. That
//! behavior is kept for compatibility with existing thickness maps.

use crate::domain::model::{HorizonInterval, LocationTable, ThicknessRecord};
use rayon::prelude::*;

/// Ascending top depth; equal tops fall back to ascending pair index.
///
/// Intervals missing a top sort last. The trimmer guarantees there are none
/// by the time the sweep runs.
pub fn sort_by_top(intervals: &mut [HorizonInterval]) {
    intervals.sort_by(|a, b| {
        let a_top = a.top_depth.unwrap_or(f64::INFINITY);
        let b_top = b.top_depth.unwrap_or(f64::INFINITY);
        a_top
            .total_cmp(&b_top)
            .then_with(|| a.pair_index.cmp(&b.pair_index))
    });
}

/// Net thickness of intervals already sorted with [`sort_by_top`].
pub fn net_thickness(sorted: &[HorizonInterval]) -> f64 {
    let bounds: Vec<(f64, f64)> = sorted.iter().filter_map(HorizonInterval::bounds).collect();

    let mut accumulated = 0.0;
    for (i, &(top, bottom)) in bounds.iter().enumerate() {
        accumulated += top - bottom;

        if let Some(&(next_top, _)) = bounds.get(i + 1) {
            if next_top < bottom {
                accumulated += bottom - next_top;
            }
        }
    }

    // a positive total only comes from pathological overlap; report nothing
    if accumulated >= 0.0 {
        0.0
    } else {
        -accumulated
    }
}

fn location_thickness(intervals: &mut [HorizonInterval]) -> f64 {
    sort_by_top(intervals);
    net_thickness(intervals)
}

/// Consumes a trimmed table, one record per location in ascending location order.
pub fn accumulate_table(table: LocationTable, parallel: bool) -> Vec<ThicknessRecord> {
    let entries = table.into_entries();

    if parallel {
        entries
            .into_par_iter()
            .map(|(location, mut intervals)| ThicknessRecord {
                location,
                thickness: location_thickness(&mut intervals),
            })
            .collect()
    } else {
        entries
            .into_iter()
            .map(|(location, mut intervals)| ThicknessRecord {
                location,
                thickness: location_thickness(&mut intervals),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Location;

    fn interval(top: f64, bottom: f64, pair: u16) -> HorizonInterval {
        HorizonInterval::new(Location::new(1, 1), top, bottom, pair)
    }

    fn thickness_of(mut intervals: Vec<HorizonInterval>) -> f64 {
        location_thickness(&mut intervals)
    }

    #[test]
    fn test_single_interval() {
        assert_eq!(thickness_of(vec![interval(100.0, 175.0, 1)]), 75.0);
    }

    #[test]
    fn test_disjoint_intervals_add_up() {
        let intervals = vec![interval(200.0, 230.0, 2), interval(100.0, 150.0, 1)];
        assert_eq!(thickness_of(intervals), 80.0);
    }

    #[test]
    fn test_adjacent_overlap_counted_once() {
        let intervals = vec![interval(150.0, 300.0, 2), interval(100.0, 200.0, 1)];
        assert_eq!(thickness_of(intervals), 200.0);
    }

    #[test]
    fn test_touching_intervals_are_not_overlap() {
        let intervals = vec![interval(100.0, 200.0, 1), interval(200.0, 260.0, 2)];
        assert_eq!(thickness_of(intervals), 160.0);
    }

    #[test]
    fn test_staggered_three_way_overlap() {
        // -200 + 150 - 200 + 150 - 200 = -300
        let intervals = vec![
            interval(200.0, 400.0, 3),
            interval(100.0, 300.0, 1),
            interval(150.0, 350.0, 2),
        ];
        assert_eq!(thickness_of(intervals), 300.0);
    }

    #[test]
    fn test_equal_tops_break_ties_by_pair_index() {
        let mut intervals = vec![
            interval(100.0, 300.0, 2),
            interval(100.0, 200.0, 1),
            interval(50.0, 60.0, 3),
        ];

        sort_by_top(&mut intervals);

        let pairs: Vec<u16> = intervals.iter().map(|i| i.pair_index).collect();
        assert_eq!(pairs, vec![3, 1, 2]);
    }

    #[test]
    fn test_tie_break_order_drives_result() {
        // pair 1 = [100,200] first: -100 + 100 - 200 = -200 → 200
        let shorter_first = vec![interval(100.0, 300.0, 2), interval(100.0, 200.0, 1)];
        assert_eq!(thickness_of(shorter_first), 200.0);

        // pair 1 = [100,300] first: -200 + 200 - 100 = -100 → 100
        let longer_first = vec![interval(100.0, 200.0, 2), interval(100.0, 300.0, 1)];
        assert_eq!(thickness_of(longer_first), 100.0);
    }

    #[test]
    fn test_identical_intervals_from_different_pairs() {
        let intervals = vec![interval(100.0, 200.0, 1), interval(100.0, 200.0, 2)];
        assert_eq!(thickness_of(intervals), 100.0);
    }

    #[test]
    fn test_empty_location_is_zero_not_negative_zero() {
        let thickness = thickness_of(vec![]);
        assert_eq!(thickness, 0.0);
        assert!(thickness.is_sign_positive());
    }

    #[test]
    fn test_accumulate_table_orders_by_location() {
        let table: LocationTable = vec![
            HorizonInterval::new(Location::new(2, 1), 100.0, 110.0, 1),
            HorizonInterval::new(Location::new(1, 5), 100.0, 120.0, 1),
            HorizonInterval::new(Location::new(1, 2), 100.0, 130.0, 1),
        ]
        .into_iter()
        .collect();

        let records = accumulate_table(table, false);

        let got: Vec<(Location, f64)> = records.iter().map(|r| (r.location, r.thickness)).collect();
        assert_eq!(
            got,
            vec![
                (Location::new(1, 2), 30.0),
                (Location::new(1, 5), 20.0),
                (Location::new(2, 1), 10.0),
            ]
        );
    }

    #[test]
    fn test_accumulate_table_parallel_matches_sequential() {
        let build = || -> LocationTable {
            (0..200)
                .flat_map(|i| {
                    let location = Location::new(i / 20, i % 20);
                    let base = 1000.0 + (i * 7 % 13) as f64 * 10.0;
                    vec![
                        HorizonInterval::new(location, base, base + 80.0, 1),
                        HorizonInterval::new(location, base + 40.0 + i as f64, base + 300.0, 2),
                    ]
                })
                .collect()
        };

        assert_eq!(accumulate_table(build(), false), accumulate_table(build(), true));
    }
}
