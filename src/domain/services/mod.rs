//! Per-location geometry: trimming and the thickness sweep.

pub mod accumulator;
pub mod trimmer;

pub use accumulator::{accumulate_table, net_thickness, sort_by_top};
pub use trimmer::{trim_intervals, trim_table};

use crate::domain::model::{LocationTable, TransformResult};

/// Trim, sort and sweep a whole table.
pub fn compute_thickness(mut table: LocationTable, parallel: bool) -> TransformResult {
    let trim_stats = trim_table(&mut table, parallel);
    let records = accumulate_table(table, parallel);
    TransformResult {
        records,
        trim_stats,
    }
}
