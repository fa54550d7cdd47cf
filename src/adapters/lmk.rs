//! LMK horizon text format
//!
//! Input: one pick per line, five whitespace-separated numbers
//! `iline xline x y depth`. Output: five 12-wide right-aligned columns
//! `iline xline 0.00 0.00 thickness`.

use crate::domain::model::{Location, ThicknessRecord};
use crate::utils::error::{Result, ThicknessError};
use std::fmt::Write as _;

pub const LMK_FIELD_COUNT: usize = 5;
pub const LMK_COLUMN_WIDTH: usize = 12;

/// A single depth pick read from a horizon file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LmkPick {
    pub location: Location,
    pub depth: f64,
}

/// Picks from one file, plus bookkeeping for logging.
#[derive(Debug, Clone, Default)]
pub struct LmkContent {
    pub picks: Vec<LmkPick>,
    /// Records read, including dropped ones.
    pub record_count: usize,
    /// Records dropped because their depth was not positive.
    pub dropped_non_positive: usize,
}

/// Leading numeric fields of a line; tokenizing stops at the first token that
/// is not a finite number (`nan` and `inf` included).
fn numeric_fields(line: &str) -> Vec<f64> {
    line.split_whitespace()
        .map_while(|token| token.parse::<f64>().ok().filter(|value| value.is_finite()))
        .collect()
}

/// Parses a whole horizon file. Any line without exactly five numeric fields,
/// blank lines included, fails the file.
pub fn parse_lmk(source_name: &str, content: &str) -> Result<LmkContent> {
    let mut parsed = LmkContent::default();

    for (index, line) in content.lines().enumerate() {
        let fields = numeric_fields(line);
        if fields.len() != LMK_FIELD_COUNT {
            return Err(ThicknessError::MalformedRecord {
                source_name: source_name.to_string(),
                line: index + 1,
                expected: LMK_FIELD_COUNT,
                found: fields.len(),
            });
        }
        parsed.record_count += 1;

        let depth = fields[4];
        if depth <= 0.0 {
            parsed.dropped_non_positive += 1;
            continue;
        }

        parsed.picks.push(LmkPick {
            // iline/xline are stored as floats in LMK files; truncate like the grid does
            location: Location::new(fields[0] as i32, fields[1] as i32),
            depth,
        });
    }

    Ok(parsed)
}

pub fn format_lmk_row(record: &ThicknessRecord) -> String {
    format!(
        "{:>w$.2}{:>w$.2}{:>w$}{:>w$}{:>w$.2}",
        record.location.iline as f64,
        record.location.xline as f64,
        "0.00",
        "0.00",
        record.thickness,
        w = LMK_COLUMN_WIDTH
    )
}

pub fn format_lmk(records: &[ThicknessRecord]) -> String {
    let mut out = String::with_capacity(records.len() * (LMK_COLUMN_WIDTH * LMK_FIELD_COUNT + 1));
    for record in records {
        // writing to a String cannot fail
        let _ = writeln!(out, "{}", format_lmk_row(record));
    }
    out
}
