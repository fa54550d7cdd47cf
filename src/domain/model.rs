use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Grid cell key. Field order gives the lexicographic `(iline, xline)` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    pub iline: i32,
    pub xline: i32,
}

impl Location {
    pub fn new(iline: i32, xline: i32) -> Self {
        Self { iline, xline }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.iline, self.xline)
    }
}

/// Which surface of a top/bottom pair a horizon file carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickSide {
    Top,
    Bottom,
}

impl PickSide {
    /// Horizon files alternate top, bottom, top, bottom... starting at position 1.
    pub fn from_file_position(position: usize) -> Self {
        if position % 2 == 1 {
            PickSide::Top
        } else {
            PickSide::Bottom
        }
    }
}

/// Pair index for the file at 1-based `position`: files 1 and 2 form pair 1,
/// files 3 and 4 pair 2, and so on.
pub fn pair_index_for_position(position: usize) -> u16 {
    position.div_ceil(2) as u16
}

/// One top/bottom pick pair at a location.
///
/// Equality is identity: two intervals are the same when they come from the
/// same file pair at the same location, whatever their depths.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HorizonInterval {
    pub location: Location,
    pub top_depth: Option<f64>,
    pub bottom_depth: Option<f64>,
    pub pair_index: u16,
}

impl HorizonInterval {
    pub fn new(location: Location, top_depth: f64, bottom_depth: f64, pair_index: u16) -> Self {
        Self {
            location,
            top_depth: Some(top_depth),
            bottom_depth: Some(bottom_depth),
            pair_index,
        }
    }

    /// An interval holding a single observed pick.
    pub fn from_pick(location: Location, pair_index: u16, side: PickSide, depth: f64) -> Self {
        let (top_depth, bottom_depth) = match side {
            PickSide::Top => (Some(depth), None),
            PickSide::Bottom => (None, Some(depth)),
        };
        Self {
            location,
            top_depth,
            bottom_depth,
            pair_index,
        }
    }

    /// Merges a repeated pick for this pair: once the top is known every later
    /// value lands on the bottom, otherwise it fills the top.
    pub fn record_pick(&mut self, depth: f64) {
        if self.top_depth.is_some() {
            self.bottom_depth = Some(depth);
        } else {
            self.top_depth = Some(depth);
        }
    }

    pub fn identity(&self) -> (Location, u16) {
        (self.location, self.pair_index)
    }

    /// `(top, bottom)` when both sides have been observed.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        Some((self.top_depth?, self.bottom_depth?))
    }

    /// Both sides present and positive, with strictly positive thickness.
    pub fn is_well_formed(&self) -> bool {
        match self.bounds() {
            Some((top, bottom)) => top > 0.0 && bottom > 0.0 && bottom - top > 0.0,
            None => false,
        }
    }

    pub fn thickness(&self) -> Option<f64> {
        self.bounds().map(|(top, bottom)| bottom - top)
    }

    /// True when `self` lies strictly inside `other`. Intervals of the same
    /// pair never contain each other.
    pub fn is_nested_in(&self, other: &HorizonInterval) -> bool {
        if self.pair_index == other.pair_index {
            return false;
        }
        match (self.bounds(), other.bounds()) {
            (Some((top, bottom)), Some((outer_top, outer_bottom))) => {
                top > outer_top && bottom < outer_bottom
            }
            _ => false,
        }
    }
}

impl PartialEq for HorizonInterval {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for HorizonInterval {}

/// Location → intervals, owned by one pipeline run.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    entries: BTreeMap<Location, Vec<HorizonInterval>>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one pick from the file at `pair_index`/`side`, merging with an
    /// existing interval of the same pair at that location.
    pub fn record_pick(&mut self, location: Location, pair_index: u16, side: PickSide, depth: f64) {
        let intervals = self.entries.entry(location).or_default();
        match intervals.iter_mut().find(|i| i.pair_index == pair_index) {
            Some(existing) => existing.record_pick(depth),
            None => intervals.push(HorizonInterval::from_pick(location, pair_index, side, depth)),
        }
    }

    /// Inserts a complete interval, replacing any interval with the same identity.
    pub fn insert(&mut self, interval: HorizonInterval) {
        let intervals = self.entries.entry(interval.location).or_default();
        match intervals.iter_mut().find(|i| **i == interval) {
            Some(existing) => *existing = interval,
            None => intervals.push(interval),
        }
    }

    pub fn get(&self, location: &Location) -> Option<&[HorizonInterval]> {
        self.entries.get(location).map(Vec::as_slice)
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.entries.contains_key(location)
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn interval_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Location, &Vec<HorizonInterval>)> {
        self.entries.iter()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut BTreeMap<Location, Vec<HorizonInterval>> {
        &mut self.entries
    }

    pub(crate) fn into_entries(self) -> BTreeMap<Location, Vec<HorizonInterval>> {
        self.entries
    }

    /// Drops every location left without intervals; returns how many were removed.
    pub fn remove_empty_locations(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, intervals| !intervals.is_empty());
        before - self.entries.len()
    }
}

impl FromIterator<HorizonInterval> for LocationTable {
    fn from_iter<T: IntoIterator<Item = HorizonInterval>>(iter: T) -> Self {
        let mut table = LocationTable::new();
        for interval in iter {
            table.insert(interval);
        }
        table
    }
}

/// Net thickness at one location, the unit of output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThicknessRecord {
    pub location: Location,
    pub thickness: f64,
}

/// What the trimmer removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrimStats {
    pub invalid_removed: usize,
    pub nested_removed: usize,
    pub locations_dropped: usize,
}

impl TrimStats {
    pub fn merge(self, other: TrimStats) -> TrimStats {
        TrimStats {
            invalid_removed: self.invalid_removed + other.invalid_removed,
            nested_removed: self.nested_removed + other.nested_removed,
            locations_dropped: self.locations_dropped + other.locations_dropped,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<ThicknessRecord>,
    pub trim_stats: TrimStats,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width LMK columns
    #[default]
    Lmk,
    Csv,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Lmk => "lmk",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}
