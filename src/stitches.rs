use crate::model::PatternGrid;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorStitchCount {
    pub palette_index: usize,
    pub count: u64,
}

/// Stitches per palette index present in the grid, ascending by index.
pub fn count_stitches_per_color(grid: &PatternGrid) -> Vec<ColorStitchCount> {
    let mut counts: BTreeMap<usize, u64> = BTreeMap::new();
    for &idx in grid.cells() {
        *counts.entry(idx as usize).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(palette_index, count)| ColorStitchCount {
            palette_index,
            count,
        })
        .collect()
}
