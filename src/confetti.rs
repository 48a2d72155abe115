//! Isolated-stitch ("confetti") reduction: a neighborhood mode filter over
//! the index grid.

use crate::model::PatternGrid;
use rayon::prelude::*;

pub const DEFAULT_CONFETTI_PASSES: usize = 2;

/// Neighbors that must agree before a cell is replaced.
const MIN_AGREEING_NEIGHBORS: usize = 5;

/// Cells with fewer available neighbors are never replaced.
const MIN_NEIGHBORS: usize = 3;

/// Offsets in raster order, self excluded. Mode ties go to the earliest.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Run `num_passes` passes of the mode filter and return a new grid. Each pass
/// reads only the previous pass's output, never its own replacements.
pub fn reduce_confetti(grid: &PatternGrid, num_passes: usize) -> PatternGrid {
    let width = grid.width();
    let height = grid.height();
    let mut current = grid.clone();

    for pass in 0..num_passes {
        let source = current.cells();
        let next: Vec<u16> = (0..source.len())
            .into_par_iter()
            .map(|idx| smoothed_cell(source, width, height, idx % width, idx / width))
            .collect();

        let changed = next
            .iter()
            .zip(source.iter())
            .filter(|(a, b)| a != b)
            .count();
        log::debug!("Confetti pass {}: {} cells replaced", pass + 1, changed);

        current = current.with_cells(next);
        if changed == 0 {
            break;
        }
    }

    current
}

fn smoothed_cell(cells: &[u16], width: usize, height: usize, x: usize, y: usize) -> u16 {
    let value = cells[y * width + x];

    // (value, count) in first-seen order; at most 8 distinct neighbors.
    let mut tally: [(u16, usize); 8] = [(0, 0); 8];
    let mut distinct = 0usize;
    let mut available = 0usize;

    for (dy, dx) in NEIGHBOR_OFFSETS {
        let ny = y as isize + dy;
        let nx = x as isize + dx;
        if ny < 0 || nx < 0 || ny >= height as isize || nx >= width as isize {
            continue;
        }
        available += 1;
        let neighbor = cells[ny as usize * width + nx as usize];
        match tally[..distinct].iter_mut().find(|(v, _)| *v == neighbor) {
            Some(entry) => entry.1 += 1,
            None => {
                tally[distinct] = (neighbor, 1);
                distinct += 1;
            }
        }
    }

    if available < MIN_NEIGHBORS {
        return value;
    }

    let mut mode = tally[0];
    for entry in &tally[1..distinct] {
        if entry.1 > mode.1 {
            mode = *entry;
        }
    }

    if mode.0 != value && mode.1 >= MIN_AGREEING_NEIGHBORS {
        mode.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[Vec<u16>]) -> PatternGrid {
        PatternGrid::from_rows(rows).expect("valid grid")
    }

    #[test]
    fn uniform_grid_is_unchanged() {
        let input = grid(&vec![vec![3; 6]; 5]);
        assert_eq!(reduce_confetti(&input, 2), input);
    }

    #[test]
    fn two_solid_regions_are_unchanged() {
        let rows: Vec<Vec<u16>> = (0..6)
            .map(|_| (0..8).map(|x| if x < 4 { 0 } else { 1 }).collect())
            .collect();
        let input = grid(&rows);
        assert_eq!(reduce_confetti(&input, 2), input);
    }

    #[test]
    fn surrounded_pixel_is_replaced() {
        let input = grid(&[vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]);
        let output = reduce_confetti(&input, 1);
        assert_eq!(output.get(1, 1), Some(0));
        // The caller's grid is untouched.
        assert_eq!(input.get(1, 1), Some(1));
    }

    #[test]
    fn corner_pixel_with_three_neighbors_is_kept() {
        let input = grid(&[vec![1, 0, 0], vec![0, 0, 0], vec![0, 0, 0]]);
        let output = reduce_confetti(&input, 2);
        assert_eq!(output.get(0, 0), Some(1));
    }

    #[test]
    fn adjacent_pair_flips_in_one_pass() {
        // Each odd cell sees the other, leaving 7 majority neighbors.
        let input = grid(&[
            vec![0, 0, 0, 0],
            vec![0, 1, 1, 0],
            vec![0, 0, 0, 0],
        ]);
        let output = reduce_confetti(&input, 1);
        assert!(output.cells().iter().all(|&v| v == 0));
    }

    #[test]
    fn zero_passes_returns_copy() {
        let input = grid(&[vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]);
        assert_eq!(reduce_confetti(&input, 0), input);
    }

    #[test]
    fn every_pass_keeps_the_grid_shape() {
        let rows: Vec<Vec<u16>> = (0..4)
            .map(|y| (0..7).map(|x| ((x * 3 + y) % 4) as u16).collect())
            .collect();
        let input = grid(&rows);
        let output = reduce_confetti(&input, 5);

        assert_eq!((output.width(), output.height()), (7, 4));
        assert_eq!(output.stitch_count(), input.stitch_count());
        assert_eq!(output.get(7, 0), None);
    }
}
