//! Nearest-DMC lookup and palette selection.
//!
//! Pixels are deduplicated before the nearest-neighbor search so large grids
//! only pay for their distinct colors. Frequency tables keep first-encounter
//! order and are sorted stably, which makes equal-count ties deterministic.

use crate::color::{delta_e_squared, rgb_to_lab, LabColor};
use crate::dmc::{DmcCatalog, DmcColor};
use crate::error::{PatternError, Result};
use crate::model::{Palette, PatternGrid, PixelGrid};
use rayon::prelude::*;
use std::collections::HashMap;

/// Output of [`select_palette`]. `dmc_colors[i]` is the thread behind
/// `palette.colors()[i]`.
#[derive(Debug, Clone)]
pub struct PaletteSelection {
    pub palette: Palette,
    pub index_grid: PatternGrid,
    pub dmc_colors: Vec<DmcColor>,
}

/// Index of the closest candidate. The first minimum wins.
fn nearest_index(candidates: &[LabColor], target: &LabColor) -> usize {
    let mut best_idx = 0usize;
    let mut best_dist = f64::MAX;
    for (i, lab) in candidates.iter().enumerate() {
        let dist = delta_e_squared(target, lab);
        if dist < best_dist {
            best_dist = dist;
            best_idx = i;
        }
    }
    best_idx
}

fn nearest_catalog_index(catalog: &DmcCatalog, rgb: [u8; 3]) -> usize {
    nearest_index(catalog.labs(), &rgb_to_lab(rgb))
}

/// Closest DMC thread to `rgb` by CIE76 Delta-E.
pub fn find_nearest(catalog: &DmcCatalog, rgb: [u8; 3]) -> &DmcColor {
    &catalog.colors()[nearest_catalog_index(catalog, rgb)]
}

/// Quantize `pixels` to at most `max_colors` DMC threads.
///
/// Threads covering less than `min_frequency_pct` percent of the pixels are
/// dropped before capping (`0.0` disables the threshold). Pixels whose thread
/// was not kept are remapped to the closest kept thread. If the threshold
/// would remove every thread it is ignored, so the palette is never empty.
pub fn select_palette(
    pixels: &PixelGrid,
    max_colors: usize,
    min_frequency_pct: f64,
    catalog: &DmcCatalog,
) -> Result<PaletteSelection> {
    if pixels.is_empty() {
        return Err(PatternError::InvalidDimensions(
            "cannot select a palette for an empty image".to_string(),
        ));
    }
    if max_colors == 0 {
        return Err(PatternError::InvalidParameter(
            "max_colors must be at least 1".to_string(),
        ));
    }
    if !min_frequency_pct.is_finite() || min_frequency_pct < 0.0 {
        return Err(PatternError::InvalidParameter(format!(
            "min_frequency_pct must be >= 0, got {}",
            min_frequency_pct
        )));
    }

    // Distinct colors in raster order, and each pixel's slot among them.
    let mut unique_lookup: HashMap<[u8; 3], usize> = HashMap::new();
    let mut unique_colors: Vec<[u8; 3]> = Vec::new();
    let pixel_slots: Vec<usize> = pixels
        .pixels()
        .iter()
        .map(|rgb| {
            *unique_lookup.entry(*rgb).or_insert_with(|| {
                unique_colors.push(*rgb);
                unique_colors.len() - 1
            })
        })
        .collect();

    let unique_matches: Vec<usize> = unique_colors
        .par_iter()
        .map(|rgb| nearest_catalog_index(catalog, *rgb))
        .collect();

    // Frequency per matched thread, first-encounter order.
    let mut frequency: Vec<(usize, usize)> = Vec::new();
    let mut frequency_slot: HashMap<usize, usize> = HashMap::new();
    for &slot in &pixel_slots {
        let dmc_idx = unique_matches[slot];
        match frequency_slot.get(&dmc_idx) {
            Some(&pos) => frequency[pos].1 += 1,
            None => {
                frequency_slot.insert(dmc_idx, frequency.len());
                frequency.push((dmc_idx, 1));
            }
        }
    }

    let total_pixels = pixel_slots.len();
    let mut survivors: Vec<(usize, usize)> = if min_frequency_pct > 0.0 {
        let threshold = total_pixels as f64 * min_frequency_pct / 100.0;
        frequency
            .iter()
            .copied()
            .filter(|&(_, count)| count as f64 >= threshold)
            .collect()
    } else {
        frequency.clone()
    };
    if survivors.is_empty() {
        log::warn!(
            "Frequency threshold {:.2}% removed every color; keeping all {} matched threads",
            min_frequency_pct,
            frequency.len()
        );
        survivors = frequency.clone();
    }

    survivors.sort_by(|a, b| b.1.cmp(&a.1));
    survivors.truncate(max_colors);
    let selected: Vec<usize> = survivors.iter().map(|&(dmc_idx, _)| dmc_idx).collect();
    let selected_labs: Vec<LabColor> = selected.iter().map(|&i| catalog.labs()[i]).collect();

    // Matched thread -> final palette index. Dropped threads go to the kept
    // thread nearest to them in LAB.
    let palette_index: HashMap<usize, u16> = frequency
        .iter()
        .map(|&(dmc_idx, _)| {
            let target = match selected.iter().position(|&s| s == dmc_idx) {
                Some(pos) => pos,
                None => nearest_index(&selected_labs, &catalog.labs()[dmc_idx]),
            };
            (dmc_idx, target as u16)
        })
        .collect();

    let cells: Vec<u16> = pixel_slots
        .iter()
        .map(|&slot| palette_index[&unique_matches[slot]])
        .collect();

    let dmc_colors: Vec<DmcColor> = selected
        .iter()
        .map(|&i| catalog.colors()[i].clone())
        .collect();
    let palette = Palette::new(dmc_colors.iter().map(DmcColor::rgb).collect())?;
    let index_grid = PatternGrid::new(pixels.width(), pixels.height(), cells)?;

    log::debug!(
        "Palette selection: {} pixels, {} unique colors, {} matched threads, {} kept",
        total_pixels,
        unique_colors.len(),
        frequency.len(),
        dmc_colors.len()
    );

    Ok(PaletteSelection {
        palette,
        index_grid,
        dmc_colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_of(width: usize, height: usize, colors: &[[u8; 3]]) -> PixelGrid {
        PixelGrid::new(width, height, colors.to_vec()).expect("valid grid")
    }

    #[test]
    fn black_and_white_match_their_threads() {
        let catalog = DmcCatalog::global();
        assert_eq!(find_nearest(catalog, [0, 0, 0]).number, "310");
        assert_eq!(find_nearest(catalog, [255, 255, 255]).number, "B5200");
    }

    #[test]
    fn exact_catalog_colors_match_themselves() {
        let catalog = DmcCatalog::new();
        let red = catalog.get("321").expect("321 exists");
        assert_eq!(find_nearest(&catalog, red.rgb()).number, "321");
    }

    #[test]
    fn selection_invariants_hold() {
        let catalog = DmcCatalog::global();
        let pixels = PixelGrid::from_fn(12, 7, |x, y| {
            [(x * 20) as u8, (y * 35) as u8, ((x + y) * 9) as u8]
        });
        let selection = select_palette(&pixels, 5, 0.0, catalog).expect("palette selection");

        assert!(selection.palette.len() <= 5);
        assert_eq!(selection.palette.len(), selection.dmc_colors.len());
        for (rgb, dmc) in selection.palette.colors().iter().zip(&selection.dmc_colors) {
            assert_eq!(*rgb, dmc.rgb());
        }
        assert_eq!(selection.index_grid.width(), 12);
        assert_eq!(selection.index_grid.height(), 7);
        assert!(selection
            .index_grid
            .cells()
            .iter()
            .all(|&v| (v as usize) < selection.palette.len()));
    }

    #[test]
    fn frequency_threshold_merges_rare_color() {
        let catalog = DmcCatalog::global();
        let a = [200, 30, 30];
        let b = [30, 30, 200];
        let mut colors = vec![a; 9];
        colors.push(b);
        let pixels = grid_of(10, 1, &colors);

        let filtered = select_palette(&pixels, 10, 15.0, catalog).expect("filtered");
        assert_eq!(filtered.palette.len(), 1);
        assert!(filtered.index_grid.cells().iter().all(|&v| v == 0));

        let unfiltered = select_palette(&pixels, 10, 0.0, catalog).expect("unfiltered");
        assert_eq!(unfiltered.palette.len(), 2);
        assert_eq!(unfiltered.index_grid.cells()[9], 1);
    }

    #[test]
    fn threshold_removes_compression_artifacts() {
        let catalog = DmcCatalog::global();
        // 99 pixels of one blue, a single stray orange pixel at 1%.
        let mut colors = vec![[40, 70, 160]; 99];
        colors.push([250, 140, 20]);
        let pixels = grid_of(10, 10, &colors);

        let selection = select_palette(&pixels, 20, 1.5, catalog).expect("selection");
        assert_eq!(selection.palette.len(), 1);
    }

    #[test]
    fn max_colors_keeps_most_frequent_first() {
        let catalog = DmcCatalog::global();
        let mut colors = vec![[0, 0, 0]; 6];
        colors.extend(vec![[255, 255, 255]; 3]);
        colors.push([255, 0, 0]);
        let pixels = grid_of(5, 2, &colors);

        let selection = select_palette(&pixels, 2, 0.0, catalog).expect("selection");
        assert_eq!(selection.dmc_colors[0].number, "310");
        assert_eq!(selection.dmc_colors[1].number, "B5200");
        // The red pixel is remapped to one of the kept threads.
        assert!(selection.index_grid.cells()[9] < 2);
    }

    #[test]
    fn equal_counts_keep_first_encountered() {
        let catalog = DmcCatalog::global();
        let colors = vec![[255, 255, 255], [0, 0, 0], [0, 0, 0], [255, 255, 255]];
        let pixels = grid_of(2, 2, &colors);

        let selection = select_palette(&pixels, 1, 0.0, catalog).expect("selection");
        assert_eq!(selection.dmc_colors[0].number, "B5200");
    }

    #[test]
    fn rejects_bad_arguments() {
        let catalog = DmcCatalog::global();
        let pixels = grid_of(1, 1, &[[1, 2, 3]]);
        assert!(matches!(
            select_palette(&pixels, 0, 0.0, catalog),
            Err(PatternError::InvalidParameter(_))
        ));
        assert!(select_palette(&pixels, 3, -1.0, catalog).is_err());
        assert!(matches!(
            select_palette(&PixelGrid::empty(), 3, 0.0, catalog),
            Err(PatternError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn batch_matches_per_pixel_lookup() {
        let catalog = DmcCatalog::global();
        let pixels = PixelGrid::from_fn(120, 90, |x, y| {
            [(x * 2) as u8, (y * 3) as u8, ((x * 7 + y * 5) % 256) as u8]
        });
        // The cap covers the whole catalog, so no pixel is remapped.
        let selection =
            select_palette(&pixels, catalog.len(), 0.0, catalog).expect("palette selection");

        for (pixel, &idx) in pixels.pixels().iter().zip(selection.index_grid.cells()) {
            assert_eq!(
                selection.dmc_colors[idx as usize].number,
                find_nearest(catalog, *pixel).number,
                "pixel {:?}",
                pixel
            );
        }
    }

    #[test]
    fn large_grid_finishes_quickly() {
        let catalog = DmcCatalog::global();
        let pixels = PixelGrid::from_fn(100, 100, |x, y| {
            [
                (x * 255 / 99) as u8,
                (y * 255 / 99) as u8,
                ((x * y) % 256) as u8,
            ]
        });

        let started = std::time::Instant::now();
        let selection = select_palette(&pixels, 20, 0.0, catalog).expect("palette selection");
        let elapsed = started.elapsed();

        assert!(
            elapsed < std::time::Duration::from_secs(5),
            "100x100 selection took {:?}",
            elapsed
        );
        assert!(selection.palette.len() <= 20);
        assert_eq!(selection.index_grid.stitch_count(), 10_000);
    }
}
