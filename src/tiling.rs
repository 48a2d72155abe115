//! Page tiling for printed charts: how many cells fit on an A4 page, how big
//! a cell should be, and which slice of the grid lands on which page.
//!
//! All geometry is in PDF points (1/72 inch).

use crate::error::{PatternError, Result};
use serde::Serialize;

pub const PAGE_WIDTH_PT: f64 = 595.28;
pub const PAGE_HEIGHT_PT: f64 = 841.89;
/// 2 cm on every side.
pub const PAGE_MARGIN_PT: f64 = 56.69;
/// Room for row numbers left of the grid.
pub const LABEL_MARGIN_LEFT_PT: f64 = 28.0;
/// Room for column numbers above the grid.
pub const LABEL_MARGIN_TOP_PT: f64 = 14.0;
pub const FOOTER_HEIGHT_PT: f64 = 14.0;
pub const MM_TO_PT: f64 = 2.8346;

pub const MAX_CELL_SIZE_MM: f64 = 5.0;
pub const MIN_CELL_SIZE_MM: f64 = 3.0;
/// Page counts (at the largest cell) where cell shrinking starts and stops.
const SHRINK_START_PAGES: usize = 4;
const SHRINK_END_PAGES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageTile {
    pub page_index: usize,
    pub col_start: usize,
    pub col_end: usize,
    pub row_start: usize,
    pub row_end: usize,
    /// Center line offset from `col_start`, when the vertical center line
    /// crosses this tile.
    pub center_col: Option<f64>,
    pub center_row: Option<f64>,
}

impl PageTile {
    pub fn width(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn height(&self) -> usize {
        self.row_end - self.row_start
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TilingResult {
    pub tiles: Vec<PageTile>,
    pub cols_per_page: usize,
    pub rows_per_page: usize,
    pub num_tile_cols: usize,
    pub num_tile_rows: usize,
    pub total_pages: usize,
}

fn cell_pt(cell_mm: f64) -> Result<f64> {
    if !cell_mm.is_finite() || cell_mm <= 0.0 {
        return Err(PatternError::InvalidParameter(format!(
            "cell size must be > 0 mm, got {}",
            cell_mm
        )));
    }
    Ok(cell_mm * MM_TO_PT)
}

/// Grid columns that fit across one page.
pub fn cols_per_page(cell_mm: f64) -> Result<usize> {
    let usable = PAGE_WIDTH_PT - 2.0 * PAGE_MARGIN_PT - LABEL_MARGIN_LEFT_PT;
    Ok((usable / cell_pt(cell_mm)?).floor() as usize)
}

/// Grid rows that fit down one page.
pub fn rows_per_page(cell_mm: f64) -> Result<usize> {
    let usable = PAGE_HEIGHT_PT - 2.0 * PAGE_MARGIN_PT - LABEL_MARGIN_TOP_PT - FOOTER_HEIGHT_PT;
    Ok((usable / cell_pt(cell_mm)?).floor() as usize)
}

fn validate_grid(grid_width: usize, grid_height: usize) -> Result<()> {
    if grid_width == 0 || grid_height == 0 {
        return Err(PatternError::InvalidDimensions(format!(
            "grid must be at least 1x1, got {}x{}",
            grid_width, grid_height
        )));
    }
    Ok(())
}

/// Cell size in mm: 5.0 for charts up to 4 pages, 3.0 from 20 pages on, and
/// linear in between, rounded to 2 decimals.
pub fn compute_cell_size_mm(grid_width: usize, grid_height: usize) -> Result<f64> {
    validate_grid(grid_width, grid_height)?;
    let cols = cols_per_page(MAX_CELL_SIZE_MM)?;
    let rows = rows_per_page(MAX_CELL_SIZE_MM)?;
    let pages = grid_width.div_ceil(cols) * grid_height.div_ceil(rows);

    if pages <= SHRINK_START_PAGES {
        return Ok(MAX_CELL_SIZE_MM);
    }
    if pages >= SHRINK_END_PAGES {
        return Ok(MIN_CELL_SIZE_MM);
    }

    let t = (pages - SHRINK_START_PAGES) as f64 / (SHRINK_END_PAGES - SHRINK_START_PAGES) as f64;
    let cell = MAX_CELL_SIZE_MM - t * (MAX_CELL_SIZE_MM - MIN_CELL_SIZE_MM);
    Ok((cell * 100.0).round() / 100.0)
}

/// Split the grid into page tiles, row-major, clamped to the grid edge.
pub fn compute_tiles(
    grid_width: usize,
    grid_height: usize,
    cols_per_page: usize,
    rows_per_page: usize,
) -> Result<TilingResult> {
    validate_grid(grid_width, grid_height)?;
    if cols_per_page == 0 || rows_per_page == 0 {
        return Err(PatternError::InvalidDimensions(format!(
            "page capacity must be at least 1x1, got {}x{}",
            cols_per_page, rows_per_page
        )));
    }

    let num_tile_cols = grid_width.div_ceil(cols_per_page);
    let num_tile_rows = grid_height.div_ceil(rows_per_page);
    let center_col = grid_width as f64 / 2.0;
    let center_row = grid_height as f64 / 2.0;

    let mut tiles = Vec::with_capacity(num_tile_cols * num_tile_rows);
    for tile_row in 0..num_tile_rows {
        let row_start = tile_row * rows_per_page;
        let row_end = (row_start + rows_per_page).min(grid_height);
        for tile_col in 0..num_tile_cols {
            let col_start = tile_col * cols_per_page;
            let col_end = (col_start + cols_per_page).min(grid_width);
            tiles.push(PageTile {
                page_index: tiles.len(),
                col_start,
                col_end,
                row_start,
                row_end,
                center_col: local_center(center_col, col_start, col_end),
                center_row: local_center(center_row, row_start, row_end),
            });
        }
    }

    Ok(TilingResult {
        total_pages: tiles.len(),
        tiles,
        cols_per_page,
        rows_per_page,
        num_tile_cols,
        num_tile_rows,
    })
}

fn local_center(center: f64, start: usize, end: usize) -> Option<f64> {
    if (start as f64) < center && center <= end as f64 {
        Some(center - start as f64)
    } else {
        None
    }
}

/// Pick the cell size for the grid and tile it at that size.
pub fn layout_pages(grid_width: usize, grid_height: usize) -> Result<(f64, TilingResult)> {
    let cell_mm = compute_cell_size_mm(grid_width, grid_height)?;
    let tiling = compute_tiles(
        grid_width,
        grid_height,
        cols_per_page(cell_mm)?,
        rows_per_page(cell_mm)?,
    )?;
    Ok((cell_mm, tiling))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(value: Option<f64>, expected: f64) -> bool {
        value.map(|v| (v - expected).abs() < 1e-9).unwrap_or(false)
    }

    #[test]
    fn page_capacity_at_five_mm() {
        assert_eq!(cols_per_page(5.0).expect("cols"), 32);
        assert_eq!(rows_per_page(5.0).expect("rows"), 49);
        assert!(cols_per_page(3.0).expect("cols") > 32);
        assert!(cols_per_page(0.0).is_err());
    }

    #[test]
    fn two_tile_example() {
        let result = compute_tiles(60, 45, 32, 49).expect("tiling");
        assert_eq!(result.tiles.len(), 2);
        assert_eq!(result.total_pages, 2);

        let first = &result.tiles[0];
        assert_eq!((first.col_start, first.col_end), (0, 32));
        assert_eq!((first.row_start, first.row_end), (0, 45));
        assert!(approx(first.center_col, 30.0));
        assert!(approx(first.center_row, 22.5));

        let second = &result.tiles[1];
        assert_eq!((second.col_start, second.col_end), (32, 60));
        assert_eq!(second.center_col, None);
        assert!(approx(second.center_row, 22.5));
    }

    #[test]
    fn exact_fit_and_one_over() {
        assert_eq!(compute_tiles(32, 49, 32, 49).expect("tiling").tiles.len(), 1);
        assert_eq!(compute_tiles(33, 49, 32, 49).expect("tiling").tiles.len(), 2);
        assert_eq!(compute_tiles(32, 50, 32, 49).expect("tiling").tiles.len(), 2);
    }

    #[test]
    fn large_grid_is_row_major_and_clamped() {
        let result = compute_tiles(100, 100, 32, 49).expect("tiling");
        assert_eq!(result.num_tile_cols, 4);
        assert_eq!(result.num_tile_rows, 3);
        assert_eq!(result.tiles.len(), 12);

        for (i, tile) in result.tiles.iter().enumerate() {
            assert_eq!(tile.page_index, i);
        }
        assert_eq!(result.tiles[1].col_start, 32);
        assert_eq!(result.tiles[4].row_start, 49);

        let last = result.tiles.last().expect("last tile");
        assert_eq!((last.col_start, last.col_end), (96, 100));
        assert_eq!((last.row_start, last.row_end), (98, 100));

        // Center 50 falls in the second column band and second row band.
        assert!(approx(result.tiles[1].center_col, 18.0));
        let with_center_col = result.tiles[..4]
            .iter()
            .filter(|t| t.center_col.is_some())
            .count();
        assert_eq!(with_center_col, 1);
        assert!(approx(result.tiles[4].center_row, 1.0));
        assert_eq!(result.tiles[0].center_row, None);
    }

    #[test]
    fn center_on_tile_boundary_belongs_to_left_tile() {
        let result = compute_tiles(64, 10, 32, 49).expect("tiling");
        assert!(approx(result.tiles[0].center_col, 32.0));
        assert_eq!(result.tiles[1].center_col, None);
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(compute_tiles(0, 10, 32, 49).is_err());
        assert!(compute_tiles(10, 10, 0, 49).is_err());
        assert!(compute_cell_size_mm(10, 0).is_err());
    }

    #[test]
    fn cell_size_shrinks_with_page_count() {
        assert_eq!(compute_cell_size_mm(64, 98).expect("cell"), 5.0);
        // 4 x 3 = 12 pages at 5 mm.
        assert_eq!(compute_cell_size_mm(100, 100).expect("cell"), 4.0);
        assert_eq!(compute_cell_size_mm(300, 300).expect("cell"), 3.0);
    }

    #[test]
    fn layout_uses_chosen_cell_size() {
        let (cell, tiling) = layout_pages(100, 100).expect("layout");
        assert_eq!(cell, 4.0);
        assert_eq!(tiling.cols_per_page, cols_per_page(4.0).expect("cols"));
        assert!(tiling.total_pages >= 1);
    }
}
