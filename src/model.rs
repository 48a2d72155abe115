//! Value types shared by every pipeline stage. Grids are stored flat,
//! row-major, with `index = y * width + x`.

use crate::error::{PatternError, Result};
use serde::Serialize;

/// Decoded RGB pixels. Unlike [`PatternGrid`] this may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<[u8; 3]>,
}

impl PixelGrid {
    pub fn new(width: usize, height: usize, pixels: Vec<[u8; 3]>) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(PatternError::InvalidDimensions(format!(
                "pixel buffer has {} entries, expected {}x{}",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    /// Fill a grid from a per-coordinate function.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }
}

/// Palette indices, one per stitch. Dimensions are always > 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternGrid {
    width: usize,
    height: usize,
    cells: Vec<u16>,
}

impl PatternGrid {
    pub fn new(width: usize, height: usize, cells: Vec<u16>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PatternError::InvalidDimensions(format!(
                "pattern grid must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        if cells.len() != width * height {
            return Err(PatternError::InvalidDimensions(format!(
                "pattern grid has {} cells, expected {}x{}",
                cells.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn from_rows(rows: &[Vec<u16>]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != width) {
            return Err(PatternError::InvalidDimensions(
                "pattern rows have different lengths".to_string(),
            ));
        }
        Self::new(width, height, rows.iter().flatten().copied().collect())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[u16] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Same dimensions, new cells. `cells` must come from a pass over this
    /// grid, so the length already matches.
    pub(crate) fn with_cells(&self, cells: Vec<u16>) -> Self {
        debug_assert_eq!(cells.len(), self.cells.len());
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u16]> {
        self.cells.chunks(self.width)
    }

    pub fn to_rows(&self) -> Vec<Vec<u16>> {
        self.rows().map(<[u16]>::to_vec).collect()
    }

    pub fn stitch_count(&self) -> usize {
        self.cells.len()
    }
}

/// Ordered thread colors; position is the palette index stored in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
}

impl Palette {
    pub fn new(colors: Vec<[u8; 3]>) -> Result<Self> {
        if colors.is_empty() {
            return Err(PatternError::InvalidParameter(
                "palette must contain at least one color".to_string(),
            ));
        }
        if colors.len() > u16::MAX as usize {
            return Err(PatternError::InvalidParameter(format!(
                "palette has {} colors, at most {} are addressable",
                colors.len(),
                u16::MAX
            )));
        }
        Ok(Self { colors })
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<[u8; 3]> {
        self.colors.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pattern {
    grid: PatternGrid,
    palette: Palette,
}

impl Pattern {
    /// Fails if any cell indexes outside the palette.
    pub fn new(grid: PatternGrid, palette: Palette) -> Result<Self> {
        if let Some(bad) = grid
            .cells()
            .iter()
            .find(|&&idx| idx as usize >= palette.len())
        {
            return Err(PatternError::InvalidParameter(format!(
                "grid references palette index {} but palette has {} colors",
                bad,
                palette.len()
            )));
        }
        Ok(Self { grid, palette })
    }

    pub fn grid(&self) -> &PatternGrid {
        &self.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn width(&self) -> usize {
        self.grid.width
    }

    pub fn height(&self) -> usize {
        self.grid.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_grid_checks_buffer_length() {
        assert!(PixelGrid::new(2, 2, vec![[0, 0, 0]; 3]).is_err());
        let grid = PixelGrid::new(2, 1, vec![[1, 2, 3], [4, 5, 6]]).expect("valid grid");
        assert_eq!(grid.get(1, 0), Some([4, 5, 6]));
        assert_eq!(grid.get(2, 0), None);
        assert!(PixelGrid::empty().is_empty());
    }

    #[test]
    fn pattern_grid_rejects_empty_and_ragged() {
        assert!(PatternGrid::new(0, 3, Vec::new()).is_err());
        assert!(PatternGrid::from_rows(&[vec![0, 1], vec![0]]).is_err());

        let grid = PatternGrid::from_rows(&[vec![0, 1, 2], vec![2, 1, 0]]).expect("valid grid");
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(2, 0), Some(2));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.to_rows(), vec![vec![0, 1, 2], vec![2, 1, 0]]);
    }

    #[test]
    fn pattern_rejects_out_of_range_indices() {
        let grid = PatternGrid::from_rows(&[vec![0, 2]]).expect("valid grid");
        let palette = Palette::new(vec![[0, 0, 0], [255, 255, 255]]).expect("valid palette");
        assert!(Pattern::new(grid, palette).is_err());
        assert!(Palette::new(Vec::new()).is_err());
    }
}
