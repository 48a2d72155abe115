//! Heuristic photo / drawing / pixel-art classifier.
//!
//! Runs on a small thumbnail. The result picks the resampling filter for the
//! full-size resize and whether noise filtering is applied.

use crate::model::PixelGrid;
use crate::resize::ResamplingFilter;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Side length of the thumbnail the classifier is meant to run on.
pub const DETECTION_THUMBNAIL_SIZE: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectedMode {
    Photo,
    Drawing,
    PixelArt,
}

impl DetectedMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectedMode::Photo => "photo",
            DetectedMode::Drawing => "drawing",
            DetectedMode::PixelArt => "pixel_art",
        }
    }

    pub fn resampling_filter(self) -> ResamplingFilter {
        match self {
            DetectedMode::PixelArt => ResamplingFilter::Nearest,
            DetectedMode::Drawing => ResamplingFilter::Bilinear,
            DetectedMode::Photo => ResamplingFilter::Lanczos,
        }
    }

    /// Pixel art keeps every color and every isolated stitch.
    pub fn preserves_detail(self) -> bool {
        self == DetectedMode::PixelArt
    }
}

impl fmt::Display for DetectedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageModeDetection {
    pub mode: DetectedMode,
    pub unique_color_count: usize,
    pub edge_density: f64,
    pub avg_neighbor_diff: f64,
    pub flat_ratio: f64,
}

impl ImageModeDetection {
    fn degenerate() -> Self {
        Self {
            mode: DetectedMode::Photo,
            unique_color_count: 0,
            edge_density: 0.0,
            avg_neighbor_diff: 0.0,
            flat_ratio: 0.0,
        }
    }
}

pub trait ImageModeDetector: Send + Sync {
    fn detect(&self, pixels: &PixelGrid) -> ImageModeDetection;
}

/// Thresholds for [`HeuristicModeDetector`]. Diffs are summed absolute
/// channel differences (0-765).
#[derive(Debug, Clone, Copy)]
pub struct HeuristicModeDetector {
    pub edge_threshold: u32,
    pub flat_threshold: u32,
    pub pixel_art_max_colors: usize,
    pub drawing_min_edge_density: f64,
    pub drawing_max_colors: usize,
}

impl Default for HeuristicModeDetector {
    fn default() -> Self {
        Self {
            edge_threshold: 60,
            flat_threshold: 15,
            pixel_art_max_colors: 64,
            drawing_min_edge_density: 0.3,
            drawing_max_colors: 1000,
        }
    }
}

fn channel_diff(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (*x as i32 - *y as i32).unsigned_abs())
        .sum()
}

impl ImageModeDetector for HeuristicModeDetector {
    fn detect(&self, pixels: &PixelGrid) -> ImageModeDetection {
        if pixels.is_empty() {
            return ImageModeDetection::degenerate();
        }

        let width = pixels.width();
        let height = pixels.height();
        let data = pixels.pixels();

        let unique_color_count = data.iter().collect::<HashSet<_>>().len();

        let mut diff_sum = 0u64;
        let mut pair_count = 0u64;
        let mut flat_pairs = 0u64;
        let mut edge_pixels = 0u64;

        for y in 0..height {
            for x in 0..width {
                let here = data[y * width + x];
                let mut max_diff = 0u32;
                let right = (x + 1 < width).then(|| data[y * width + x + 1]);
                let below = (y + 1 < height).then(|| data[(y + 1) * width + x]);

                for neighbor in [right, below].into_iter().flatten() {
                    let diff = channel_diff(here, neighbor);
                    diff_sum += diff as u64;
                    pair_count += 1;
                    if diff < self.flat_threshold {
                        flat_pairs += 1;
                    }
                    max_diff = max_diff.max(diff);
                }

                if max_diff > self.edge_threshold {
                    edge_pixels += 1;
                }
            }
        }

        let (avg_neighbor_diff, flat_ratio) = if pair_count > 0 {
            (
                diff_sum as f64 / pair_count as f64,
                flat_pairs as f64 / pair_count as f64,
            )
        } else {
            (0.0, 0.0)
        };
        let edge_density = edge_pixels as f64 / data.len() as f64;

        let mode = if unique_color_count <= self.pixel_art_max_colors {
            DetectedMode::PixelArt
        } else if edge_density > self.drawing_min_edge_density
            && unique_color_count < self.drawing_max_colors
        {
            DetectedMode::Drawing
        } else {
            DetectedMode::Photo
        };

        ImageModeDetection {
            mode,
            unique_color_count,
            edge_density,
            avg_neighbor_diff,
            flat_ratio,
        }
    }
}

/// Classify with the default thresholds.
pub fn detect_image_mode(pixels: &PixelGrid) -> ImageModeDetection {
    HeuristicModeDetector::default().detect(pixels)
}
