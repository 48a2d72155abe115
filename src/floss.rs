//! Thread usage estimates for full cross stitches.

use crate::error::{PatternError, Result};
use crate::stitches::ColorStitchCount;
use serde::Serialize;

/// Thread consumed by one full cross on 1-count fabric, in cm. Divide by the
/// Aida count for the real fabric.
pub const THREAD_PER_STITCH_CM: f64 = 19.6;

pub const SKEIN_LENGTH_M: f64 = 8.0;

pub const SKEIN_STRANDS: u32 = 6;

pub const DEFAULT_NUM_STRANDS: u32 = 2;

/// Extra thread allowed for starts, ends and travel.
pub const DEFAULT_MARGIN_RATIO: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorFlossEstimate {
    pub palette_index: usize,
    pub stitch_count: u64,
    pub skeins: u32,
}

/// Whole-pattern estimate assuming stitches are split evenly across colors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlossEstimate {
    pub total_stitches: u64,
    pub num_colors: u32,
    pub skeins_per_color: u32,
    pub total_skeins: u32,
}

fn validate_floss_params(aida_count: u32, num_strands: u32, margin_ratio: f64) -> Result<()> {
    if aida_count == 0 {
        return Err(PatternError::InvalidParameter(
            "aida_count must be > 0".to_string(),
        ));
    }
    if !(1..=SKEIN_STRANDS).contains(&num_strands) {
        return Err(PatternError::InvalidParameter(format!(
            "num_strands must be between 1 and {}, got {}",
            SKEIN_STRANDS, num_strands
        )));
    }
    if !margin_ratio.is_finite() || margin_ratio < 0.0 {
        return Err(PatternError::InvalidParameter(format!(
            "margin_ratio must be >= 0, got {}",
            margin_ratio
        )));
    }
    Ok(())
}

/// Stitches one skein covers at this fabric count and strand count.
fn skein_capacity(aida_count: u32, num_strands: u32) -> f64 {
    let thread_per_stitch_cm = THREAD_PER_STITCH_CM / aida_count as f64;
    let usable_cm = SKEIN_LENGTH_M * 100.0 * SKEIN_STRANDS as f64 / num_strands as f64;
    usable_cm / thread_per_stitch_cm
}

fn skeins_for(stitches: f64, capacity: f64, margin_ratio: f64) -> u32 {
    if stitches <= 0.0 {
        return 0;
    }
    ((stitches * (1.0 + margin_ratio) / capacity).ceil() as u32).max(1)
}

/// Skeins per palette color, ascending by palette index.
pub fn compute_per_color_floss(
    stitch_counts: &[ColorStitchCount],
    aida_count: u32,
    num_strands: u32,
    margin_ratio: f64,
) -> Result<Vec<ColorFlossEstimate>> {
    validate_floss_params(aida_count, num_strands, margin_ratio)?;
    let capacity = skein_capacity(aida_count, num_strands);

    let mut estimates: Vec<ColorFlossEstimate> = stitch_counts
        .iter()
        .map(|c| ColorFlossEstimate {
            palette_index: c.palette_index,
            stitch_count: c.count,
            skeins: skeins_for(c.count as f64, capacity, margin_ratio),
        })
        .collect();
    estimates.sort_by_key(|e| e.palette_index);
    Ok(estimates)
}

pub fn compute_floss_estimate(
    total_stitches: u64,
    num_colors: u32,
    aida_count: u32,
    num_strands: u32,
    margin_ratio: f64,
) -> Result<FlossEstimate> {
    if total_stitches == 0 {
        return Err(PatternError::InvalidParameter(
            "total_stitches must be > 0".to_string(),
        ));
    }
    if num_colors == 0 {
        return Err(PatternError::InvalidParameter(
            "num_colors must be > 0".to_string(),
        ));
    }
    validate_floss_params(aida_count, num_strands, margin_ratio)?;

    let capacity = skein_capacity(aida_count, num_strands);
    let per_color = total_stitches as f64 / num_colors as f64;
    let skeins_per_color = skeins_for(per_color, capacity, margin_ratio);

    Ok(FlossEstimate {
        total_stitches,
        num_colors,
        skeins_per_color,
        total_skeins: skeins_per_color * num_colors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split_estimate() {
        let estimate = compute_floss_estimate(14_000, 8, 14, 2, DEFAULT_MARGIN_RATIO)
            .expect("valid estimate");
        assert_eq!(estimate.skeins_per_color, 2);
        assert_eq!(estimate.total_skeins, 16);
    }

    #[test]
    fn per_color_is_sorted_and_never_zero() {
        let counts = [
            ColorStitchCount { palette_index: 3, count: 1 },
            ColorStitchCount { palette_index: 0, count: 1750 },
        ];
        let estimates = compute_per_color_floss(&counts, 14, 2, DEFAULT_MARGIN_RATIO)
            .expect("valid estimate");
        assert_eq!(estimates[0].palette_index, 0);
        assert_eq!(estimates[0].skeins, 2);
        assert_eq!(estimates[1].palette_index, 3);
        assert_eq!(estimates[1].skeins, 1);
    }

    #[test]
    fn more_strands_need_more_skeins() {
        let counts = [ColorStitchCount { palette_index: 0, count: 5000 }];
        let two = compute_per_color_floss(&counts, 14, 2, 0.0).expect("two strands");
        let six = compute_per_color_floss(&counts, 14, 6, 0.0).expect("six strands");
        assert!(six[0].skeins > two[0].skeins);
    }

    #[test]
    fn rejects_invalid_parameters() {
        let counts = [ColorStitchCount { palette_index: 0, count: 10 }];
        assert!(compute_per_color_floss(&counts, 0, 2, 0.2).is_err());
        assert!(compute_per_color_floss(&counts, 14, 0, 0.2).is_err());
        assert!(compute_per_color_floss(&counts, 14, 7, 0.2).is_err());
        assert!(compute_per_color_floss(&counts, 14, 2, -0.1).is_err());
        assert!(compute_floss_estimate(0, 8, 14, 2, 0.2).is_err());
        assert!(compute_floss_estimate(100, 0, 14, 2, 0.2).is_err());
    }
}
