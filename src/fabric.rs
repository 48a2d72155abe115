use crate::error::{PatternError, Result};
use crate::floss::{compute_floss_estimate, FlossEstimate, DEFAULT_MARGIN_RATIO, DEFAULT_NUM_STRANDS};
use serde::{Deserialize, Serialize};

const CM_PER_INCH: f64 = 2.54;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FabricSize {
    pub width_cm: f64,
    pub height_cm: f64,
}

/// Cut size for a design of `stitches_w` x `stitches_h` on `aida_count`
/// fabric, with `margin_cm` of bare fabric on every side.
pub fn compute_fabric_size_cm(
    stitches_w: u32,
    stitches_h: u32,
    aida_count: u32,
    margin_cm: f64,
) -> Result<FabricSize> {
    if stitches_w == 0 || stitches_h == 0 {
        return Err(PatternError::InvalidParameter(format!(
            "design must be at least 1x1 stitches, got {}x{}",
            stitches_w, stitches_h
        )));
    }
    if aida_count == 0 {
        return Err(PatternError::InvalidParameter(
            "aida_count must be > 0".to_string(),
        ));
    }
    if !margin_cm.is_finite() || margin_cm < 0.0 {
        return Err(PatternError::InvalidParameter(format!(
            "margin_cm must be >= 0, got {}",
            margin_cm
        )));
    }

    let side = |stitches: u32| (stitches as f64 / aida_count as f64) * CM_PER_INCH + 2.0 * margin_cm;
    Ok(FabricSize {
        width_cm: side(stitches_w),
        height_cm: side(stitches_h),
    })
}

fn default_strands() -> u32 {
    DEFAULT_NUM_STRANDS
}

fn default_margin_ratio() -> f64 {
    DEFAULT_MARGIN_RATIO
}

/// Planning request for a design that has not been generated yet.
#[derive(Debug, Clone, Deserialize)]
pub struct FabricRequest {
    pub design_width: u32,
    pub design_height: u32,
    pub aida_count: u32,
    pub margin_cm: f64,
    pub num_colors: u32,
    #[serde(default = "default_strands")]
    pub num_strands: u32,
    #[serde(default = "default_margin_ratio")]
    pub margin_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FabricRequirements {
    pub fabric: FabricSize,
    pub floss: FlossEstimate,
}

/// Fabric size plus an even-split floss estimate for a full design.
pub fn calculate_fabric_requirements(request: &FabricRequest) -> Result<FabricRequirements> {
    let fabric = compute_fabric_size_cm(
        request.design_width,
        request.design_height,
        request.aida_count,
        request.margin_cm,
    )?;
    let floss = compute_floss_estimate(
        request.design_width as u64 * request.design_height as u64,
        request.num_colors,
        request.aida_count,
        request.num_strands,
        request.margin_ratio,
    )?;
    Ok(FabricRequirements { fabric, floss })
}
