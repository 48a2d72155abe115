//! Request defaults and generation limits.

use crate::error::{PatternError, Result};
use crate::floss::DEFAULT_NUM_STRANDS;
use crate::confetti::DEFAULT_CONFETTI_PASSES;
use crate::mode::DetectedMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requested processing mode. `Auto` runs the classifier on a thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    #[default]
    Auto,
    Photo,
    Drawing,
    PixelArt,
}

impl ProcessingMode {
    /// The forced mode, or `None` when detection should decide.
    pub fn forced(self) -> Option<DetectedMode> {
        match self {
            ProcessingMode::Auto => None,
            ProcessingMode::Photo => Some(DetectedMode::Photo),
            ProcessingMode::Drawing => Some(DetectedMode::Drawing),
            ProcessingMode::PixelArt => Some(DetectedMode::PixelArt),
        }
    }
}

impl FromStr for ProcessingMode {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ProcessingMode::Auto),
            "photo" => Ok(ProcessingMode::Photo),
            "drawing" => Ok(ProcessingMode::Drawing),
            "pixel_art" => Ok(ProcessingMode::PixelArt),
            other => Err(PatternError::InvalidParameter(format!(
                "unknown processing mode '{}' (expected auto, photo, drawing or pixel_art)",
                other
            ))),
        }
    }
}

/// Printed chart style: filled colored cells, or white cells with symbols only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintVariant {
    #[default]
    Color,
    Bw,
}

impl PrintVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            PrintVariant::Color => "color",
            PrintVariant::Bw => "bw",
        }
    }
}

impl fmt::Display for PrintVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrintVariant {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" => Ok(PrintVariant::Color),
            "bw" => Ok(PrintVariant::Bw),
            other => Err(PatternError::InvalidParameter(format!(
                "unknown print variant '{}' (expected color or bw)",
                other
            ))),
        }
    }
}

/// Per-request settings with their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub min_frequency_pct: f64,
    pub aida_count: u32,
    pub num_strands: u32,
    pub margin_cm: f64,
    pub variant: PrintVariant,
    pub processing_mode: ProcessingMode,
    pub confetti_passes: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_frequency_pct: 1.0,
            aida_count: 14,
            num_strands: DEFAULT_NUM_STRANDS,
            margin_cm: 5.0,
            variant: PrintVariant::Color,
            processing_mode: ProcessingMode::Auto,
            confetti_passes: DEFAULT_CONFETTI_PASSES,
        }
    }
}

impl PipelineConfig {
    /// Parse a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PatternError::InvalidParameter(format!("invalid pipeline config: {}", e)))
    }
}

/// Caps applied before any pixel work, since cost grows with
/// pixels x palette size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationLimits {
    pub max_colors: usize,
    pub max_target_width: u32,
    pub max_target_height: u32,
    pub max_target_pixels: u64,
    pub max_input_pixels: u64,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_colors: 20,
            max_target_width: 300,
            max_target_height: 300,
            max_target_pixels: 90_000,
            max_input_pixels: 2_000_000,
        }
    }
}

fn env_override<T: FromStr>(name: &str, slot: &mut T) {
    let Ok(raw) = std::env::var(name) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) => *slot = value,
        Err(_) => log::warn!("Ignoring {}={:?}: not a valid number", name, raw),
    }
}

impl GenerationLimits {
    /// Defaults overridden by `CROSSSTITCH_MAX_*` environment variables.
    pub fn from_env() -> Self {
        let mut limits = Self::default();
        env_override("CROSSSTITCH_MAX_COLORS", &mut limits.max_colors);
        env_override("CROSSSTITCH_MAX_TARGET_WIDTH", &mut limits.max_target_width);
        env_override("CROSSSTITCH_MAX_TARGET_HEIGHT", &mut limits.max_target_height);
        env_override("CROSSSTITCH_MAX_TARGET_PIXELS", &mut limits.max_target_pixels);
        env_override("CROSSSTITCH_MAX_INPUT_PIXELS", &mut limits.max_input_pixels);
        limits
    }
}

pub fn validate_generation_limits(
    num_colors: usize,
    target_width: u32,
    target_height: u32,
    limits: &GenerationLimits,
    input_dims: Option<(u32, u32)>,
) -> Result<()> {
    if num_colors > limits.max_colors {
        return Err(PatternError::LimitExceeded(format!(
            "num_colors {} exceeds the maximum of {}",
            num_colors, limits.max_colors
        )));
    }
    if target_width > limits.max_target_width {
        return Err(PatternError::LimitExceeded(format!(
            "target width {} exceeds the maximum of {}",
            target_width, limits.max_target_width
        )));
    }
    if target_height > limits.max_target_height {
        return Err(PatternError::LimitExceeded(format!(
            "target height {} exceeds the maximum of {}",
            target_height, limits.max_target_height
        )));
    }
    let target_pixels = target_width as u64 * target_height as u64;
    if target_pixels > limits.max_target_pixels {
        return Err(PatternError::LimitExceeded(format!(
            "target size {}x{} is {} pixels, maximum is {}",
            target_width, target_height, target_pixels, limits.max_target_pixels
        )));
    }
    if let Some((w, h)) = input_dims {
        let input_pixels = w as u64 * h as u64;
        if input_pixels > limits.max_input_pixels {
            return Err(PatternError::LimitExceeded(format!(
                "input image {}x{} has {} pixels, maximum is {}",
                w, h, input_pixels, limits.max_input_pixels
            )));
        }
    }
    Ok(())
}
