//! Cross-stitch pattern generation core.
//!
//! Turns a raster image into a grid of DMC thread indices and lays it out for
//! printing: CIE LAB matching against the 489-color DMC catalog, frequency
//! based palette capping, confetti reduction, a heuristic photo / drawing /
//! pixel-art classifier, floss and fabric estimates, and A4 page tiling.
//!
//! The crate logs through the `log` facade and never installs a logger.

mod color;
mod config;
mod confetti;
mod dmc;
mod error;
mod fabric;
mod floss;
mod legend;
mod matcher;
mod mode;
mod model;
mod pdf_export;
mod pipeline;
mod resize;
mod stitches;
mod symbols;
mod tiling;

pub use color::{delta_e, delta_e_squared, rgb_to_lab, rgb_to_lab_batch, LabColor};
pub use config::{
    validate_generation_limits, GenerationLimits, PipelineConfig, PrintVariant, ProcessingMode,
};
pub use confetti::{reduce_confetti, DEFAULT_CONFETTI_PASSES};
pub use dmc::{hex_to_rgb, rgb_to_hex, DmcCatalog, DmcColor};
pub use error::{PatternError, Result};
pub use fabric::{
    calculate_fabric_requirements, compute_fabric_size_cm, FabricRequest, FabricRequirements,
    FabricSize,
};
pub use floss::{
    compute_floss_estimate, compute_per_color_floss, ColorFlossEstimate, FlossEstimate,
    DEFAULT_MARGIN_RATIO, DEFAULT_NUM_STRANDS,
};
pub use legend::{build_legend, LegendEntry, PaletteJson, PatternSummary, RgbJson};
pub use matcher::{find_nearest, select_palette, PaletteSelection};
pub use mode::{
    detect_image_mode, DetectedMode, HeuristicModeDetector, ImageModeDetection, ImageModeDetector,
    DETECTION_THUMBNAIL_SIZE,
};
pub use model::{Palette, Pattern, PatternGrid, PixelGrid};
pub use pdf_export::{export_pattern_pdf, PatternExporter, PdfPatternExporter, RenderRequest};
pub use pipeline::{
    convert_image_to_pattern, resolve_mode, run_pattern_workflow, PatternRequest,
    PatternWorkflowResult,
};
pub use resize::{ImageResizer, RasterResizer, ResamplingFilter};
pub use stitches::{count_stitches_per_color, ColorStitchCount};
pub use symbols::{assign_symbols, contrast_color, symbol_capacity};
pub use tiling::{
    cols_per_page, compute_cell_size_mm, compute_tiles, layout_pages, rows_per_page, PageTile,
    TilingResult,
};
