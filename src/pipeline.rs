//! Image to printable pattern, end to end. Stateless: every collaborator is
//! passed in, so concurrent calls share nothing but the read-only catalog.

use crate::config::{validate_generation_limits, GenerationLimits, PipelineConfig};
use crate::confetti::reduce_confetti;
use crate::dmc::{DmcCatalog, DmcColor};
use crate::error::Result;
use crate::fabric::{compute_fabric_size_cm, FabricSize};
use crate::floss::{compute_per_color_floss, DEFAULT_MARGIN_RATIO};
use crate::legend::{build_legend, LegendEntry, PatternSummary};
use crate::matcher::select_palette;
use crate::mode::{DetectedMode, ImageModeDetection, ImageModeDetector, DETECTION_THUMBNAIL_SIZE};
use crate::model::Pattern;
use crate::pdf_export::{PatternExporter, RenderRequest};
use crate::resize::{ImageResizer, ResamplingFilter};
use crate::stitches::{count_stitches_per_color, ColorStitchCount};
use crate::symbols::assign_symbols;
use crate::tiling::{layout_pages, TilingResult};
use std::time::Instant;

/// One generation request.
#[derive(Debug, Clone)]
pub struct PatternRequest<'a> {
    pub image_bytes: &'a [u8],
    pub target_width: u32,
    pub target_height: u32,
    pub num_colors: usize,
    pub config: PipelineConfig,
    pub limits: GenerationLimits,
}

#[derive(Debug, Clone)]
pub struct PatternWorkflowResult {
    pub pattern: Pattern,
    pub dmc_colors: Vec<DmcColor>,
    pub legend: Vec<LegendEntry>,
    pub stitch_counts: Vec<ColorStitchCount>,
    pub tiling: TilingResult,
    pub cell_size_mm: f64,
    pub fabric_size: FabricSize,
    pub mode: DetectedMode,
    /// Classifier scores, present when the mode was detected.
    pub detection: Option<ImageModeDetection>,
    pub summary: PatternSummary,
    pub document: Vec<u8>,
}

fn timing_enabled() -> bool {
    matches!(
        std::env::var("CROSSSTITCH_DEBUG_TIMING").as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES")
    )
}

/// Forced mode, or classify a nearest-neighbor thumbnail.
pub fn resolve_mode(
    image_bytes: &[u8],
    config: &PipelineConfig,
    resizer: &dyn ImageResizer,
    detector: &dyn ImageModeDetector,
) -> Result<(DetectedMode, Option<ImageModeDetection>)> {
    if let Some(mode) = config.processing_mode.forced() {
        return Ok((mode, None));
    }

    let thumbnail = resizer.load_and_resize(
        image_bytes,
        DETECTION_THUMBNAIL_SIZE,
        DETECTION_THUMBNAIL_SIZE,
        ResamplingFilter::Nearest,
    )?;
    let detection = detector.detect(&thumbnail);
    log::debug!(
        "Mode detection: {} (colors={}, edge_density={:.3}, avg_diff={:.1}, flat_ratio={:.3})",
        detection.mode,
        detection.unique_color_count,
        detection.edge_density,
        detection.avg_neighbor_diff,
        detection.flat_ratio
    );
    Ok((detection.mode, Some(detection)))
}

/// Resize and quantize only; no confetti pass, layout or document. Used for
/// previews.
#[allow(clippy::too_many_arguments)]
pub fn convert_image_to_pattern(
    image_bytes: &[u8],
    target_width: u32,
    target_height: u32,
    num_colors: usize,
    min_frequency_pct: f64,
    filter: ResamplingFilter,
    resizer: &dyn ImageResizer,
    catalog: &DmcCatalog,
) -> Result<(Pattern, Vec<DmcColor>)> {
    let pixels = resizer.load_and_resize(image_bytes, target_width, target_height, filter)?;
    let selection = select_palette(&pixels, num_colors, min_frequency_pct, catalog)?;
    let pattern = Pattern::new(selection.index_grid, selection.palette)?;
    Ok((pattern, selection.dmc_colors))
}

/// Full generation: limits, mode, quantization, smoothing, sizing, layout and
/// the rendered document.
pub fn run_pattern_workflow(
    request: &PatternRequest<'_>,
    resizer: &dyn ImageResizer,
    exporter: &dyn PatternExporter,
    detector: &dyn ImageModeDetector,
    catalog: &DmcCatalog,
    title: &str,
) -> Result<PatternWorkflowResult> {
    let t_total = Instant::now();
    let config = &request.config;
    log::info!(
        "Generating pattern {}x{} with up to {} colors (mode={:?}, variant={})",
        request.target_width,
        request.target_height,
        request.num_colors,
        config.processing_mode,
        config.variant
    );

    let input_dims = resizer.image_size(request.image_bytes)?;
    validate_generation_limits(
        request.num_colors,
        request.target_width,
        request.target_height,
        &request.limits,
        Some(input_dims),
    )?;

    let t_detect = Instant::now();
    let (mode, detection) = resolve_mode(request.image_bytes, config, resizer, detector)?;
    let detect_ms = t_detect.elapsed().as_millis();

    let min_frequency_pct = if mode.preserves_detail() {
        0.0
    } else {
        config.min_frequency_pct
    };

    let t_quantize = Instant::now();
    let (quantized, dmc_colors) = convert_image_to_pattern(
        request.image_bytes,
        request.target_width,
        request.target_height,
        request.num_colors,
        min_frequency_pct,
        mode.resampling_filter(),
        resizer,
        catalog,
    )?;
    let quantize_ms = t_quantize.elapsed().as_millis();

    let t_confetti = Instant::now();
    let pattern = if mode.preserves_detail() {
        quantized
    } else {
        let smoothed = reduce_confetti(quantized.grid(), config.confetti_passes);
        Pattern::new(smoothed, quantized.palette().clone())?
    };
    let confetti_ms = t_confetti.elapsed().as_millis();

    let fabric_size = compute_fabric_size_cm(
        pattern.width() as u32,
        pattern.height() as u32,
        config.aida_count,
        config.margin_cm,
    )?;
    let stitch_counts = count_stitches_per_color(pattern.grid());
    let symbols = assign_symbols(pattern.palette().len())?;
    let floss = compute_per_color_floss(
        &stitch_counts,
        config.aida_count,
        config.num_strands,
        DEFAULT_MARGIN_RATIO,
    )?;
    let legend = build_legend(&dmc_colors, &symbols, &floss)?;
    let (cell_size_mm, tiling) = layout_pages(pattern.width(), pattern.height())?;

    let t_render = Instant::now();
    let document = exporter.render(&RenderRequest {
        pattern: &pattern,
        title,
        fabric_size,
        aida_count: config.aida_count,
        margin_cm: config.margin_cm,
        legend: &legend,
        variant: config.variant,
        symbols: &symbols,
        tiling: &tiling,
        cell_size_mm,
    })?;
    let render_ms = t_render.elapsed().as_millis();

    let summary = PatternSummary::new(&pattern, &dmc_colors, mode, config.variant);
    let total_ms = t_total.elapsed().as_millis();

    if timing_enabled() {
        log::debug!(
            "Pattern timing mode={} detect={}ms quantize={}ms confetti={}ms render={}ms total={}ms",
            mode,
            detect_ms,
            quantize_ms,
            confetti_ms,
            render_ms,
            total_ms
        );
    }
    log::info!(
        "Pattern ready: {}x{}, {} colors, {} pages, {}ms",
        pattern.width(),
        pattern.height(),
        pattern.palette().len(),
        tiling.total_pages,
        total_ms
    );

    Ok(PatternWorkflowResult {
        pattern,
        dmc_colors,
        legend,
        stitch_counts,
        tiling,
        cell_size_mm,
        fabric_size,
        mode,
        detection,
        summary,
        document,
    })
}
