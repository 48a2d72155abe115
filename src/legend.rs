//! Legend rows for the printed chart and the summary handed to persistence.

use crate::config::PrintVariant;
use crate::dmc::DmcColor;
use crate::error::{PatternError, Result};
use crate::floss::ColorFlossEstimate;
use crate::mode::DetectedMode;
use crate::model::Pattern;
use serde::Serialize;

/// Legend entry with stitch statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub palette_index: usize,
    pub symbol: char,
    pub dmc_number: String,
    pub dmc_name: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub stitch_count: u64,
    pub skeins: u32,
}

impl LegendEntry {
    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// One row per palette index present in the grid, in palette order. `floss`
/// must come from [`compute_per_color_floss`](crate::floss::compute_per_color_floss)
/// on the same pattern.
pub fn build_legend(
    dmc_colors: &[DmcColor],
    symbols: &[char],
    floss: &[ColorFlossEstimate],
) -> Result<Vec<LegendEntry>> {
    floss
        .iter()
        .map(|estimate| {
            let idx = estimate.palette_index;
            let dmc = dmc_colors.get(idx).ok_or_else(|| {
                PatternError::InvalidParameter(format!("no DMC color for palette index {}", idx))
            })?;
            let symbol = *symbols.get(idx).ok_or_else(|| {
                PatternError::InvalidParameter(format!("no symbol for palette index {}", idx))
            })?;
            Ok(LegendEntry {
                palette_index: idx,
                symbol,
                dmc_number: dmc.number.clone(),
                dmc_name: dmc.name.clone(),
                r: dmc.r,
                g: dmc.g,
                b: dmc.b,
                stitch_count: estimate.stitch_count,
                skeins: estimate.skeins,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RgbJson {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteJson {
    pub colors: Vec<RgbJson>,
    pub dmc_colors: Vec<DmcColor>,
}

/// Fields stored alongside a project once a pattern has been generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary {
    pub grid_width: usize,
    pub grid_height: usize,
    pub stitch_count: usize,
    pub color_count: usize,
    pub processing_mode: DetectedMode,
    pub variant: PrintVariant,
    pub palette: PaletteJson,
}

impl PatternSummary {
    pub fn new(
        pattern: &Pattern,
        dmc_colors: &[DmcColor],
        processing_mode: DetectedMode,
        variant: PrintVariant,
    ) -> Self {
        let colors = pattern
            .palette()
            .colors()
            .iter()
            .map(|&[r, g, b]| RgbJson { r, g, b })
            .collect();
        Self {
            grid_width: pattern.width(),
            grid_height: pattern.height(),
            stitch_count: pattern.grid().stitch_count(),
            color_count: pattern.palette().len(),
            processing_mode,
            variant,
            palette: PaletteJson {
                colors,
                dmc_colors: dmc_colors.to_vec(),
            },
        }
    }

    /// The palette block as a JSON string.
    pub fn palette_json(&self) -> Result<String> {
        serde_json::to_string(&self.palette)
            .map_err(|e| PatternError::Export(format!("failed to serialize palette: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dmc::DmcCatalog;
    use crate::model::{Palette, PatternGrid};

    fn two_color_pattern() -> (Pattern, Vec<DmcColor>) {
        let catalog = DmcCatalog::global();
        let dmc: Vec<DmcColor> = ["310", "B5200"]
            .iter()
            .map(|n| catalog.get(n).expect("known thread").clone())
            .collect();
        let palette = Palette::new(dmc.iter().map(DmcColor::rgb).collect()).expect("palette");
        let grid = PatternGrid::from_rows(&[vec![0, 0, 1], vec![0, 1, 1]]).expect("grid");
        (Pattern::new(grid, palette).expect("pattern"), dmc)
    }

    #[test]
    fn legend_follows_floss_rows() {
        let (_, dmc) = two_color_pattern();
        let floss = vec![
            ColorFlossEstimate { palette_index: 0, stitch_count: 3, skeins: 1 },
            ColorFlossEstimate { palette_index: 1, stitch_count: 3, skeins: 1 },
        ];
        let legend = build_legend(&dmc, &['+', '*'], &floss).expect("legend");
        assert_eq!(legend.len(), 2);
        assert_eq!(legend[0].symbol, '+');
        assert_eq!(legend[0].dmc_number, "310");
        assert_eq!(legend[1].dmc_name, "Snow White");
        assert_eq!(legend[1].rgb(), [255, 255, 255]);

        assert!(build_legend(&dmc, &['+'], &floss).is_err());
    }

    #[test]
    fn summary_serializes_palette_block() {
        let (pattern, dmc) = two_color_pattern();
        let summary = PatternSummary::new(&pattern, &dmc, DetectedMode::PixelArt, PrintVariant::Bw);
        assert_eq!(summary.stitch_count, 6);
        assert_eq!(summary.color_count, 2);

        let json: serde_json::Value =
            serde_json::from_str(&summary.palette_json().expect("json")).expect("valid json");
        assert_eq!(json["colors"][1]["r"], 255);
        assert_eq!(json["dmc_colors"][0]["number"], "310");
        assert_eq!(json["dmc_colors"][0]["name"], "Black");

        let full = serde_json::to_value(&summary).expect("summary json");
        assert_eq!(full["processing_mode"], "pixel_art");
        assert_eq!(full["variant"], "bw");
    }
}
