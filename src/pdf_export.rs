//! Printable chart export: a small hand-written PDF 1.4 writer.
//!
//! Document layout: an overview page, one grid page per [`PageTile`], then
//! as many legend pages as the palette needs. Page geometry comes from
//! [`crate::tiling`] so the printed cell count matches the tiling exactly.

use crate::config::PrintVariant;
use crate::error::{PatternError, Result};
use crate::fabric::FabricSize;
use crate::legend::LegendEntry;
use crate::model::Pattern;
use crate::symbols::contrast_color;
use crate::tiling::{
    PageTile, TilingResult, FOOTER_HEIGHT_PT, LABEL_MARGIN_LEFT_PT, LABEL_MARGIN_TOP_PT, MM_TO_PT,
    PAGE_HEIGHT_PT, PAGE_MARGIN_PT, PAGE_WIDTH_PT,
};

/// Heavier grid line every N stitches.
const MAJOR_LINE_STEP: usize = 10;
const LEGEND_ROW_HEIGHT: f64 = 16.0;
const LEGEND_HEADER_HEIGHT: f64 = 64.0;

/// Everything the renderer needs for one pattern.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub pattern: &'a Pattern,
    pub title: &'a str,
    pub fabric_size: FabricSize,
    pub aida_count: u32,
    pub margin_cm: f64,
    pub legend: &'a [LegendEntry],
    pub variant: PrintVariant,
    /// Symbol per palette index.
    pub symbols: &'a [char],
    pub tiling: &'a TilingResult,
    pub cell_size_mm: f64,
}

pub trait PatternExporter: Send + Sync {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfPatternExporter;

impl PatternExporter for PdfPatternExporter {
    fn render(&self, request: &RenderRequest<'_>) -> Result<Vec<u8>> {
        export_pattern_pdf(request)
    }
}

pub fn export_pattern_pdf(request: &RenderRequest<'_>) -> Result<Vec<u8>> {
    validate_request(request)?;

    let rows_per_legend_page = legend_rows_per_page();
    let legend_pages = request.legend.len().div_ceil(rows_per_legend_page).max(1);
    let total_pages = 1 + request.tiling.tiles.len() + legend_pages;

    let mut pages = Vec::with_capacity(total_pages);
    pages.push(build_overview_page(request, total_pages));
    for tile in &request.tiling.tiles {
        pages.push(build_grid_page(request, tile, pages.len() + 1, total_pages));
    }
    for (chunk_idx, chunk) in request
        .legend
        .chunks(rows_per_legend_page.max(1))
        .enumerate()
    {
        pages.push(build_legend_page(
            request,
            chunk,
            chunk_idx,
            pages.len() + 1,
            total_pages,
        ));
    }
    if request.legend.is_empty() {
        pages.push(build_legend_page(request, &[], 0, pages.len() + 1, total_pages));
    }

    log::debug!(
        "PDF export: {} pages ({} grid, {} legend), cell {:.2} mm",
        pages.len(),
        request.tiling.tiles.len(),
        legend_pages,
        request.cell_size_mm
    );

    Ok(write_pdf_document(&pages, PAGE_WIDTH_PT, PAGE_HEIGHT_PT))
}

fn validate_request(request: &RenderRequest<'_>) -> Result<()> {
    let pattern = request.pattern;
    if request.symbols.len() < pattern.palette().len() {
        return Err(PatternError::Export(format!(
            "{} symbols for {} palette colors",
            request.symbols.len(),
            pattern.palette().len()
        )));
    }
    if request.tiling.tiles.is_empty() {
        return Err(PatternError::Export("tiling has no pages".to_string()));
    }
    if let Some(tile) = request
        .tiling
        .tiles
        .iter()
        .find(|t| t.col_end > pattern.width() || t.row_end > pattern.height())
    {
        return Err(PatternError::Export(format!(
            "page {} extends past the {}x{} grid",
            tile.page_index,
            pattern.width(),
            pattern.height()
        )));
    }
    if !request.cell_size_mm.is_finite() || request.cell_size_mm <= 0.0 {
        return Err(PatternError::Export(format!(
            "invalid cell size {} mm",
            request.cell_size_mm
        )));
    }
    Ok(())
}

fn legend_rows_per_page() -> usize {
    let usable = PAGE_HEIGHT_PT - 2.0 * PAGE_MARGIN_PT - LEGEND_HEADER_HEIGHT - FOOTER_HEIGHT_PT;
    ((usable / LEGEND_ROW_HEIGHT).floor() as usize).max(1)
}

/// Fill color for a palette color in the chosen variant.
fn print_rgb(rgb: [u8; 3], variant: PrintVariant) -> (f64, f64, f64) {
    match variant {
        PrintVariant::Color => (
            rgb[0] as f64 / 255.0,
            rgb[1] as f64 / 255.0,
            rgb[2] as f64 / 255.0,
        ),
        PrintVariant::Bw => {
            let luma = (0.299 * rgb[0] as f64 + 0.587 * rgb[1] as f64 + 0.114 * rgb[2] as f64)
                / 255.0;
            (luma, luma, luma)
        }
    }
}

fn footer(stream: &mut String, title: &str, page: usize, total_pages: usize) {
    stream.push_str("0 0 0 rg\n");
    let y = PAGE_MARGIN_PT * 0.5;
    stream.push_str(&text_cmd(PAGE_MARGIN_PT, y, 8.0, &sanitize_text(title)));
    stream.push_str(&text_cmd(
        PAGE_WIDTH_PT - PAGE_MARGIN_PT - 40.0,
        y,
        8.0,
        &format!("{} / {}", page, total_pages),
    ));
}

fn build_overview_page(request: &RenderRequest<'_>, total_pages: usize) -> String {
    let pattern = request.pattern;
    let mut stream = String::new();
    let left = PAGE_MARGIN_PT;
    let top = PAGE_HEIGHT_PT - PAGE_MARGIN_PT;

    stream.push_str("0 0 0 rg\n");
    stream.push_str(&text_cmd(left, top - 18.0, 18.0, &sanitize_text(request.title)));
    stream.push_str(&text_cmd(
        left,
        top - 38.0,
        10.0,
        &format!(
            "{} x {} stitches | {} colors | {} pages of chart",
            pattern.width(),
            pattern.height(),
            pattern.palette().len(),
            request.tiling.tiles.len()
        ),
    ));
    stream.push_str(&text_cmd(
        left,
        top - 54.0,
        10.0,
        &format!(
            "Fabric: {}-count Aida, {:.1} x {:.1} cm including {:.1} cm margin",
            request.aida_count,
            request.fabric_size.width_cm,
            request.fabric_size.height_cm,
            request.margin_cm
        ),
    ));

    // Thumbnail, one rectangle per run of equal cells in a row.
    let box_top = top - 76.0;
    let box_bottom = PAGE_MARGIN_PT + FOOTER_HEIGHT_PT + 10.0;
    let box_w = PAGE_WIDTH_PT - 2.0 * PAGE_MARGIN_PT;
    let box_h = box_top - box_bottom;
    let scale = (box_w / pattern.width() as f64).min(box_h / pattern.height() as f64);
    let origin_x = left + (box_w - scale * pattern.width() as f64) * 0.5;
    let origin_top = box_top;

    for (y, row) in pattern.grid().rows().enumerate() {
        let py = origin_top - (y + 1) as f64 * scale;
        let mut x = 0usize;
        while x < row.len() {
            let idx = row[x];
            let run_start = x;
            while x < row.len() && row[x] == idx {
                x += 1;
            }
            let rgb = pattern.palette().colors()[idx as usize];
            let (r, g, b) = print_rgb(rgb, request.variant);
            stream.push_str(&format!(
                "{:.3} {:.3} {:.3} rg {:.3} {:.3} {:.3} {:.3} re f\n",
                r,
                g,
                b,
                origin_x + run_start as f64 * scale,
                py,
                (x - run_start) as f64 * scale,
                scale
            ));
        }
    }

    // Page map over the thumbnail.
    stream.push_str("0.2 0.2 0.2 RG 0.6 w\n");
    for tile in &request.tiling.tiles {
        let x = origin_x + tile.col_start as f64 * scale;
        let y = origin_top - tile.row_end as f64 * scale;
        let w = tile.width() as f64 * scale;
        let h = tile.height() as f64 * scale;
        stream.push_str(&format!("{:.3} {:.3} {:.3} {:.3} re S\n", x, y, w, h));
        let label_h = (h.min(w) * 0.25).clamp(4.0, 24.0);
        stream.push_str(&draw_vector_number(
            &(tile.page_index + 2).to_string(),
            x + w * 0.5,
            y + h * 0.5,
            label_h,
            0.15,
        ));
    }

    footer(&mut stream, request.title, 1, total_pages);
    stream
}

fn build_grid_page(
    request: &RenderRequest<'_>,
    tile: &PageTile,
    page: usize,
    total_pages: usize,
) -> String {
    let pattern = request.pattern;
    let mut stream = String::new();
    let cell = request.cell_size_mm * MM_TO_PT;
    let origin_x = PAGE_MARGIN_PT + LABEL_MARGIN_LEFT_PT;
    let origin_top = PAGE_HEIGHT_PT - PAGE_MARGIN_PT - LABEL_MARGIN_TOP_PT;
    let grid_w = tile.width() as f64 * cell;
    let grid_h = tile.height() as f64 * cell;
    let grid_bottom = origin_top - grid_h;
    let font_size = cell * 0.7;

    for y in tile.row_start..tile.row_end {
        for x in tile.col_start..tile.col_end {
            let Some(idx) = pattern.grid().get(x, y).map(usize::from) else {
                continue;
            };
            let Some(rgb) = pattern.palette().get(idx) else {
                continue;
            };
            let px = origin_x + (x - tile.col_start) as f64 * cell;
            let py = origin_top - (y - tile.row_start + 1) as f64 * cell;

            let ink = match request.variant {
                PrintVariant::Color => {
                    let (r, g, b) = print_rgb(rgb, PrintVariant::Color);
                    stream.push_str(&format!(
                        "{:.3} {:.3} {:.3} rg {:.3} {:.3} {:.3} {:.3} re f\n",
                        r, g, b, px, py, cell, cell
                    ));
                    let c = contrast_color(rgb);
                    c[0] as f64 / 255.0
                }
                PrintVariant::Bw => 0.0,
            };

            stream.push_str(&draw_symbol(request.symbols[idx], idx, px, py, cell, font_size, ink));
        }
    }

    // Thin lines every stitch.
    stream.push_str("0.6 0.6 0.6 RG 0.25 w\n");
    for col in 0..=tile.width() {
        let x = origin_x + col as f64 * cell;
        stream.push_str(&line(x, grid_bottom, x, origin_top));
    }
    for row in 0..=tile.height() {
        let y = origin_top - row as f64 * cell;
        stream.push_str(&line(origin_x, y, origin_x + grid_w, y));
    }

    // Heavy lines on global multiples of 10 and the tile border.
    stream.push_str("0 0 0 RG 0.9 w\n");
    for col in tile.col_start..=tile.col_end {
        if col % MAJOR_LINE_STEP == 0 || col == tile.col_start || col == tile.col_end {
            let x = origin_x + (col - tile.col_start) as f64 * cell;
            stream.push_str(&line(x, grid_bottom, x, origin_top));
        }
    }
    for row in tile.row_start..=tile.row_end {
        if row % MAJOR_LINE_STEP == 0 || row == tile.row_start || row == tile.row_end {
            let y = origin_top - (row - tile.row_start) as f64 * cell;
            stream.push_str(&line(origin_x, y, origin_x + grid_w, y));
        }
    }

    // Stitch numbers, 1-based, on the heavy lines.
    stream.push_str("0 0 0 rg\n");
    for col in tile.col_start + 1..=tile.col_end {
        if col % MAJOR_LINE_STEP == 0 {
            let x = origin_x + (col - tile.col_start) as f64 * cell;
            stream.push_str(&text_cmd(x - 5.0, origin_top + 4.0, 6.0, &col.to_string()));
        }
    }
    for row in tile.row_start + 1..=tile.row_end {
        if row % MAJOR_LINE_STEP == 0 {
            let y = origin_top - (row - tile.row_start) as f64 * cell;
            stream.push_str(&text_cmd(origin_x - 16.0, y - 2.0, 6.0, &row.to_string()));
        }
    }

    // Center lines.
    stream.push_str("1 0 0 RG 1.5 w\n");
    if let Some(center_col) = tile.center_col {
        let x = origin_x + center_col * cell;
        stream.push_str(&line(x, grid_bottom, x, origin_top));
    }
    if let Some(center_row) = tile.center_row {
        let y = origin_top - center_row * cell;
        stream.push_str(&line(origin_x, y, origin_x + grid_w, y));
    }

    footer(&mut stream, request.title, page, total_pages);
    stream
}

fn build_legend_page(
    request: &RenderRequest<'_>,
    entries: &[LegendEntry],
    chunk_idx: usize,
    page: usize,
    total_pages: usize,
) -> String {
    let mut stream = String::new();
    let left = PAGE_MARGIN_PT;
    let top = PAGE_HEIGHT_PT - PAGE_MARGIN_PT;

    let heading = if chunk_idx == 0 {
        "Thread Legend".to_string()
    } else {
        format!("Thread Legend (continued {})", chunk_idx + 1)
    };
    stream.push_str("0 0 0 rg\n");
    stream.push_str(&text_cmd(left, top - 18.0, 16.0, &heading));
    stream.push_str(&text_cmd(
        left,
        top - 34.0,
        9.0,
        &format!(
            "DMC stranded cotton on {}-count Aida | {} colors",
            request.aida_count,
            request.legend.len()
        ),
    ));

    let header_y = top - LEGEND_HEADER_HEIGHT + 12.0;
    let columns = [
        (left, "Sym"),
        (left + 40.0, "DMC"),
        (left + 90.0, "Name"),
        (left + 320.0, "Stitches"),
        (left + 400.0, "Skeins"),
    ];
    for (x, label) in columns {
        stream.push_str(&text_cmd(x, header_y, 9.0, label));
    }

    let swatch = 12.0;
    for (row, entry) in entries.iter().enumerate() {
        let y = top - LEGEND_HEADER_HEIGHT - row as f64 * LEGEND_ROW_HEIGHT;
        let rgb = entry.rgb();
        let (r, g, b) = print_rgb(rgb, request.variant);
        stream.push_str(&format!(
            "{:.3} {:.3} {:.3} rg {:.3} {:.3} {:.3} {:.3} re f\n",
            r, g, b, left, y, swatch, swatch
        ));
        stream.push_str("0.2 0.2 0.2 RG 0.4 w\n");
        stream.push_str(&format!("{:.3} {:.3} {:.3} {:.3} re S\n", left, y, swatch, swatch));

        let ink = match request.variant {
            PrintVariant::Color => contrast_color(rgb)[0] as f64 / 255.0,
            PrintVariant::Bw => {
                if r > 0.5 {
                    0.0
                } else {
                    1.0
                }
            }
        };
        stream.push_str(&draw_symbol(
            entry.symbol,
            entry.palette_index,
            left,
            y,
            swatch,
            swatch * 0.7,
            ink,
        ));

        stream.push_str("0 0 0 rg\n");
        stream.push_str(&text_cmd(left + 40.0, y + 3.0, 9.0, &sanitize_text(&entry.dmc_number)));
        stream.push_str(&text_cmd(left + 90.0, y + 3.0, 9.0, &sanitize_text(&entry.dmc_name)));
        stream.push_str(&text_cmd(left + 320.0, y + 3.0, 9.0, &entry.stitch_count.to_string()));
        stream.push_str(&text_cmd(left + 400.0, y + 3.0, 9.0, &entry.skeins.to_string()));
    }

    footer(&mut stream, request.title, page, total_pages);
    stream
}

fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> String {
    format!("{:.3} {:.3} m {:.3} {:.3} l S\n", x1, y1, x2, y2)
}

/// Symbols the base font can show directly (printable ASCII and Latin-1).
fn is_font_encodable(symbol: char) -> bool {
    let code = symbol as u32;
    (0x21..=0x7E).contains(&code) || (0xA1..=0xFF).contains(&code)
}

/// Draw a chart symbol centered in a cell. Symbols outside the font fall back
/// to the 1-based palette number.
fn draw_symbol(
    symbol: char,
    palette_index: usize,
    x: f64,
    y: f64,
    cell: f64,
    font_size: f64,
    gray: f64,
) -> String {
    if is_font_encodable(symbol) {
        let mut stream = format!("{:.3} {:.3} {:.3} rg\n", gray, gray, gray);
        let glyph_w = font_size * 0.55;
        stream.push_str(&text_cmd(
            x + (cell - glyph_w) * 0.5,
            y + (cell - font_size * 0.7) * 0.5,
            font_size,
            &symbol.to_string(),
        ));
        stream
    } else {
        draw_vector_number(
            &(palette_index + 1).to_string(),
            x + cell * 0.5,
            y + cell * 0.5,
            cell * 0.5,
            gray,
        )
    }
}

fn text_cmd(x: f64, y: f64, size: f64, text: &str) -> String {
    format!(
        "BT /F1 {:.2} Tf 1 0 0 1 {:.3} {:.3} Tm ({}) Tj ET\n",
        size,
        x,
        y,
        escape_pdf_text(text)
    )
}

fn draw_vector_number(value: &str, cx: f64, cy: f64, height: f64, gray: f64) -> String {
    let mut stream = String::new();
    let scale = (height / 5.0).max(0.35);
    let spacing = scale;

    let glyphs: Vec<[&str; 5]> = value.chars().filter_map(number_glyph).collect();
    if glyphs.is_empty() {
        return stream;
    }

    let total_width =
        glyphs.len() as f64 * 3.0 * scale + (glyphs.len().saturating_sub(1)) as f64 * spacing;
    let mut x_cursor = cx - total_width * 0.5;
    let y_cursor = cy - 2.5 * scale;

    stream.push_str(&format!("{:.3} {:.3} {:.3} rg\n", gray, gray, gray));

    for glyph in glyphs {
        for (row, row_bits) in glyph.iter().enumerate() {
            for (col, bit) in row_bits.as_bytes().iter().enumerate() {
                if *bit != b'1' {
                    continue;
                }
                let px = x_cursor + col as f64 * scale;
                let py = y_cursor + (4 - row) as f64 * scale;
                stream.push_str(&format!(
                    "{:.3} {:.3} {:.3} {:.3} re f\n",
                    px, py, scale, scale
                ));
            }
        }
        x_cursor += 3.0 * scale + spacing;
    }

    stream
}

fn number_glyph(ch: char) -> Option<[&'static str; 5]> {
    let glyph = match ch {
        '0' => ["111", "101", "101", "101", "111"],
        '1' => ["010", "110", "010", "010", "111"],
        '2' => ["111", "001", "111", "100", "111"],
        '3' => ["111", "001", "111", "001", "111"],
        '4' => ["101", "101", "111", "001", "001"],
        '5' => ["111", "100", "111", "001", "111"],
        '6' => ["111", "100", "111", "101", "111"],
        '7' => ["111", "001", "010", "010", "010"],
        '8' => ["111", "101", "111", "101", "111"],
        '9' => ["111", "101", "111", "001", "111"],
        _ => return None,
    };
    Some(glyph)
}

fn write_pdf_document(pages: &[String], page_width: f64, page_height: f64) -> Vec<u8> {
    let page_count = pages.len();
    let first_page_object_id = 3usize;
    let first_content_object_id = first_page_object_id + page_count;
    let font_object_id = first_content_object_id + page_count;

    let kids = (0..page_count)
        .map(|idx| format!("{} 0 R", first_page_object_id + idx))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects: Vec<Vec<u8>> = vec![
        b"<< /Type /Catalog /Pages 2 0 R >>".to_vec(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_count).into_bytes(),
    ];

    for idx in 0..page_count {
        let content_id = first_content_object_id + idx;
        let page_obj = format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
            page_width, page_height, font_object_id, content_id
        );
        objects.push(page_obj.into_bytes());
    }

    for page in pages {
        objects.push(stream_object(page));
    }

    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    let mut out = Vec::with_capacity(64 * 1024);
    out.extend_from_slice(b"%PDF-1.4\n");
    out.extend_from_slice(b"%crossstitch\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (idx, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", idx + 1).as_bytes());
        out.extend_from_slice(object);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );

    out
}

fn stream_object(stream: &str) -> Vec<u8> {
    let bytes = stream.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() + 64);
    out.extend_from_slice(format!("<< /Length {} >>\nstream\n", bytes.len()).as_bytes());
    out.extend_from_slice(bytes);
    out.extend_from_slice(b"endstream");
    out
}

/// Keep characters the WinAnsi font can show; everything else becomes '?'.
fn sanitize_text(text: &str) -> String {
    text.chars()
        .map(|ch| {
            let code = ch as u32;
            if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) {
                ch
            } else {
                '?'
            }
        })
        .collect()
}

/// Escape for a PDF literal string. Non-ASCII Latin-1 goes out as octal so
/// the content stream stays pure ASCII.
fn escape_pdf_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            c if (c as u32) >= 0x80 && (c as u32) <= 0xFF => {
                out.push_str(&format!("\\{:03o}", c as u32));
            }
            c if c.is_ascii() => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Palette, PatternGrid};
    use crate::tiling::compute_tiles;

    fn fixture() -> (Pattern, Vec<LegendEntry>) {
        let palette = Palette::new(vec![[255, 0, 0], [255, 255, 255]]).expect("palette");
        let rows: Vec<Vec<u16>> = (0..12)
            .map(|y| (0..20).map(|x| if (x + y) % 3 == 0 { 0 } else { 1 }).collect())
            .collect();
        let grid = PatternGrid::from_rows(&rows).expect("grid");
        let pattern = Pattern::new(grid, palette).expect("pattern");
        let legend = vec![
            LegendEntry {
                palette_index: 0,
                symbol: '+',
                dmc_number: "666".to_string(),
                dmc_name: "Bright Red".to_string(),
                r: 255,
                g: 0,
                b: 0,
                stitch_count: 80,
                skeins: 1,
            },
            LegendEntry {
                palette_index: 1,
                symbol: '\u{B0}',
                dmc_number: "B5200".to_string(),
                dmc_name: "Snow White".to_string(),
                r: 255,
                g: 255,
                b: 255,
                stitch_count: 160,
                skeins: 1,
            },
        ];
        (pattern, legend)
    }

    fn render(variant: PrintVariant, cols: usize, rows: usize) -> String {
        let (pattern, legend) = fixture();
        let tiling = compute_tiles(20, 12, cols, rows).expect("tiling");
        let request = RenderRequest {
            pattern: &pattern,
            title: "Test (Rose)",
            fabric_size: FabricSize {
                width_cm: 13.6,
                height_cm: 12.2,
            },
            aida_count: 14,
            margin_cm: 5.0,
            legend: &legend,
            variant,
            symbols: &['+', '\u{B0}'],
            tiling: &tiling,
            cell_size_mm: 5.0,
        };
        let bytes = PdfPatternExporter.render(&request).expect("PDF should export");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[test]
    fn single_tile_document_structure() {
        let text = render(PrintVariant::Color, 32, 49);
        assert!(text.starts_with("%PDF-1.4"));
        assert!(text.contains("/Count 3"), "overview + grid + legend");
        assert!(text.contains("/MediaBox [0 0 595.28 841.89]"));
        assert!(text.contains("1 0 0 RG 1.5 w"), "red center lines");
        assert!(text.contains("(Test \\(Rose\\))"));
        assert!(text.contains("(\\260)"), "degree sign as octal escape");
        assert!(text.contains("(3 / 3)"));
        assert!(text.ends_with("%%EOF"));
    }

    #[test]
    fn one_grid_page_per_tile() {
        let text = render(PrintVariant::Color, 8, 5);
        // 3 x 3 tiles.
        assert!(text.contains("/Count 11"));
        assert!(text.contains("(11 / 11)"));
    }

    #[test]
    fn bw_variant_has_no_colored_fills() {
        let color = render(PrintVariant::Color, 32, 49);
        let bw = render(PrintVariant::Bw, 32, 49);
        assert!(color.contains("1.000 0.000 0.000 rg"));
        assert!(!bw.contains("1.000 0.000 0.000 rg"));
    }

    #[test]
    fn rejects_missing_symbols() {
        let (pattern, legend) = fixture();
        let tiling = compute_tiles(20, 12, 32, 49).expect("tiling");
        let request = RenderRequest {
            pattern: &pattern,
            title: "x",
            fabric_size: FabricSize {
                width_cm: 1.0,
                height_cm: 1.0,
            },
            aida_count: 14,
            margin_cm: 0.0,
            legend: &legend,
            variant: PrintVariant::Color,
            symbols: &['+'],
            tiling: &tiling,
            cell_size_mm: 5.0,
        };
        assert!(matches!(
            export_pattern_pdf(&request),
            Err(PatternError::Export(_))
        ));
    }

    #[test]
    fn escapes_and_sanitizes_text() {
        assert_eq!(escape_pdf_text("a(b)\\"), "a\\(b\\)\\\\");
        assert_eq!(escape_pdf_text("\u{D7}"), "\\327");
        assert_eq!(sanitize_text("caf\u{E9} \u{2605}\n"), "caf\u{E9} ??");
    }
}
