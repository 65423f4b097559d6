//! Document rendering: lays the composed block sequence onto fixed-size A4
//! pages and serializes to PDF bytes.

use crate::pdf::compose::{Block, InfoRow, TotalsRow};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Polygon, Rgb,
};
use service_core::error::AppError;
use std::io::BufWriter;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_LEFT: f32 = 20.0;
const MARGIN_RIGHT: f32 = 20.0;
const CONTENT_RIGHT: f32 = PAGE_WIDTH - MARGIN_RIGHT;
const TOP_Y: f32 = PAGE_HEIGHT - 20.0;
const BOTTOM_Y: f32 = 18.0;

// Line-item table column edges across the 170mm content width.
const COLUMN_EDGES: [f32; 6] = [20.0, 95.0, 115.0, 140.0, 162.0, 190.0];
const HEADER_ROW_HEIGHT: f32 = 9.0;
const ROW_HEIGHT: f32 = 7.0;

fn accent() -> Color {
    // #2563eb
    Color::Rgb(Rgb::new(0.145, 0.388, 0.922, None))
}

fn header_shade() -> Color {
    // #f3f4f6
    Color::Rgb(Rgb::new(0.953, 0.957, 0.965, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Approximate Helvetica text width (average glyph ~0.5 em), in mm.
fn text_width_mm(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.5 * 0.3528
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            if !current.is_empty() && current.chars().count() + word.chars().count() + 1 > max_chars
            {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    font_bold: IndirectFontRef,
    /// Top edge of the next element, in mm from the page bottom.
    y: f32,
}

impl PageWriter {
    fn new() -> Result<Self, AppError> {
        let (doc, page, layer) =
            PdfDocument::new("Invoice", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Font load failed: {}", e)))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Font load failed: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            font,
            font_bold,
            y: TOP_Y,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = TOP_Y;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < BOTTOM_Y {
            self.new_page();
        }
    }

    fn text(&self, text: &str, size: f32, x: f32, y: f32, bold: bool) {
        let font = if bold { &self.font_bold } else { &self.font };
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    /// Right-aligns text so it ends at `x_right`.
    fn text_right(&self, text: &str, size: f32, x_right: f32, y: f32, bold: bool) {
        self.text(text, size, x_right - text_width_mm(text, size), y, bold);
    }

    fn hline(&self, x1: f32, x2: f32, y: f32, thickness: f32) {
        self.layer.set_outline_thickness(thickness);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        });
    }

    fn vline(&self, x: f32, y1: f32, y2: f32) {
        self.layer.set_outline_thickness(0.3);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(x), Mm(y1)), false),
                (Point::new(Mm(x), Mm(y2)), false),
            ],
            is_closed: false,
        });
    }

    fn fill_rect(&self, x1: f32, y1: f32, x2: f32, y2: f32, color: Color) {
        self.layer.set_fill_color(color);
        self.layer.add_polygon(Polygon {
            rings: vec![vec![
                (Point::new(Mm(x1), Mm(y1)), false),
                (Point::new(Mm(x2), Mm(y1)), false),
                (Point::new(Mm(x2), Mm(y2)), false),
                (Point::new(Mm(x1), Mm(y2)), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });
        self.layer.set_fill_color(black());
    }

    fn logo(&mut self, bytes: &[u8]) {
        let Some(image) = decode_image(bytes) else {
            tracing::debug!("Skipping undecodable logo image");
            return;
        };

        self.ensure_space(24.0);

        // Natural print size at 300 dpi, capped to a 50x18mm box.
        let natural_w = image.image.width.0 as f32 * 25.4 / 300.0;
        let natural_h = image.image.height.0 as f32 * 25.4 / 300.0;
        let scale = (50.0 / natural_w).min(18.0 / natural_h).min(1.0);

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(MARGIN_LEFT)),
                translate_y: Some(Mm(self.y - natural_h * scale)),
                scale_x: Some(scale),
                scale_y: Some(scale),
                dpi: Some(300.0),
                ..Default::default()
            },
        );
        self.y -= natural_h * scale + 4.0;
    }

    fn issuer_identity(&mut self, lines: &[String]) {
        self.ensure_space(lines.len() as f32 * 5.0 + 7.0);
        for (i, line) in lines.iter().enumerate() {
            let (size, bold, advance) = if i == 0 { (12.0, true, 7.0) } else { (10.0, false, 5.0) };
            self.y -= advance;
            self.text(line, size, MARGIN_LEFT, self.y, bold);
        }
        self.y -= 6.0;
    }

    fn title(&mut self, text: &str) {
        self.ensure_space(18.0);
        self.y -= 10.0;
        self.layer.set_fill_color(accent());
        let x = (PAGE_WIDTH - text_width_mm(text, 24.0)) / 2.0;
        self.text(text, 24.0, x, self.y, true);
        self.layer.set_fill_color(black());
        self.y -= 10.0;
    }

    fn info_columns(&mut self, rows: &[InfoRow]) {
        self.ensure_space(rows.len() as f32 * 5.0 + 8.0);
        for row in rows {
            self.y -= 5.0;
            self.text(&row.left_label, 10.0, MARGIN_LEFT, self.y, true);
            self.text(&row.left_value, 10.0, 58.0, self.y, false);
            self.text(&row.right, 10.0, 120.0, self.y, true);
        }
        self.y -= 8.0;
    }

    fn items_table_header(&mut self, header: &[String; 5]) {
        let top = self.y;
        let bottom = top - HEADER_ROW_HEIGHT;
        self.fill_rect(COLUMN_EDGES[0], top, COLUMN_EDGES[5], bottom, header_shade());
        for (i, cell) in header.iter().enumerate() {
            self.text(cell, 11.0, COLUMN_EDGES[i] + 2.0, bottom + 3.0, true);
        }
        self.hline(COLUMN_EDGES[0], COLUMN_EDGES[5], top, 0.3);
        self.hline(COLUMN_EDGES[0], COLUMN_EDGES[5], bottom, 0.3);
        for x in COLUMN_EDGES {
            self.vline(x, top, bottom);
        }
        self.y = bottom;
    }

    fn items_table(&mut self, header: &[String; 5], rows: &[[String; 5]]) {
        self.ensure_space(HEADER_ROW_HEIGHT + ROW_HEIGHT);
        self.items_table_header(header);

        for row in rows {
            // Continue the grid on the next page, header repeated.
            if self.y - ROW_HEIGHT < BOTTOM_Y {
                self.new_page();
                self.items_table_header(header);
            }
            let top = self.y;
            let bottom = top - ROW_HEIGHT;
            for (i, cell) in row.iter().enumerate() {
                self.text(cell, 10.0, COLUMN_EDGES[i] + 2.0, bottom + 2.5, false);
            }
            self.hline(COLUMN_EDGES[0], COLUMN_EDGES[5], bottom, 0.3);
            for x in COLUMN_EDGES {
                self.vline(x, top, bottom);
            }
            self.y = bottom;
        }
        self.y -= 8.0;
    }

    fn totals_table(&mut self, rows: &[TotalsRow]) {
        self.ensure_space(rows.len() as f32 * 7.0 + 8.0);
        for row in rows {
            self.y -= 7.0;
            let (size, bold) = if row.emphasized { (12.0, true) } else { (10.0, false) };
            if row.emphasized {
                self.layer.set_fill_color(accent());
            }
            self.text_right(&row.label, size, COLUMN_EDGES[4], self.y, bold);
            self.text_right(&row.value, size, CONTENT_RIGHT, self.y, bold);
            if row.emphasized {
                self.layer.set_outline_color(accent());
                self.hline(120.0, CONTENT_RIGHT, self.y - 2.0, 0.8);
                self.layer.set_outline_color(black());
                self.layer.set_fill_color(black());
            }
        }
        self.y -= 8.0;
    }

    fn paragraph(&mut self, label: &str, body: &str) {
        let lines = wrap_text(body, 95);
        self.ensure_space(16.0);
        self.y -= 6.0;
        self.text(label, 11.0, MARGIN_LEFT, self.y, true);
        for line in &lines {
            // Long bodies continue on the next page.
            if self.y - 5.0 < BOTTOM_Y {
                self.new_page();
            }
            self.y -= 5.0;
            self.text(line, 10.0, MARGIN_LEFT, self.y, false);
        }
        self.y -= 5.0;
    }

    fn finish(self) -> Result<Vec<u8>, AppError> {
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("PDF save failed: {}", e)))?;
        writer
            .into_inner()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("PDF buffer error: {}", e)))
    }
}

fn decode_image(bytes: &[u8]) -> Option<printpdf::Image> {
    use printpdf::image_crate::codecs::{jpeg::JpegDecoder, png::PngDecoder};
    use printpdf::image_crate::{self, ImageFormat};

    match image_crate::guess_format(bytes).ok()? {
        ImageFormat::Png => {
            printpdf::Image::try_from(PngDecoder::new(std::io::Cursor::new(bytes)).ok()?).ok()
        }
        ImageFormat::Jpeg => {
            printpdf::Image::try_from(JpegDecoder::new(std::io::Cursor::new(bytes)).ok()?).ok()
        }
        _ => None,
    }
}

/// Serializes the block sequence to PDF bytes. Pure transform; safe to call
/// concurrently for different invoices. A logo that fails to decode as an
/// image is omitted and rendering continues.
pub fn render_pdf(blocks: &[Block]) -> Result<Vec<u8>, AppError> {
    let mut page = PageWriter::new()?;

    for block in blocks {
        match block {
            Block::Logo { bytes } => page.logo(bytes),
            Block::IssuerIdentity { lines } => page.issuer_identity(lines),
            Block::Title(text) => page.title(text),
            Block::InfoColumns { rows } => page.info_columns(rows),
            Block::ItemsTable { header, rows } => page.items_table(header, rows),
            Block::TotalsTable { rows } => page.totals_table(rows),
            Block::Paragraph { label, body } => page.paragraph(label, body),
        }
    }

    page.finish()
}
