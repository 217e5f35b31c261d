//! Report rendering
//!
//! Turns a parsed report into its two disposable presentation forms: the
//! plain display text and the downloadable PDF document. Every field is
//! rendered, sentinel defaults included.

use chrono::Utc;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};

use crate::error::{AppError, AppResult};
use shared::RiceQualityReport;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_LEFT_MM: f32 = 20.0;
const MARGIN_TOP_MM: f32 = 272.0;
const MARGIN_BOTTOM_MM: f32 = 22.0;
const VALUE_COLUMN_MM: f32 = 75.0;
const WRAP_COLUMNS: usize = 88;

/// Plain display form: one `Label: value` line per field
pub fn render_display(report: &RiceQualityReport) -> String {
    report.to_display_text()
}

/// Render the report as a paginated PDF document
pub fn render_document(report: &RiceQualityReport) -> AppResult<Vec<u8>> {
    let mut writer = PdfWriter::new("Rice Quality Report")?;

    writer.heading("Rice Quality Report");
    writer.line(
        &format!("Generated: {}", Utc::now().format("%Y-%m-%d %H:%M UTC")),
        9.0,
        false,
    );
    writer.space(6.0);

    writer.line("Quality Metrics", 13.0, true);
    writer.space(2.0);
    for (label, value) in [
        ("Rice Type", report.rice_type.clone()),
        ("Broken Grains", report.broken_grains_percent.to_string()),
        ("Discoloration", report.discoloration_percent.to_string()),
        ("Impurities", report.impurities_percent.to_string()),
    ] {
        writer.metric_row(label, &value);
    }
    writer.space(6.0);

    writer.paragraph("Foreign Objects", &report.foreign_objects);
    writer.space(4.0);
    writer.paragraph("Recommendation", &report.recommendation);

    writer.finish()
}

/// Incremental line-oriented PDF writer with automatic page breaks
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PdfWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Render(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: MARGIN_TOP_MM,
        })
    }

    /// Start a new page when fewer than `needed` millimeters remain
    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN_BOTTOM_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = MARGIN_TOP_MM;
        }
    }

    fn heading(&mut self, text: &str) {
        self.ensure_space(12.0);
        self.layer
            .use_text(text, 18.0, Mm(MARGIN_LEFT_MM), Mm(self.y), &self.bold);
        self.y -= 12.0;
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.ensure_space(7.0);
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(MARGIN_LEFT_MM), Mm(self.y), font);
        self.y -= 7.0;
    }

    /// Two-column row: bold label, value in the second column
    fn metric_row(&mut self, label: &str, value: &str) {
        self.ensure_space(7.0);
        self.layer
            .use_text(label, 11.0, Mm(MARGIN_LEFT_MM), Mm(self.y), &self.bold);
        self.layer
            .use_text(value, 11.0, Mm(VALUE_COLUMN_MM), Mm(self.y), &self.regular);
        self.y -= 7.0;
    }

    /// Bold header followed by word-wrapped body text
    fn paragraph(&mut self, header: &str, body: &str) {
        self.line(header, 13.0, true);
        self.space(1.0);
        for wrapped in wrap_text(body, WRAP_COLUMNS) {
            self.line(&wrapped, 11.0, false);
        }
    }

    fn space(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

/// Greedy word wrap; words longer than the width get their own line
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
