use super::fonts::{encode_win_ansi, text_width_pt, Font};
use crate::audit::{column_labels, AuditSession};
use anyhow::Context;
use chrono::{Datelike, Local, Timelike};
use pdf_writer::{Content, Date, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use std::path::Path;

pub const REPORT_TITLE: &str = "KinderTales Audit Report";

const PT_PER_MM: f64 = 72.0 / 25.4;

/// Page geometry and type sizes, in millimetres and points respectively.
#[derive(Debug, Clone)]
pub struct PdfLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    /// Width the table is scaled to fill.
    pub table_width: f64,
    pub row_height: f64,
    pub char_unit: f64,
    pub cell_padding: f64,
    pub line_width: f64,
    pub title_size: f64,
    pub meta_size: f64,
    pub header_size: f64,
    pub body_size: f64,
}

impl Default for PdfLayout {
    /// A4 landscape.
    fn default() -> Self {
        Self {
            page_width: 297.0,
            page_height: 210.0,
            margin: 10.0,
            table_width: 280.0,
            row_height: 10.0,
            char_unit: 5.0,
            cell_padding: 1.0,
            line_width: 0.2,
            title_size: 16.0,
            meta_size: 12.0,
            header_size: 12.0,
            body_size: 10.0,
        }
    }
}

impl PdfLayout {
    /// One width per column, proportional to the header label length and
    /// scaled so the row spans `table_width`.
    pub fn column_widths(&self, labels: &[&str]) -> Vec<f64> {
        let raw: Vec<f64> = labels
            .iter()
            .map(|l| l.chars().count() as f64 * self.char_unit)
            .collect();
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return vec![0.0; labels.len()];
        }
        let scale = self.table_width / total;
        raw.into_iter().map(|w| w * scale).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfSummary {
    pub pages: usize,
    pub table_rows: usize,
}

/// A cursor-driven page writer: cells advance the cursor to the right, `ln`
/// returns to the left margin, and a cell that would cross the bottom margin
/// starts a new page first.
struct Canvas<'a> {
    layout: &'a PdfLayout,
    done: Vec<Content>,
    page: Content,
    x: f64,
    y: f64,
    font: Font,
    size: f64,
}

impl<'a> Canvas<'a> {
    fn new(layout: &'a PdfLayout) -> Self {
        Self {
            layout,
            done: Vec::new(),
            page: Self::blank_page(layout),
            x: layout.margin,
            y: layout.margin,
            font: Font::Regular,
            size: layout.body_size,
        }
    }

    fn blank_page(layout: &PdfLayout) -> Content {
        let mut content = Content::new();
        content.set_line_width((layout.line_width * PT_PER_MM) as f32);
        content
    }

    fn add_page(&mut self) {
        let finished = std::mem::replace(&mut self.page, Self::blank_page(self.layout));
        self.done.push(finished);
        self.x = self.layout.margin;
        self.y = self.layout.margin;
    }

    fn page_count(&self) -> usize {
        self.done.len() + 1
    }

    fn set_font(&mut self, font: Font, size: f64) {
        self.font = font;
        self.size = size;
    }

    fn break_trigger(&self) -> f64 {
        self.layout.page_height - self.layout.margin
    }

    /// Draws one cell at the cursor. A zero width extends to the right margin.
    fn cell(&mut self, w: f64, h: f64, text: &str, border: bool, align: Align, newline: bool) {
        if self.y + h > self.break_trigger() {
            let x = self.x;
            self.add_page();
            self.x = x;
        }
        let w = if w == 0.0 {
            self.layout.page_width - self.layout.margin - self.x
        } else {
            w
        };

        let page_h = self.layout.page_height;
        let (x, y) = (self.x, self.y);
        let (font, size, padding) = (self.font, self.size, self.layout.cell_padding);
        let content = &mut self.page;

        if border {
            content.rect(
                (x * PT_PER_MM) as f32,
                ((page_h - y - h) * PT_PER_MM) as f32,
                (w * PT_PER_MM) as f32,
                (h * PT_PER_MM) as f32,
            );
            content.stroke();
        }

        if !text.is_empty() {
            let text_w = text_width_pt(font, text, size) / PT_PER_MM;
            let dx = match align {
                Align::Left => padding,
                Align::Center => (w - text_w) / 2.0,
            };
            let baseline = y + 0.5 * h + 0.3 * (size / PT_PER_MM);
            content.begin_text();
            content.set_font(Name(font.resource_name()), size as f32);
            content.next_line(
                ((x + dx) * PT_PER_MM) as f32,
                ((page_h - baseline) * PT_PER_MM) as f32,
            );
            content.show(Str(&encode_win_ansi(text)));
            content.end_text();
        }

        if newline {
            self.ln(h);
        } else {
            self.x += w;
        }
    }

    fn ln(&mut self, h: f64) {
        self.x = self.layout.margin;
        self.y += h;
    }

    fn finish(mut self, title: &str) -> Vec<u8> {
        self.done.push(self.page);
        let pages = self.done;

        let mut pdf = Pdf::new();
        let mut next = Ref::new(1);
        let mut alloc = || next.bump();

        let catalog_id = alloc();
        let tree_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();
        let info_id = alloc();
        let ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc())).collect();

        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(ids.iter().map(|(page_id, _)| *page_id))
            .count(ids.len() as i32);

        let media_box = Rect::new(
            0.0,
            0.0,
            (self.layout.page_width * PT_PER_MM) as f32,
            (self.layout.page_height * PT_PER_MM) as f32,
        );
        for ((page_id, content_id), content) in ids.iter().zip(pages) {
            let mut page = pdf.page(*page_id);
            page.media_box(media_box);
            page.parent(tree_id);
            page.contents(*content_id);
            page.resources()
                .fonts()
                .pair(Name(Font::Regular.resource_name()), regular_id)
                .pair(Name(Font::Bold.resource_name()), bold_id);
            page.finish();
            pdf.stream(*content_id, &content.finish());
        }

        for (id, font) in [(regular_id, Font::Regular), (bold_id, Font::Bold)] {
            pdf.type1_font(id)
                .base_font(Name(font.base_font()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        let now = Local::now();
        let created = Date::new(now.year() as u16)
            .month(now.month() as u8)
            .day(now.day() as u8)
            .hour(now.hour() as u8)
            .minute(now.minute() as u8)
            .second(now.second() as u8);
        pdf.document_info(info_id)
            .title(TextStr(title))
            .producer(TextStr(concat!("kindertalesd ", env!("CARGO_PKG_VERSION"))))
            .creation_date(created);

        pdf.finish()
    }
}

/// Lays out the session as a paginated report and returns the encoded file.
pub fn render_report(session: &AuditSession, layout: &PdfLayout) -> (Vec<u8>, PdfSummary) {
    let mut c = Canvas::new(layout);
    let h = layout.row_height;

    c.set_font(Font::Bold, layout.title_size);
    c.cell(layout.table_width, h, REPORT_TITLE, false, Align::Center, true);

    c.set_font(Font::Regular, layout.meta_size);
    c.cell(0.0, h, &format!("Date of Audit: {}", session.audit_date()), false, Align::Left, true);
    c.cell(0.0, h, &format!("Teacher: {}", session.teacher_name()), false, Align::Left, true);
    c.ln(h);

    let labels = column_labels();
    let widths = layout.column_widths(&labels);

    c.set_font(Font::Bold, layout.header_size);
    for (w, label) in widths.iter().zip(labels) {
        c.cell(*w, h, label, true, Align::Center, false);
    }
    c.ln(h);
    let mut table_rows = 1;

    c.set_font(Font::Regular, layout.body_size);
    for record in session.records() {
        for (w, value) in widths.iter().zip(record.row()) {
            c.cell(*w, h, &value, true, Align::Center, false);
        }
        c.ln(h);
        table_rows += 1;
    }

    let pages = c.page_count();
    let bytes = c.finish(REPORT_TITLE);
    tracing::debug!(pages, table_rows, "pdf laid out");
    (bytes, PdfSummary { pages, table_rows })
}

pub fn export_pdf(session: &AuditSession, out_path: &Path) -> anyhow::Result<PdfSummary> {
    let (bytes, summary) = render_report(session, &PdfLayout::default());
    std::fs::write(out_path, bytes)
        .with_context(|| format!("failed to write pdf {}", out_path.to_string_lossy()))?;
    Ok(summary)
}
