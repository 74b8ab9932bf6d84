use crate::audit::{column_labels, AuditSession};
use anyhow::Context;
use rust_xlsxwriter::Workbook;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SheetLayout {
    pub sheet_name: &'static str,
    /// First row of the header + data block; metadata sits above it.
    pub table_start_row: usize,
    pub width_padding: f64,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet_name: "Audit Report",
            table_start_row: 3,
            width_padding: 2.0,
        }
    }
}

/// The sheet as rows of text, top to bottom. Rows that should stay blank are
/// empty vectors, and an empty string is an absent cell.
pub fn build_grid(session: &AuditSession, layout: &SheetLayout) -> Vec<Vec<String>> {
    let mut grid: Vec<Vec<String>> = vec![
        vec!["Teacher's Name:".to_string(), session.teacher_name().to_string()],
        vec!["Date of Audit:".to_string(), session.audit_date().to_string()],
    ];
    grid.resize(layout.table_start_row, Vec::new());
    grid.push(column_labels().iter().map(|s| s.to_string()).collect());
    grid.extend(session.records().iter().map(|r| r.row()));
    grid
}

/// Longest rendered value in each column plus padding. Absent cells count as
/// zero characters.
pub fn column_widths(grid: &[Vec<String>], padding: f64) -> Vec<f64> {
    let cols = grid.iter().map(|r| r.len()).max().unwrap_or(0);
    let mut longest = vec![0usize; cols];
    for row in grid {
        for (c, v) in row.iter().enumerate() {
            longest[c] = longest[c].max(v.chars().count());
        }
    }
    longest.into_iter().map(|n| n as f64 + padding).collect()
}

pub fn export_xlsx(session: &AuditSession, out_path: &Path) -> anyhow::Result<usize> {
    let layout = SheetLayout::default();
    let grid = build_grid(session, &layout);
    let widths = column_widths(&grid, layout.width_padding);

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet
        .set_name(layout.sheet_name)
        .context("failed to name worksheet")?;

    for (r, row) in grid.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            sheet
                .write_string(r as u32, c as u16, value.as_str())
                .with_context(|| format!("failed to write cell ({r}, {c})"))?;
        }
    }
    for (c, w) in widths.iter().enumerate() {
        sheet
            .set_column_width(c as u16, *w)
            .with_context(|| format!("failed to size column {c}"))?;
    }

    workbook
        .save(out_path)
        .with_context(|| format!("failed to write workbook {}", out_path.to_string_lossy()))?;

    Ok(session.records().len())
}
