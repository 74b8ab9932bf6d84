mod fonts;
pub mod pdf;
pub mod xlsx;

use crate::audit::AuditSession;
use anyhow::Context;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_EXTENSION: &str = "xlsx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Chosen purely by extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("xlsx") {
            Some(ExportFormat::Xlsx)
        } else if ext.eq_ignore_ascii_case("pdf") {
            Some(ExportFormat::Pdf)
        } else {
            None
        }
    }
}

/// A destination with no extension is saved as a workbook, the same default
/// the save dialog offers.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub format: ExportFormat,
    pub path: String,
    /// Child rows written, excluding the header.
    pub rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<usize>,
}

pub fn export_session(
    session: &AuditSession,
    out_path: &Path,
    format: ExportFormat,
) -> anyhow::Result<ExportSummary> {
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.to_string_lossy()))?;
    }

    let (rows, pages) = match format {
        ExportFormat::Xlsx => (xlsx::export_xlsx(session, out_path)?, None),
        ExportFormat::Pdf => {
            let summary = pdf::export_pdf(session, out_path)?;
            (summary.table_rows - 1, Some(summary.pages))
        }
    };

    tracing::info!(path = %out_path.display(), ?format, rows, "export written");
    Ok(ExportSummary {
        format,
        path: out_path.to_string_lossy().to_string(),
        rows,
        pages,
    })
}
