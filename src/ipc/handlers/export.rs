use super::required_str;
use crate::export::{export_session, with_default_extension, ExportFormat};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn handle_export_save(state: &mut AppState, req: &Request) -> serde_json::Value {
    let raw = match required_str(req, "path") {
        Ok(v) => v,
        Err(e) => return e,
    };
    if raw.trim().is_empty() {
        return err(&req.id, "bad_params", "path must not be empty", None);
    }

    let path = with_default_extension(&PathBuf::from(raw.trim()));
    let Some(format) = ExportFormat::from_path(&path) else {
        return err(
            &req.id,
            "unsupported_format",
            "export path must end in .xlsx or .pdf",
            Some(json!({ "path": path.to_string_lossy() })),
        );
    };

    match export_session(&state.session, &path, format) {
        Ok(summary) => ok(&req.id, json!(summary)),
        Err(e) => {
            let message = format!("{e:#}");
            tracing::error!(path = %path.display(), error = %message, "export failed");
            err(
                &req.id,
                "export_failed",
                message,
                Some(json!({ "path": path.to_string_lossy() })),
            )
        }
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "export.save" => Some(handle_export_save(state, req)),
        _ => None,
    }
}
