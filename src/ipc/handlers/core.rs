use super::{child_json, optional_str};
use crate::audit::column_labels;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "children": state.session.records().len(),
        }),
    )
}

fn handle_session_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let s = &state.session;
    ok(
        &req.id,
        json!({
            "auditDate": s.audit_date(),
            "teacherName": s.teacher_name(),
            "columns": column_labels(),
            "children": s.records().iter().map(child_json).collect::<Vec<_>>(),
        }),
    )
}

fn handle_session_set_meta(state: &mut AppState, req: &Request) -> serde_json::Value {
    let audit_date = match optional_str(req, "auditDate") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let teacher_name = match optional_str(req, "teacherName") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let s = &mut state.session;
    if let Some(v) = audit_date {
        s.set_audit_date(&v);
    }
    if let Some(v) = teacher_name {
        s.set_teacher_name(&v);
    }
    tracing::info!(audit_date = s.audit_date(), teacher = s.teacher_name(), "session metadata set");
    ok(
        &req.id,
        json!({
            "auditDate": s.audit_date(),
            "teacherName": s.teacher_name(),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "session.get" => Some(handle_session_get(state, req)),
        "session.setMeta" => Some(handle_session_set_meta(state, req)),
        _ => None,
    }
}
