use super::{child_json, required_str};
use crate::audit::ChecklistField;
use crate::ipc::error::{audit_err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_children_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(e) => return e,
    };
    match state.session.add_child(&name) {
        Some(child) => {
            tracing::info!(id = %child.id, name = child.name(), "child added");
            ok(&req.id, json!({ "child": child_json(child) }))
        }
        // Blank names are dropped without surfacing an error.
        None => {
            tracing::debug!("blank child name ignored");
            ok(&req.id, json!({ "child": null, "ignored": true }))
        }
    }
}

fn handle_children_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let children: Vec<_> = state.session.records().iter().map(child_json).collect();
    ok(&req.id, json!({ "children": children }))
}

fn handle_children_set_field(state: &mut AppState, req: &Request) -> serde_json::Value {
    let child_id = match required_str(req, "childId") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let field_raw = match required_str(req, "field") {
        Ok(v) => v,
        Err(e) => return e,
    };
    let value = match required_str(req, "value") {
        Ok(v) => v,
        Err(e) => return e,
    };

    let field: ChecklistField = match field_raw.parse() {
        Ok(f) => f,
        Err(e) => return audit_err(&req.id, &e),
    };
    match state.session.set_field(&child_id, field, &value) {
        Ok(child) => {
            tracing::info!(id = %child.id, field = field.label(), value = %value, "field set");
            ok(&req.id, json!({ "child": child_json(child) }))
        }
        Err(e) => {
            tracing::warn!(id = %child_id, field = field.label(), error = %e, "field update rejected");
            audit_err(&req.id, &e)
        }
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "children.add" => Some(handle_children_add(state, req)),
        "children.list" => Some(handle_children_list(state, req)),
        "children.setField" => Some(handle_children_set_field(state, req)),
        _ => None,
    }
}
