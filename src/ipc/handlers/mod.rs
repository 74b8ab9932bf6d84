pub mod children;
pub mod core;
pub mod export;
pub mod grade;

use crate::audit::ChildRecord;
use crate::ipc::error::err;
use crate::ipc::types::Request;
use serde_json::{json, Map, Value};

pub(crate) fn required_str(req: &Request, key: &str) -> Result<String, Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing {}", key), None))
}

/// `Ok(None)` when the key is absent; a non-string value is a bad request.
pub(crate) fn optional_str(req: &Request, key: &str) -> Result<Option<String>, Value> {
    match req.params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(err(
            &req.id,
            "bad_params",
            format!("{} must be a string", key),
            None,
        )),
    }
}

pub(crate) fn child_json(r: &ChildRecord) -> Value {
    let mut fields = Map::new();
    for (field, value) in r.cells() {
        fields.insert(field.key().to_string(), json!(value.map(|v| v.label())));
    }
    json!({
        "id": r.id,
        "name": r.name(),
        "fields": fields,
        "cells": r.row().into_iter().skip(1).collect::<Vec<_>>(),
    })
}
