use crate::calc;
use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_grade_compute(state: &mut AppState, req: &Request) -> serde_json::Value {
    let g = calc::compute_grade(state.session.records());
    ok(
        &req.id,
        json!({
            "grade": calc::round_off_2_decimals(g.grade),
            "display": g.display(),
            "yesCount": g.yes_count,
            "totalCells": g.total_cells,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grade.compute" => Some(handle_grade_compute(state, req)),
        _ => None,
    }
}
