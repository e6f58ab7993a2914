use crate::chart::marks_chart;
use crate::ipc::error::ok;
use crate::ipc::helpers::require_session;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_marks(state: &AppState, req: &Request) -> serde_json::Value {
    let chart = marks_chart(state.store.all());
    ok(
        &req.id,
        json!({ "chart": chart, "revision": state.store.revision() }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "chart.marks" => Some(
            require_session(state, req).unwrap_or_else(|| handle_marks(state, req)),
        ),
        _ => None,
    }
}
