use crate::ipc::error::ok;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "records": state.store.len(),
            "revision": state.store.revision(),
            "origin": state.origin,
            "loadError": state.load_error,
            "skippedRows": state.skipped_rows,
            "authenticated": state.gate.is_authenticated(),
            "pageSize": state.page_size,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        _ => None,
    }
}
