use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::require_session;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn window_json(state: &AppState) -> serde_json::Value {
    let fmt = |d: chrono::NaiveDate| d.format("%Y-%m-%d").to_string();
    json!({
        "start": fmt(state.window.start()),
        "end": fmt(state.window.end()),
        "selectable": state
            .window
            .selectable_dates()
            .into_iter()
            .map(fmt)
            .collect::<Vec<_>>(),
        "selected": state.selected_date.map(fmt),
    })
}

// The selected date is echoed back only; it never feeds the table filter.
fn handle_select(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    match req.params.get("date") {
        None => return Err(HandlerErr::bad_params("missing date")),
        Some(serde_json::Value::Null) => state.selected_date = None,
        Some(v) => {
            let raw = v
                .as_str()
                .ok_or_else(|| HandlerErr::bad_params("date must be a string or null"))?;
            state.selected_date = Some(state.window.select(raw)?);
        }
    }
    Ok(window_json(state))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let res = match req.method.as_str() {
        "calendar.window" | "calendar.select" => {
            if let Some(resp) = require_session(state, req) {
                return Some(resp);
            }
            if req.method == "calendar.window" {
                Ok(window_json(state))
            } else {
                handle_select(state, req)
            }
        }
        _ => return None,
    };
    Some(match res {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
