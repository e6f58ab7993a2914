use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::{positive_usize, require_session};
use crate::ipc::types::{AppState, Request};
use crate::view::order::SortKey;
use serde_json::json;

// These methods drive the held table state; every reply is a fresh render.

fn handle_view(_state: &mut AppState, _req: &Request) -> Result<(), HandlerErr> {
    Ok(())
}

fn handle_search(state: &mut AppState, req: &Request) -> Result<(), HandlerErr> {
    let term = match req.params.get("term") {
        None | Some(serde_json::Value::Null) => "",
        Some(v) => v
            .as_str()
            .ok_or_else(|| HandlerErr::bad_params("term must be a string"))?,
    };
    state.table.set_search(term);
    Ok(())
}

fn handle_sort(state: &mut AppState, req: &Request) -> Result<(), HandlerErr> {
    match req.params.get("key") {
        None | Some(serde_json::Value::Null) => state.table.clear_sort(),
        Some(v) => {
            let raw = v
                .as_str()
                .ok_or_else(|| HandlerErr::bad_params("key must be a string"))?;
            let key = SortKey::parse(raw)
                .ok_or_else(|| HandlerErr::bad_params(format!("unknown sort key: {raw}")))?;
            state.table.click_sort(key);
        }
    }
    Ok(())
}

fn handle_page(state: &mut AppState, req: &Request) -> Result<(), HandlerErr> {
    if let Some(page) = positive_usize(req, "page")? {
        state.table.set_page(page);
        return Ok(());
    }
    match req.params.get("action").and_then(|v| v.as_str()) {
        Some("next") => state.table.next_page(),
        Some("prev") => state.table.prev_page(),
        Some("first") => state.table.set_page(1),
        Some(other) => {
            return Err(HandlerErr {
                code: "bad_params",
                message: "action must be one of: next, prev, first".to_string(),
                details: Some(json!({ "action": other })),
            })
        }
        None => return Err(HandlerErr::bad_params("missing page or action")),
    }
    Ok(())
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let handler: fn(&mut AppState, &Request) -> Result<(), HandlerErr> = match req.method.as_str()
    {
        "table.view" => handle_view,
        "table.search" => handle_search,
        "table.sort" => handle_sort,
        "table.page" => handle_page,
        _ => return None,
    };
    if let Some(resp) = require_session(state, req) {
        return Some(resp);
    }
    Some(match handler(state, req) {
        Ok(()) => {
            let view = state.table.render(&state.store);
            ok(&req.id, json!(view))
        }
        Err(e) => e.response(&req.id),
    })
}
