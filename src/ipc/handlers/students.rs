use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::{parse_params, positive_usize, require_session, require_str};
use crate::ipc::types::{AppState, Request};
use crate::model::StudentPatch;
use crate::store::StoreError;
use crate::view::order::{SortDirection, SortKey, SortState};
use crate::view::{self, ViewQuery};
use serde::Deserialize;
use serde_json::json;

const SAVED_NOTICE: &str = "Record saved successfully!";

#[derive(Deserialize)]
struct SortParam {
    key: String,
    #[serde(default)]
    direction: Option<String>,
}

#[derive(Deserialize)]
struct ListParams {
    #[serde(default)]
    search: String,
    #[serde(default)]
    sort: Option<SortParam>,
}

#[derive(Deserialize)]
struct UpdateParams {
    id: String,
    patch: StudentPatch,
}

#[derive(Deserialize)]
struct UpsertParams {
    #[serde(default)]
    id: Option<String>,
    patch: StudentPatch,
}

fn parse_sort(raw: Option<SortParam>) -> Result<Option<SortState>, HandlerErr> {
    let Some(p) = raw else {
        return Ok(None);
    };
    let key = SortKey::parse(&p.key)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown sort key: {}", p.key)))?;
    let direction = match p.direction.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("asc") | Some("ascending") => SortDirection::Asc,
        Some("desc") | Some("descending") => SortDirection::Desc,
        Some(other) => {
            return Err(HandlerErr::bad_params(format!(
                "sort direction must be asc or desc, got {other}"
            )))
        }
    };
    Ok(Some(SortState { key, direction }))
}

// Stateless: the caller supplies the whole view query.
fn handle_list(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let params: ListParams = parse_params(req)?;
    let sort = parse_sort(params.sort)?;
    let page = positive_usize(req, "page")?.unwrap_or(1);
    let page_size = positive_usize(req, "pageSize")?.unwrap_or(state.page_size);

    let view = view::compute(
        &state.store,
        &ViewQuery {
            search: params.search.trim().to_string(),
            sort,
            page,
            page_size,
        },
    );
    Ok(json!(view))
}

fn handle_get(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let id = require_str(req, "id")?;
    let Some(student) = state.store.get(id) else {
        return Err(StoreError::NotFound(id.to_string()).into());
    };
    Ok(json!({ "student": student }))
}

fn upsert(
    state: &mut AppState,
    id: Option<&str>,
    patch: StudentPatch,
) -> Result<serde_json::Value, HandlerErr> {
    let student = state.store.upsert(id, patch)?;
    let view = state.table.render(&state.store);
    Ok(json!({
        "student": student,
        "notice": SAVED_NOTICE,
        "view": view,
    }))
}

fn handle_create(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let patch: StudentPatch = parse_params(req)?;
    upsert(state, None, patch)
}

fn handle_update(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let params: UpdateParams = parse_params(req)?;
    upsert(state, Some(&params.id), params.patch)
}

fn handle_upsert(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let params: UpsertParams = parse_params(req)?;
    let id = params.id.as_deref().map(str::trim).filter(|s| !s.is_empty());
    upsert(state, id, params.patch)
}

fn handle_delete(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let id = require_str(req, "id")?;
    let removed = state.store.remove(id)?;
    let view = state.table.render(&state.store);
    Ok(json!({ "removedId": removed.id, "view": view }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let handler: fn(&mut AppState, &Request) -> Result<serde_json::Value, HandlerErr> =
        match req.method.as_str() {
            "students.list" => handle_list,
            "students.get" => handle_get,
            "students.create" => handle_create,
            "students.update" => handle_update,
            "students.upsert" => handle_upsert,
            "students.delete" => handle_delete,
            _ => return None,
        };
    if let Some(resp) = require_session(state, req) {
        return Some(resp);
    }
    Some(match handler(state, req) {
        Ok(v) => ok(&req.id, v),
        Err(e) => {
            log::debug!("{} rejected: {}", req.method, e.message);
            e.response(&req.id)
        }
    })
}
