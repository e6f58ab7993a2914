use crate::ipc::error::{ok, HandlerErr};
use crate::ipc::helpers::parse_params;
use crate::ipc::types::{AppState, Request};
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
struct LoginParams {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

fn status(state: &AppState) -> serde_json::Value {
    json!({
        "authenticated": state.gate.is_authenticated(),
        "username": state.gate.username(),
    })
}

fn handle_login(state: &mut AppState, req: &Request) -> Result<serde_json::Value, HandlerErr> {
    let params: LoginParams = parse_params(req)?;
    let username = state.gate.login(&params.username, &params.password)?;
    log::info!("session opened for {username}");
    Ok(status(state))
}

fn handle_logout(state: &mut AppState) -> serde_json::Value {
    if let Some(name) = state.gate.username() {
        log::info!("session closed for {name}");
    }
    state.gate.logout();
    state.table.reset();
    state.selected_date = None;
    status(state)
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let res = match req.method.as_str() {
        "auth.login" => handle_login(state, req),
        "auth.logout" => Ok(handle_logout(state)),
        "auth.status" => Ok(status(state)),
        _ => return None,
    };
    Some(match res {
        Ok(v) => ok(&req.id, v),
        Err(e) => e.response(&req.id),
    })
}
