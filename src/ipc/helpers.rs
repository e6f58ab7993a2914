use crate::ipc::error::{err, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde::de::DeserializeOwned;

/// Error response for dashboard methods called before `auth.login`.
pub fn require_session(state: &AppState, req: &Request) -> Option<serde_json::Value> {
    if state.gate.is_authenticated() {
        return None;
    }
    Some(err(&req.id, "unauthenticated", "log in first", None))
}

/// Deserializes `params`, treating an absent object as `{}`.
pub fn parse_params<T: DeserializeOwned>(req: &Request) -> Result<T, HandlerErr> {
    let raw = if req.params.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        req.params.clone()
    };
    serde_json::from_value(raw).map_err(|e| HandlerErr::bad_params(e.to_string()))
}

pub fn require_str<'a>(req: &'a Request, key: &str) -> Result<&'a str, HandlerErr> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing {key}")))
}

/// Optional positive integer; zero and non-integers are rejected.
pub fn positive_usize(req: &Request, key: &str) -> Result<Option<usize>, HandlerErr> {
    match req.params.get(key) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => match v.as_u64() {
            Some(n) if n >= 1 => Ok(Some(n as usize)),
            _ => Err(HandlerErr::bad_params(format!(
                "{key} must be a positive integer"
            ))),
        },
    }
}
