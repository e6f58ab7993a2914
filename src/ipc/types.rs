use crate::auth::LoginGate;
use crate::calendar::DateWindow;
use crate::config::Config;
use crate::source::{DataOrigin, InitialLoad};
use crate::store::RecordStore;
use crate::view::TableState;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything the sidecar holds for one session. Owned by the stdin loop.
pub struct AppState {
    pub store: RecordStore,
    pub gate: LoginGate,
    pub table: TableState,
    pub window: DateWindow,
    pub selected_date: Option<NaiveDate>,
    pub origin: DataOrigin,
    pub load_error: Option<String>,
    pub skipped_rows: usize,
    pub page_size: usize,
}

impl AppState {
    pub fn new(config: &Config, loaded: InitialLoad) -> Self {
        Self {
            store: loaded.store,
            gate: LoginGate::new(),
            table: TableState::new(config.page_size),
            window: config.window,
            selected_date: None,
            origin: loaded.origin,
            load_error: loaded.load_error,
            skipped_rows: loaded.report.skipped,
            page_size: config.page_size,
        }
    }
}
