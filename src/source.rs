use crate::model::StudentRow;
use crate::store::{LoadReport, RecordStore};
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

const BUNDLED_DATASET: &str = include_str!("../data/fallback_students.json");

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(u16),
    #[error("malformed body: {0}")]
    Body(#[from] serde_json::Error),
}

/// Where the initial records come from.
pub trait StudentSource {
    fn describe(&self) -> String;
    fn fetch(&self) -> Result<Vec<StudentRow>, DataLoadError>;
}

/// `GET <url>` returning a JSON array of student rows. One attempt, no retry.
pub struct HttpSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        let client = builder.build().context("failed to build http client")?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

impl StudentSource for HttpSource {
    fn describe(&self) -> String {
        format!("GET {}", self.url)
    }

    fn fetch(&self) -> Result<Vec<StudentRow>, DataLoadError> {
        let resp = self.client.get(&self.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataLoadError::Status(status.as_u16()));
        }
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Rows parsed up front: the bundled dataset or a configured file.
#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    rows: Vec<StudentRow>,
}

impl StaticSource {
    pub fn bundled() -> anyhow::Result<Self> {
        let rows = serde_json::from_str(BUNDLED_DATASET)
            .context("bundled fallback dataset is malformed")?;
        Ok(Self {
            label: "bundled dataset".to_string(),
            rows,
        })
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fallback file {}", path.display()))?;
        let rows = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse fallback file {}", path.display()))?;
        Ok(Self {
            label: path.display().to_string(),
            rows,
        })
    }
}

impl StudentSource for StaticSource {
    fn describe(&self) -> String {
        self.label.clone()
    }

    fn fetch(&self) -> Result<Vec<StudentRow>, DataLoadError> {
        Ok(self.rows.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DataOrigin {
    Remote,
    Fallback,
}

pub struct InitialLoad {
    pub store: RecordStore,
    pub origin: DataOrigin,
    pub report: LoadReport,
    /// Why the remote source was not used, if it was tried.
    pub load_error: Option<String>,
}

/// Tries `primary` once and falls back to `fallback` on any failure. Never
/// fails itself.
pub fn load_initial(primary: Option<&dyn StudentSource>, fallback: &StaticSource) -> InitialLoad {
    let mut load_error = None;
    if let Some(src) = primary {
        match src.fetch() {
            Ok(rows) => {
                let (store, report) = RecordStore::from_rows(rows);
                log::info!(
                    "loaded {} students from {} ({} skipped)",
                    report.loaded,
                    src.describe(),
                    report.skipped
                );
                return InitialLoad {
                    store,
                    origin: DataOrigin::Remote,
                    report,
                    load_error: None,
                };
            }
            Err(e) => {
                log::warn!("{} failed, using {}: {e}", src.describe(), fallback.describe());
                load_error = Some(e.to_string());
            }
        }
    }

    let (store, report) = RecordStore::from_rows(fallback.rows.clone());
    log::info!(
        "loaded {} students from {} ({} skipped)",
        report.loaded,
        fallback.describe(),
        report.skipped
    );
    InitialLoad {
        store,
        origin: DataOrigin::Fallback,
        report,
        load_error,
    }
}
