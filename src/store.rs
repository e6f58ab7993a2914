use crate::error::ValidationError;
use crate::model::{StudentPatch, StudentRecord, StudentRow};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("student not found: {0}")]
    NotFound(String),
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// The authoritative, insertion-ordered collection of student records.
///
/// Derived views never write back here; every successful mutation bumps
/// `revision` so a caller can tell two snapshots apart.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
    issued_ids: HashSet<String>,
    revision: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from loaded rows. Rows that fail validation or repeat an
    /// earlier id are skipped and counted.
    pub fn from_rows(rows: Vec<StudentRow>) -> (Self, LoadReport) {
        let mut store = Self::new();
        let mut report = LoadReport::default();
        for (idx, row) in rows.into_iter().enumerate() {
            let id = match row.id.map(|s| s.trim().to_string()) {
                Some(id) if !id.is_empty() => {
                    if store.issued_ids.contains(&id) {
                        log::warn!("skipping row {idx}: duplicate id {id}");
                        report.skipped += 1;
                        continue;
                    }
                    id
                }
                _ => store.allocate_id(),
            };
            match row.fields.into_record(id) {
                Ok(rec) => {
                    store.issued_ids.insert(rec.id.clone());
                    store.records.push(rec);
                    report.loaded += 1;
                }
                Err(e) => {
                    log::warn!("skipping row {idx}: {e}");
                    report.skipped += 1;
                }
            }
        }
        (store, report)
    }

    pub fn all(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Creates a record when `id` is `None`, otherwise applies `patch` to the
    /// record with that id. On error the store is unchanged.
    pub fn upsert(
        &mut self,
        id: Option<&str>,
        patch: StudentPatch,
    ) -> Result<StudentRecord, StoreError> {
        match id {
            None => {
                let id = self.allocate_id();
                let rec = patch.into_record(id)?;
                self.issued_ids.insert(rec.id.clone());
                self.records.push(rec.clone());
                self.revision += 1;
                log::info!("created student {} ({})", rec.id, rec.name);
                Ok(rec)
            }
            Some(id) => {
                let Some(pos) = self.records.iter().position(|r| r.id == id) else {
                    return Err(StoreError::NotFound(id.to_string()));
                };
                let next = patch.applied_to(&self.records[pos])?;
                self.records[pos] = next.clone();
                self.revision += 1;
                log::info!("updated student {}", next.id);
                Ok(next)
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Result<StudentRecord, StoreError> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };
        // The id stays in `issued_ids` so it is never handed out again.
        let removed = self.records.remove(pos);
        self.revision += 1;
        log::info!("removed student {}", removed.id);
        Ok(removed)
    }

    fn allocate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.issued_ids.contains(&id) {
                return id;
            }
        }
    }
}
