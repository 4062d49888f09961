use super::{
    append_unique, ensure_parent_dir, retain_except, StoreError, StoredRecord, VacancyStore,
};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Collection stored as a single pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Vec<StoredRecord> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unable to read vacancy file");
                return Vec::new();
            }
        };

        let entries: Vec<Value> = match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "vacancy file is not a valid JSON array; listing it as empty"
                );
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match StoredRecord::deserialize(entry) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(
                        path = %self.path.display(),
                        index,
                        error = %err,
                        "skipping unreadable vacancy record"
                    );
                    None
                }
            })
            .collect()
    }

    fn write(&self, records: &[StoredRecord]) -> Result<(), StoreError> {
        ensure_parent_dir(&self.path)?;

        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        records
            .serialize(&mut serializer)
            .map_err(|source| StoreError::Json {
                path: self.path.clone(),
                source,
            })?;
        buffer.push(b'\n');

        fs::write(&self.path, buffer).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "rewrote JSON vacancy file"
        );
        Ok(())
    }
}

impl VacancyStore for JsonFileStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn list(&self) -> Vec<StoredRecord> {
        self.read()
    }

    fn add(&self, record: StoredRecord) -> Result<bool, StoreError> {
        match append_unique(self.read(), record) {
            Some(records) => {
                self.write(&records)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let remaining = retain_except(self.read(), id);
        self.write(&remaining)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.write(&[])
    }
}
