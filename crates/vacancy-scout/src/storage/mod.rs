//! File-backed vacancy collections.
//!
//! Every backend keeps the whole collection in a single file and rewrites it
//! on each mutation. Reads never fail: a missing or unparsable file lists as
//! an empty collection.

mod csv_file;
mod json_file;

pub use csv_file::CsvFileStore;
pub use json_file::JsonFileStore;

use crate::vacancies::domain::{Salary, Vacancy};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Flat on-disk form of a [`Vacancy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub salary_from: Salary,
    #[serde(default)]
    pub salary_to: Salary,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
}

impl StoredRecord {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            salary_from: Salary::ZERO,
            salary_to: Salary::ZERO,
            description: String::new(),
        }
    }

    /// Key used by `delete`: records are addressed by their listing URL.
    pub fn identity_key(&self) -> &str {
        &self.url
    }

    /// Key used by `add`: only a record equal in every field is a duplicate.
    pub fn is_duplicate(&self, other: &Self) -> bool {
        self == other
    }
}

impl From<&Vacancy> for StoredRecord {
    fn from(vacancy: &Vacancy) -> Self {
        vacancy.clone().into()
    }
}

impl From<Vacancy> for StoredRecord {
    fn from(vacancy: Vacancy) -> Self {
        let (title, url, salary_from, salary_to, description) = vacancy.into_parts();
        Self {
            title,
            url,
            salary_from,
            salary_to,
            description,
        }
    }
}

impl From<StoredRecord> for Vacancy {
    fn from(record: StoredRecord) -> Self {
        Vacancy::new(record.title, record.url)
            .with_salary(record.salary_from, record.salary_to)
            .with_description(record.description)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Capability set shared by every storage backend.
pub trait VacancyStore {
    fn location(&self) -> &Path;

    /// Lists every stored record in insertion order.
    fn list(&self) -> Vec<StoredRecord>;

    /// Appends `record` unless an identical record is already stored.
    /// Returns `true` when the file was rewritten with the new record.
    fn add(&self, record: StoredRecord) -> Result<bool, StoreError>;

    /// Removes every record whose URL equals `id`.
    fn delete(&self, id: &str) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}

/// Error enumeration for storage writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode JSON for {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode CSV for {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// File encodings understood by [`open_store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFormat {
    Json,
    Csv,
}

impl StoreFormat {
    /// Picks the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
        }
    }
}

pub fn open_store(format: StoreFormat, path: impl Into<PathBuf>) -> Box<dyn VacancyStore> {
    match format {
        StoreFormat::Json => Box::new(JsonFileStore::new(path)),
        StoreFormat::Csv => Box::new(CsvFileStore::new(path)),
    }
}

/// Applies the shared `add` rule, returning the new collection when it changed.
fn append_unique(
    mut records: Vec<StoredRecord>,
    record: StoredRecord,
) -> Option<Vec<StoredRecord>> {
    if records.iter().any(|existing| existing.is_duplicate(&record)) {
        return None;
    }
    records.push(record);
    Some(records)
}

fn retain_except(records: Vec<StoredRecord>, id: &str) -> Vec<StoredRecord> {
    records
        .into_iter()
        .filter(|record| record.identity_key() != id)
        .collect()
}

fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
