use super::{
    append_unique, ensure_parent_dir, retain_except, StoreError, StoredRecord, VacancyStore,
};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Header written on every rewrite, including when no rows remain.
pub const CSV_COLUMNS: [&str; 5] = ["title", "url", "salary_from", "salary_to", "description"];

/// Collection stored as a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Vec<StoredRecord> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unable to read vacancy file");
                return Vec::new();
            }
        };

        let mut reader = csv::ReaderBuilder::new().from_reader(file);
        if let Err(err) = reader.headers() {
            warn!(
                path = %self.path.display(),
                error = %err,
                "vacancy file has no readable CSV header; listing it as empty"
            );
            return Vec::new();
        }

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<StoredRecord>().enumerate() {
            match result {
                Ok(record) => records.push(record),
                Err(err) if err.is_io_error() => {
                    warn!(
                        path = %self.path.display(),
                        error = %err,
                        "stopped reading vacancy file"
                    );
                    break;
                }
                Err(err) => {
                    warn!(
                        path = %self.path.display(),
                        row,
                        error = %err,
                        "skipping unreadable vacancy row"
                    );
                }
            }
        }
        records
    }

    fn write(&self, records: &[StoredRecord]) -> Result<(), StoreError> {
        ensure_parent_dir(&self.path)?;

        let csv_error = |source: csv::Error| StoreError::Csv {
            path: self.path.clone(),
            source,
        };
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)
            .map_err(csv_error)?;

        writer.write_record(CSV_COLUMNS).map_err(csv_error)?;
        for record in records {
            writer.serialize(record).map_err(csv_error)?;
        }
        writer.flush().map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            records = records.len(),
            "rewrote CSV vacancy file"
        );
        Ok(())
    }
}

impl VacancyStore for CsvFileStore {
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
