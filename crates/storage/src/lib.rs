use std::{
    fs, io,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use vacancy_hub_core::{CanonicalVacancy, Projection, StoredEntry};

const INDENT: &[u8] = b"    ";

/// Deduplicated collection of saved vacancies backed by a single JSON file.
///
/// Entries are unique by title (exact, case-sensitive). The file holds a JSON
/// array of [`StoredEntry`] values.
#[derive(Debug)]
pub struct VacancyStore {
    path: PathBuf,
    entries: Vec<StoredEntry>,
}

impl VacancyStore {
    /// Opens the store at `path`, loading any existing entries.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.into(),
            entries: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries as of the last load or write.
    pub fn entries(&self) -> &[StoredEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_title(&self, title: &str) -> bool {
        self.entries.iter().any(|entry| entry.title == title)
    }

    /// Replaces the in-memory entries with the file contents.
    ///
    /// A missing or blank file yields an empty store; malformed JSON is an error.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    stage = "store",
                    path = %self.path.display(),
                    "store file missing, starting empty"
                );
                self.entries.clear();
                return Ok(());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            self.entries.clear();
            return Ok(());
        }

        self.entries = serde_json::from_str(&content).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            stage = "store",
            path = %self.path.display(),
            entries = self.entries.len(),
            "store loaded"
        );
        Ok(())
    }

    /// Saves the vacancy unless an entry with the same title exists.
    ///
    /// The file is re-read first so edits made since the last load are kept.
    pub fn add(&mut self, vacancy: &CanonicalVacancy) -> Result<AddOutcome, StoreError> {
        self.add_at(vacancy, Utc::now())
    }

    /// Same as [`VacancyStore::add`] with an explicit save timestamp.
    pub fn add_at(
        &mut self,
        vacancy: &CanonicalVacancy,
        saved_at: DateTime<Utc>,
    ) -> Result<AddOutcome, StoreError> {
        self.load()?;
        if self.contains_title(&vacancy.title) {
            debug!(stage = "store", title = %vacancy.title, "duplicate title skipped");
            return Ok(AddOutcome::Duplicate);
        }

        let mut entries = self.entries.clone();
        entries.push(Projection::stored_entry(vacancy, saved_at));
        self.write_entries(&entries)?;
        self.entries = entries;
        info!(
            stage = "store",
            title = %vacancy.title,
            entries = self.entries.len(),
            "vacancy saved"
        );
        Ok(AddOutcome::Inserted)
    }

    /// Returns stored vacancies whose salary metric is at least `min_salary`.
    pub fn by_min_salary(&self, min_salary: f64) -> Vec<CanonicalVacancy> {
        self.entries
            .iter()
            .map(Projection::vacancy)
            .filter(|vacancy| vacancy.salary_metric() >= min_salary)
            .collect()
    }

    /// Removes every entry with the given title and writes the file.
    ///
    /// Returns the number of removed entries.
    pub fn delete(&mut self, title: &str) -> Result<usize, StoreError> {
        let kept: Vec<StoredEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.title != title)
            .cloned()
            .collect();
        let removed = self.entries.len() - kept.len();
        self.write_entries(&kept)?;
        self.entries = kept;
        info!(stage = "store", %title, removed, "vacancies deleted");
        Ok(removed)
    }

    /// Writes all entries to the file, replacing it atomically.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.write_entries(&self.entries)
    }

    /// Replaces the file with `entries`. An existing file keeps its permissions.
    fn write_entries(&self, entries: &[StoredEntry]) -> Result<(), StoreError> {
        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&directory).map_err(|source| self.write_error(source))?;

        let mut temp =
            NamedTempFile::new_in(&directory).map_err(|source| self.write_error(source))?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            let mut serializer =
                Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(INDENT));
            entries
                .serialize(&mut serializer)
                .map_err(StoreError::Encode)?;
            writer
                .write_all(b"\n")
                .and_then(|_| writer.flush())
                .map_err(|source| self.write_error(source))?;
        }

        match fs::metadata(&self.path) {
            Ok(metadata) => temp
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|source| self.write_error(source))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => return Err(self.write_error(source)),
        }

        temp.persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;
        Ok(())
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

/// Result of attempting to add a vacancy to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Duplicate,
}

impl AddOutcome {
    /// Returns `true` when the add was skipped because the title already exists.
    pub fn is_duplicate(self) -> bool {
        matches!(self, Self::Duplicate)
    }
}

/// Errors raised while reading or writing the store file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("store file {} is not a valid vacancy list: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode store entries: {0}")]
    Encode(serde_json::Error),
    #[error("failed to write store file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}
