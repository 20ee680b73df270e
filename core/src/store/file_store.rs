//! JSON file backing for the record set.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use hashbrown::HashMap;
use tempfile::NamedTempFile;

use super::records::{RecordSet, StoredEntry};
use super::StoreError;

/// How a [`RecordStore::load`] arrived at its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File read and decoded. Names outside the catalogue were dropped and
    /// catalogue names absent from the file were filled unrecorded.
    Loaded {
        unknown: Vec<String>,
        missing: Vec<String>,
    },
    /// No file yet (or an empty one); first run.
    MissingUsedDefaults,
    /// File exists but could not be read.
    UnreadableFellBackToDefaults { reason: String },
    /// File read but is not a valid record mapping.
    CorruptFellBackToDefaults { reason: String },
}

impl LoadOutcome {
    /// True when the records came from the file rather than defaults
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// Records plus how they were obtained.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub records: RecordSet,
    pub outcome: LoadOutcome,
}

impl Loaded {
    fn defaults(outcome: LoadOutcome) -> Self {
        Self {
            records: RecordSet::defaults(),
            outcome,
        }
    }
}

/// File-backed store shared by every user of the tracker.
///
/// There is no locking. Two writers racing on [`save`](Self::save) each
/// replace the whole file and the last rename wins; the other update is lost.
/// Callers reload before each mutation to keep that window short.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the record file. Never fails: any problem yields defaults and a
    /// tagged outcome explaining why.
    pub fn load(&self) -> Loaded {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No record file, using defaults");
                return Loaded::defaults(LoadOutcome::MissingUsedDefaults);
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Record file unreadable, using defaults"
                );
                return Loaded::defaults(LoadOutcome::UnreadableFellBackToDefaults {
                    reason: e.to_string(),
                });
            }
        };

        if content.trim().is_empty() {
            tracing::info!(path = %self.path.display(), "Record file empty, using defaults");
            return Loaded::defaults(LoadOutcome::MissingUsedDefaults);
        }

        let stored: HashMap<String, StoredEntry> = match serde_json::from_str(&content) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Record file corrupt, using defaults"
                );
                return Loaded::defaults(LoadOutcome::CorruptFellBackToDefaults {
                    reason: e.to_string(),
                });
            }
        };

        let normalized = RecordSet::from_stored(stored);
        if !normalized.unknown.is_empty() {
            tracing::warn!(
                path = %self.path.display(),
                unknown = ?normalized.unknown,
                "Dropped records for bosses not in the catalogue"
            );
        }
        if !normalized.missing.is_empty() {
            tracing::debug!(
                count = normalized.missing.len(),
                "Filled missing catalogue bosses as unrecorded"
            );
        }

        Loaded {
            records: normalized.records,
            outcome: LoadOutcome::Loaded {
                unknown: normalized.unknown,
                missing: normalized.missing,
            },
        }
    }

    /// Replace the record file with `records`.
    ///
    /// Written to a temporary file in the same directory and renamed over the
    /// target, so readers see either the old or the new mapping in full.
    pub fn save(&self, records: &RecordSet) -> Result<(), StoreError> {
        let json = export_json(records)?;
        write_atomic(&self.path, json.as_bytes())?;
        tracing::debug!(
            path = %self.path.display(),
            recorded = records.recorded_count(),
            "Saved records"
        );
        Ok(())
    }

    /// Forget every kill and persist the empty set.
    pub fn reset_to_defaults(&self) -> Result<RecordSet, StoreError> {
        let records = RecordSet::defaults();
        self.save(&records)?;
        tracing::info!(path = %self.path.display(), "Reset all records");
        Ok(records)
    }
}

/// Full dump in the persisted format (pretty JSON, names unescaped).
pub fn export_json(records: &RecordSet) -> Result<String, StoreError> {
    serde_json::to_string_pretty(records).map_err(StoreError::Serialize)
}

/// File name for a point-in-time backup taken at `now`.
pub fn backup_filename(now: NaiveDateTime) -> String {
    format!("boss_backup_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Write an export of `records` into `dir`. Returns the file written.
pub fn write_backup(
    records: &RecordSet,
    dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf, StoreError> {
    let path = dir.join(backup_filename(now));
    let json = export_json(records)?;
    write_atomic(&path, json.as_bytes())?;
    tracing::info!(path = %path.display(), "Wrote backup");
    Ok(path)
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|source| StoreError::CreateTemp {
        path: dir.to_path_buf(),
        source,
    })?;

    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    tmp.persist(path).map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
