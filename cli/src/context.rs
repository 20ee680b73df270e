use respawn_core::context::{AppConfig, AppConfigExt};
use respawn_core::store::{LoadOutcome, RecordSet, RecordStore, StoreError};

/// Holds all state for the CLI session.
///
/// Records are re-read from the shared file before every view and mutation
/// so edits from other users show up. After a failed save the in-memory set
/// is marked unsaved and kept instead, until a save succeeds or the user
/// reloads explicitly.
pub struct CliContext {
    pub config: AppConfig,
    store: RecordStore,
    records: RecordSet,
    last_outcome: LoadOutcome,
    unsaved: bool,
}

impl CliContext {
    pub fn new(config: AppConfig) -> Self {
        let store = RecordStore::new(config.data_path());
        let loaded = store.load();
        Self {
            config,
            store,
            records: loaded.records,
            last_outcome: loaded.outcome,
            unsaved: false,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn last_outcome(&self) -> &LoadOutcome {
        &self.last_outcome
    }

    /// True while a mutation is held in memory after a failed save.
    pub fn has_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Point the session at another record file and load it.
    pub fn use_data_file(&mut self, path: String) {
        if path == self.config.data_file {
            return;
        }
        self.config.data_file = path;
        self.store = RecordStore::new(self.config.data_path());
        self.reload();
    }

    /// Re-read the shared file, discarding any unsaved changes.
    pub fn reload(&mut self) -> &LoadOutcome {
        let loaded = self.store.load();
        self.records = loaded.records;
        self.last_outcome = loaded.outcome;
        self.unsaved = false;
        &self.last_outcome
    }

    /// Re-read the shared file unless unsaved changes are pending.
    pub fn refresh(&mut self) {
        if !self.unsaved {
            self.reload();
        }
    }

    /// Apply `change` to the freshest records and persist the result.
    pub fn mutate<F>(&mut self, change: F) -> Result<(), String>
    where
        F: FnOnce(&mut RecordSet) -> Result<(), StoreError>,
    {
        self.refresh();
        change(&mut self.records).map_err(|e| e.to_string())?;
        self.unsaved = true;
        self.persist()
    }

    /// Write the in-memory records. Keeps them marked unsaved on failure.
    pub fn persist(&mut self) -> Result<(), String> {
        match self.store.save(&self.records) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %self.store.path().display(), error = ?e, "Save failed");
                Err(format!(
                    "Save failed: {e}. Changes are kept in memory; run `save` to retry.\n"
                ))
            }
        }
    }

    /// Replace everything with the all-unrecorded set on disk.
    pub fn reset(&mut self) -> Result<(), String> {
        self.records.clear_all();
        self.unsaved = true;
        let reset = self.store.reset_to_defaults().map_err(|e| {
            format!("Reset failed: {e}. Changes are kept in memory; run `save` to retry.\n")
        })?;
        self.records = reset;
        self.unsaved = false;
        Ok(())
    }
}
