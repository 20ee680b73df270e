//! Record store: one JSON file mapping each boss to its last kill.
//!
//! File layout:
//!
//! ```text
//! {
//!   "佩爾利斯": { "respawn_minutes": 120, "last_killed": "2025-08-11T16:30:00" },
//!   "巴實那":   { "respawn_minutes": 150, "last_killed": null },
//!   ...
//! }
//! ```
//!
//! `last_killed` is local wall-clock time, second precision, no zone.
//! Loading always yields the full catalogue key set.

mod error;
mod file_store;
mod records;

pub use error::StoreError;
pub use file_store::{
    LoadOutcome, Loaded, RecordStore, backup_filename, export_json, write_backup,
};
pub use records::{KillRecord, RecordSet};

#[cfg(test)]
mod store_tests;
