//! In-memory kill records and their persisted JSON shape.

use chrono::NaiveDateTime;
use hashbrown::HashMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use super::StoreError;
use crate::game_data::{BossDefinition, catalogue};
use crate::respawn::{RespawnStatus, compute_status, format_stored_timestamp};

/// Last recorded kill of one catalogue boss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillRecord {
    pub boss_name: &'static str,
    pub respawn_minutes: u32,
    /// Stored text, kept verbatim so a corrupt value can be shown back
    pub last_killed: Option<String>,
}

impl KillRecord {
    fn unrecorded(boss: BossDefinition) -> Self {
        Self {
            boss_name: boss.name,
            respawn_minutes: boss.respawn_minutes,
            last_killed: None,
        }
    }

    pub fn status(&self, now: NaiveDateTime) -> RespawnStatus {
        compute_status(self.last_killed.as_deref(), self.respawn_minutes, now)
    }
}

/// Kill records for the whole catalogue, in catalogue order.
///
/// The key set always equals the catalogue: there is no way to add or remove
/// a boss, only to set or clear its timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    records: Vec<KillRecord>,
}

impl Default for RecordSet {
    fn default() -> Self {
        Self::defaults()
    }
}

impl RecordSet {
    /// Every boss unrecorded.
    pub fn defaults() -> Self {
        Self {
            records: catalogue().map(KillRecord::unrecorded).collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KillRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&KillRecord> {
        self.records.iter().find(|r| r.boss_name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut KillRecord, StoreError> {
        self.records
            .iter_mut()
            .find(|r| r.boss_name == name)
            .ok_or_else(|| StoreError::UnknownBoss {
                name: name.to_string(),
            })
    }

    /// Overwrite the kill time of one boss (second precision).
    pub fn record_kill(&mut self, name: &str, at: NaiveDateTime) -> Result<(), StoreError> {
        self.get_mut(name)?.last_killed = Some(format_stored_timestamp(at));
        Ok(())
    }

    /// Forget the kill time of one boss.
    pub fn clear(&mut self, name: &str) -> Result<(), StoreError> {
        self.get_mut(name)?.last_killed = None;
        Ok(())
    }

    pub fn clear_all(&mut self) {
        for record in &mut self.records {
            record.last_killed = None;
        }
    }

    /// Count of bosses with any stored timestamp, readable or not
    pub fn recorded_count(&self) -> usize {
        self.records.iter().filter(|r| r.last_killed.is_some()).count()
    }

    /// Build from a decoded file, normalising the key set to the catalogue.
    pub(crate) fn from_stored(mut stored: HashMap<String, StoredEntry>) -> Normalized {
        let mut missing = Vec::new();
        let mut records = Vec::with_capacity(stored.len());

        for boss in catalogue() {
            let mut record = KillRecord::unrecorded(boss);
            match stored.remove(boss.name) {
                Some(entry) => {
                    check_stored_interval(boss, entry.respawn_minutes.as_ref());
                    record.last_killed = entry.last_killed.and_then(raw_timestamp);
                }
                None => missing.push(boss.name.to_string()),
            }
            records.push(record);
        }

        let mut unknown: Vec<String> = stored.into_keys().collect();
        unknown.sort();

        Normalized {
            records: Self { records },
            unknown,
            missing,
        }
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a KillRecord;
    type IntoIter = std::slice::Iter<'a, KillRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Result of reconciling a stored mapping with the catalogue.
pub(crate) struct Normalized {
    pub records: RecordSet,
    /// Stored names not in the catalogue (dropped)
    pub unknown: Vec<String>,
    /// Catalogue names absent from storage (filled unrecorded)
    pub missing: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Persisted Shape
// ─────────────────────────────────────────────────────────────────────────────

/// One value of the persisted `{name: {respawn_minutes, last_killed}}` map.
///
/// Fields are decoded loosely so one bad value only affects its own record.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StoredEntry {
    #[serde(default)]
    pub respawn_minutes: Option<Value>,
    #[serde(default)]
    pub last_killed: Option<Value>,
}

/// Stored kill time as text. Non-string values keep their JSON text so the
/// record reads as corrupt instead of unrecorded.
fn raw_timestamp(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// The catalogue interval always wins; anything else stored is only logged.
fn check_stored_interval(boss: BossDefinition, stored: Option<&Value>) {
    let Some(stored) = stored.filter(|v| !v.is_null()) else {
        return;
    };
    match stored.as_u64().filter(|m| *m > 0) {
        Some(minutes) if minutes == u64::from(boss.respawn_minutes) => {}
        Some(minutes) => tracing::warn!(
            boss = boss.name,
            stored = minutes,
            catalogue = boss.respawn_minutes,
            "Stored respawn interval differs from catalogue, using catalogue"
        ),
        None => tracing::warn!(
            boss = boss.name,
            stored = %stored,
            catalogue = boss.respawn_minutes,
            "Stored respawn interval is invalid, using catalogue"
        ),
    }
}

#[derive(Serialize)]
struct StoredEntryRef<'a> {
    respawn_minutes: u32,
    last_killed: Option<&'a str>,
}

/// Serialises as a JSON object in catalogue order.
impl Serialize for RecordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(
                record.boss_name,
                &StoredEntryRef {
                    respawn_minutes: record.respawn_minutes,
                    last_killed: record.last_killed.as_deref(),
                },
            )?;
        }
        map.end()
    }
}
