//! Board view model
//!
//! Turns a record set into the ordered, numbered rows a presentation layer
//! draws, plus summary counts. Pure: `now` is passed in.

use chrono::NaiveDateTime;

use crate::game_data::format_interval;
use crate::respawn::{RespawnStatus, StatusKind, parse_stored_timestamp};
use crate::store::{KillRecord, RecordSet};

/// Short timestamp used in table cells
const CELL_FORMAT: &str = "%m/%d %H:%M";
/// Full timestamp used on the boss card
const CARD_FORMAT: &str = "%Y/%m/%d %H:%M";

/// One line of the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    /// 1-based position after sorting by interval
    pub number: usize,
    pub name: &'static str,
    pub respawn_minutes: u32,
    pub interval: String,
    pub last_killed: String,
    pub respawn_at: String,
    pub status: RespawnStatus,
}

impl BoardRow {
    fn new(number: usize, record: &KillRecord, now: NaiveDateTime) -> Self {
        let status = record.status(now);
        let (last_killed, respawn_at) = match &status {
            RespawnStatus::Unrecorded => ("not killed".to_string(), "awaiting kill".to_string()),
            RespawnStatus::Ready {
                killed_at,
                respawn_at,
            }
            | RespawnStatus::Pending {
                killed_at,
                respawn_at,
                ..
            } => (
                killed_at.format(CELL_FORMAT).to_string(),
                respawn_at.format(CELL_FORMAT).to_string(),
            ),
            RespawnStatus::Corrupted { .. } => ("error".to_string(), "error".to_string()),
        };

        Self {
            number,
            name: record.boss_name,
            respawn_minutes: record.respawn_minutes,
            interval: format_interval(record.respawn_minutes),
            last_killed,
            respawn_at,
            status,
        }
    }

    /// Zero-padded number as shown in the table ("01", "02", ...)
    pub fn number_label(&self) -> String {
        format!("{:02}", self.number)
    }
}

/// Status counts across the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub ready: usize,
    pub pending: usize,
    pub unrecorded: usize,
    pub corrupted: usize,
}

impl Summary {
    fn add(&mut self, kind: StatusKind) {
        self.total += 1;
        match kind {
            StatusKind::Ready => self.ready += 1,
            StatusKind::Pending => self.pending += 1,
            StatusKind::Unrecorded => self.unrecorded += 1,
            StatusKind::Corrupted => self.corrupted += 1,
        }
    }
}

/// All bosses sorted by respawn interval, shortest first.
#[derive(Debug, Clone)]
pub struct Board {
    rows: Vec<BoardRow>,
    summary: Summary,
}

impl Board {
    pub fn build(records: &RecordSet, now: NaiveDateTime) -> Self {
        let mut sorted: Vec<&KillRecord> = records.iter().collect();
        // Stable: equal intervals keep catalogue order
        sorted.sort_by_key(|r| r.respawn_minutes);

        let mut summary = Summary::default();
        let rows = sorted
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let row = BoardRow::new(idx + 1, record, now);
                summary.add(row.status.kind());
                row
            })
            .collect();

        Self { rows, summary }
    }

    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    /// Rows whose stored timestamp could not be read
    pub fn corrupted(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows
            .iter()
            .filter(|r| r.status.kind() == StatusKind::Corrupted)
    }

    /// Resolve user input to a boss: a board number ("7", "07") or an exact name.
    pub fn resolve(&self, input: &str) -> Option<&BoardRow> {
        let input = input.trim();
        match BossSelector::parse(input) {
            BossSelector::Number(n) => self.rows.iter().find(|r| r.number == n),
            BossSelector::Name(name) => self.rows.iter().find(|r| r.name == name),
        }
    }
}

/// How a user referred to a boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossSelector<'a> {
    Number(usize),
    Name(&'a str),
}

impl<'a> BossSelector<'a> {
    pub fn parse(input: &'a str) -> Self {
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            // All digits, so only overflow can fail; no board is that long
            input
                .parse()
                .map(BossSelector::Number)
                .unwrap_or(BossSelector::Number(0))
        } else {
            BossSelector::Name(input)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Boss Card
// ─────────────────────────────────────────────────────────────────────────────

/// Detail view of a single boss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossCard {
    pub name: &'static str,
    pub interval: String,
    /// "YYYY/MM/DD HH:MM", "no record", or a corrupt marker with the raw value
    pub current_record: String,
    pub status: RespawnStatus,
}

impl BossCard {
    pub fn new(record: &KillRecord, now: NaiveDateTime) -> Self {
        let current_record = match record.last_killed.as_deref() {
            None => "no record".to_string(),
            Some(raw) => match parse_stored_timestamp(raw) {
                Some(ts) => ts.format(CARD_FORMAT).to_string(),
                None => format!("format error ({raw})"),
            },
        };

        Self {
            name: record.boss_name,
            interval: format_interval(record.respawn_minutes),
            current_record,
            status: record.status(now),
        }
    }
}
