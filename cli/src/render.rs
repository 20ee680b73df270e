//! Plain-text rendering of the board, boss cards and load notices.
//!
//! Everything returns a `String` so output can be checked in tests. The boss
//! name is the last column since CJK names are double width and would break
//! padding.

use std::fmt::Write;

use chrono::NaiveDateTime;
use respawn_core::board::{Board, BoardRow, BossCard, Summary};
use respawn_core::respawn::RespawnStatus;
use respawn_core::store::LoadOutcome;

fn row_line(row: &BoardRow) -> String {
    format!(
        "{:<4} {:<8} {:<12} {:<13} {:<10} {}",
        row.number_label(),
        row.interval,
        row.last_killed,
        row.respawn_at,
        row.status.label(),
        row.name
    )
}

pub fn summary_line(summary: &Summary) -> String {
    let mut line = format!(
        "Total {} | Ready {} | Pending {} | Unrecorded {}",
        summary.total, summary.ready, summary.pending, summary.unrecorded
    );
    if summary.corrupted > 0 {
        let _ = write!(line, " | Corrupt {}", summary.corrupted);
    }
    line
}

/// Full board: clock, summary, table, then any corrupt records with their raw value.
pub fn board(board: &Board, now: NaiveDateTime) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Now: {}", now.format("%Y/%m/%d %H:%M:%S"));
    let _ = writeln!(out, "{}", summary_line(&board.summary()));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<4} {:<8} {:<12} {:<13} {:<10} Boss",
        "No", "Respawn", "Last kill", "Next spawn", "Status"
    );
    let _ = writeln!(out, "{}", "-".repeat(64));

    for row in board.rows() {
        let _ = writeln!(out, "{}", row_line(row));
    }

    let corrupted: Vec<_> = board.corrupted().collect();
    if !corrupted.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Unreadable kill times (fix with `kill` or `clear`):");
        for row in corrupted {
            if let RespawnStatus::Corrupted { raw } = &row.status {
                let _ = writeln!(out, "  {} {}: {:?}", row.number_label(), row.name, raw);
            }
        }
    }
    out
}

pub fn card(card: &BossCard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", card.name);
    let _ = writeln!(
        out,
        "  Respawn: {} | Current record: {}",
        card.interval, card.current_record
    );
    let status = match &card.status {
        RespawnStatus::Ready { respawn_at, .. } => {
            format!("ready since {}", respawn_at.format("%m/%d %H:%M"))
        }
        RespawnStatus::Pending {
            respawn_at,
            remaining,
            ..
        } => format!(
            "respawns {} (in {remaining})",
            respawn_at.format("%m/%d %H:%M")
        ),
        RespawnStatus::Unrecorded => "no kill recorded".to_string(),
        RespawnStatus::Corrupted { raw } => format!("stored kill time unreadable: {raw:?}"),
    };
    let _ = writeln!(out, "  Status: {status}");
    out
}

/// Message for a load that did not simply read the file, if any.
pub fn load_notice(outcome: &LoadOutcome) -> Option<String> {
    match outcome {
        LoadOutcome::Loaded { unknown, .. } if !unknown.is_empty() => Some(format!(
            "Note: ignored records for unknown bosses: {}",
            unknown.join(", ")
        )),
        LoadOutcome::Loaded { .. } | LoadOutcome::MissingUsedDefaults => None,
        LoadOutcome::UnreadableFellBackToDefaults { reason } => Some(format!(
            "Warning: record file could not be read ({reason}); showing empty board"
        )),
        LoadOutcome::CorruptFellBackToDefaults { reason } => Some(format!(
            "Warning: record file is corrupt ({reason}); showing empty board. \
             The next save will overwrite it, take a backup first if needed"
        )),
    }
}
