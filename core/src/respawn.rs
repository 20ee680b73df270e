//! Respawn status calculation
//!
//! Everything here is a pure function of the kill timestamp, the boss
//! interval and an injected `now`. Nothing reads the wall clock.
//!
//! Stored timestamps are local wall-clock time with no zone.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

/// Layout used when writing a kill timestamp to storage.
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// ISO-8601 variants accepted when reading a stored timestamp back.
/// `%.f` also matches when the fractional part is absent.
const STORED_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Format a kill timestamp for storage (second precision).
pub fn format_stored_timestamp(ts: NaiveDateTime) -> String {
    ts.format(STORED_TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored kill timestamp.
///
/// Accepts `T` or space separators, optional seconds and fractional seconds,
/// a bare date (midnight), and RFC 3339 values with an offset, whose
/// wall-clock part is taken as written.
pub fn parse_stored_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    STORED_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

// ─────────────────────────────────────────────────────────────────────────────
// Status Types
// ─────────────────────────────────────────────────────────────────────────────

/// Time left until respawn, floored to whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Remaining {
    pub hours: i64,
    pub minutes: i64,
}

impl Remaining {
    /// Split a positive duration into hours and remainder minutes.
    /// Seconds are dropped, never rounded up.
    pub fn from_delta(delta: TimeDelta) -> Self {
        let total = delta.num_minutes().max(0);
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours > 0 {
            write!(f, "{}h{}m", self.hours, self.minutes)
        } else {
            write!(f, "{}m", self.minutes)
        }
    }
}

/// Derived state of one boss. Computed on every read, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespawnStatus {
    /// No kill has been logged
    Unrecorded,
    /// `now` is at or past the respawn instant
    Ready {
        killed_at: NaiveDateTime,
        respawn_at: NaiveDateTime,
    },
    /// `now` is before the respawn instant
    Pending {
        killed_at: NaiveDateTime,
        respawn_at: NaiveDateTime,
        remaining: Remaining,
    },
    /// A timestamp is stored but cannot be read. `raw` is the stored text.
    Corrupted { raw: String },
}

/// Fieldless discriminant of [`RespawnStatus`], for counting and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Unrecorded,
    Ready,
    Pending,
    Corrupted,
}

impl RespawnStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            RespawnStatus::Unrecorded => StatusKind::Unrecorded,
            RespawnStatus::Ready { .. } => StatusKind::Ready,
            RespawnStatus::Pending { .. } => StatusKind::Pending,
            RespawnStatus::Corrupted { .. } => StatusKind::Corrupted,
        }
    }

    /// Short status text for tables (e.g. "ready", "2h5m", "corrupt")
    pub fn label(&self) -> String {
        match self {
            RespawnStatus::Unrecorded => "unrecorded".to_string(),
            RespawnStatus::Ready { .. } => "ready".to_string(),
            RespawnStatus::Pending { remaining, .. } => remaining.to_string(),
            RespawnStatus::Corrupted { .. } => "corrupt".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Calculation
// ─────────────────────────────────────────────────────────────────────────────

/// Status for a parsed kill timestamp.
pub fn respawn_status(
    last_killed: Option<NaiveDateTime>,
    interval_minutes: u32,
    now: NaiveDateTime,
) -> RespawnStatus {
    let Some(killed_at) = last_killed else {
        return RespawnStatus::Unrecorded;
    };

    // Only a timestamp at the edge of chrono's range can overflow here
    let Some(respawn_at) =
        killed_at.checked_add_signed(TimeDelta::minutes(i64::from(interval_minutes)))
    else {
        return RespawnStatus::Corrupted {
            raw: format_stored_timestamp(killed_at),
        };
    };

    if now >= respawn_at {
        RespawnStatus::Ready {
            killed_at,
            respawn_at,
        }
    } else {
        RespawnStatus::Pending {
            killed_at,
            respawn_at,
            remaining: Remaining::from_delta(respawn_at - now),
        }
    }
}

/// Status for a stored kill timestamp.
///
/// A present but unreadable value yields [`RespawnStatus::Corrupted`] with the
/// raw text, never `Unrecorded`.
pub fn compute_status(
    last_killed: Option<&str>,
    interval_minutes: u32,
    now: NaiveDateTime,
) -> RespawnStatus {
    match last_killed {
        None => RespawnStatus::Unrecorded,
        Some(raw) => match parse_stored_timestamp(raw) {
            Some(ts) => respawn_status(Some(ts), interval_minutes, now),
            None => {
                tracing::debug!(raw, "Stored kill timestamp is unreadable");
                RespawnStatus::Corrupted {
                    raw: raw.to_string(),
                }
            }
        },
    }
}
