//! Boss catalogue lookup
//!
//! The catalogue is compiled in and never changes at runtime. Every record set
//! the store hands out is keyed by exactly these names.

use super::field_bosses::FIELD_BOSSES;

/// A tracked boss and its fixed respawn interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BossDefinition {
    pub name: &'static str,
    pub respawn_minutes: u32,
}

/// Iterate all bosses in catalogue order.
pub fn catalogue() -> impl ExactSizeIterator<Item = BossDefinition> {
    FIELD_BOSSES.entries().map(|(name, minutes)| BossDefinition {
        name: *name,
        respawn_minutes: *minutes,
    })
}

/// Compact interval label: `"45m"`, `"2h"`, `"2h30m"`.
pub fn format_interval(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h{m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_has_every_boss_once() {
        let names: Vec<_> = catalogue().map(|b| b.name).collect();
        assert_eq!(names.len(), 61);

        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn catalogue_keeps_declaration_order() {
        let first = catalogue().next().unwrap();
        assert_eq!(first.name, "佩爾利斯");
        assert_eq!(first.respawn_minutes, 120);

        let last = catalogue().last().unwrap();
        assert_eq!(last.name, "拉何");
        assert_eq!(last.respawn_minutes, 1980);
    }

    #[test]
    fn intervals_are_positive() {
        assert!(catalogue().all(|b| b.respawn_minutes > 0));
    }

    #[test]
    fn interval_labels() {
        assert_eq!(format_interval(45), "45m");
        assert_eq!(format_interval(120), "2h");
        assert_eq!(format_interval(150), "2h30m");
        assert_eq!(format_interval(1980), "33h");
        assert_eq!(format_interval(0), "0m");
    }
}
