mod catalogue;
mod field_bosses;

pub use catalogue::{BossDefinition, catalogue, format_interval};
pub use field_bosses::FIELD_BOSSES;
