pub mod board;
pub mod context;
pub mod game_data;
pub mod respawn;
pub mod store;
pub mod time_parse;

// Re-exports for convenience
pub use board::{Board, BoardRow, BossCard, BossSelector, Summary};
pub use context::{AppConfig, AppConfigExt, ConfigError};
pub use game_data::{BossDefinition, catalogue, format_interval};
pub use respawn::{Remaining, RespawnStatus, StatusKind, compute_status, respawn_status};
pub use store::{KillRecord, LoadOutcome, Loaded, RecordSet, RecordStore, StoreError};
