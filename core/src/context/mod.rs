mod config;
mod error;

pub use config::{AppConfig, AppConfigExt};
pub use error::ConfigError;
