//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/respawn/respawn.log` (or platform equivalent)
//! with 10 MB rotation. The terminal only sees warnings so the board stays
//! readable. Set `DEBUG_LOGGING=1` for debug output from respawn crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_DIRECTIVE: &str = "info,respawn_core=debug,respawn_cli=debug";

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging { DEBUG_DIRECTIVE } else { "info" }
}

/// Initialize logging with file output plus warnings on stderr.
///
/// Returns a `WorkerGuard` that must be held for the lifetime of the process
/// so buffered lines are flushed on exit. Returns `None` and logs to stderr
/// only when the log file can't be set up.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let log_dir = match dirs::config_dir() {
        Some(config) => config.join("respawn"),
        None => {
            init_stderr_only(debug_logging);
            return None;
        }
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Subscriber isn't up yet
        eprintln!(
            "Failed to create log directory {:?}: {}, logging to stderr only",
            log_dir, e
        );
        init_stderr_only(debug_logging);
        return None;
    }

    let log_path = log_dir.join("respawn.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(10 * 1024 * 1024),
        1, // respawn.log and respawn.log.1
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stderr_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE)
        .with_filter(EnvFilter::new(filter_directive(debug_logging)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_filter(stderr_level(debug_logging));

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "respawn logging initialized");

    Some(guard)
}

fn stderr_level(debug_logging: bool) -> LevelFilter {
    if debug_logging {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    }
}

/// Fallback when the log file can't be opened.
fn init_stderr_only(debug_logging: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_filter(stderr_level(debug_logging));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .init();
}
