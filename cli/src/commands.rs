use std::io::Write;
use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDateTime};
use respawn_core::board::{Board, BossCard};
use respawn_core::context::{AppConfig, AppConfigExt};
use respawn_core::store::write_backup;
use respawn_core::time_parse;

use crate::context::CliContext;
use crate::render;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Resolve a board number or exact name against the current records.
fn resolve_boss(ctx: &CliContext, input: &str, now: NaiveDateTime) -> Result<&'static str, String> {
    Board::build(ctx.records(), now)
        .resolve(input)
        .map(|row| row.name)
        .ok_or_else(|| format!("No boss matches '{input}'. Use a board number or an exact name.\n"))
}

fn print_notice(ctx: &CliContext) {
    if let Some(notice) = render::load_notice(ctx.last_outcome()) {
        println!("{notice}");
    }
}

pub fn show_board(ctx: &mut CliContext) -> Result<(), String> {
    ctx.refresh();
    let now = now();
    print_notice(ctx);
    if ctx.has_unsaved() {
        println!("Unsaved changes pending; run `save` to retry or `reload` to discard.");
    }
    print!("{}", render::board(&Board::build(ctx.records(), now), now));
    Ok(())
}

pub fn show_boss(boss: &str, ctx: &mut CliContext) -> Result<(), String> {
    ctx.refresh();
    let now = now();
    let name = resolve_boss(ctx, boss, now)?;
    let record = ctx
        .records()
        .get(name)
        .ok_or_else(|| format!("Unknown boss: {name}\n"))?;
    print!("{}", render::card(&BossCard::new(record, now)));
    Ok(())
}

/// What a `kill` command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillEdit {
    Recorded {
        boss: &'static str,
        killed_at: NaiveDateTime,
    },
    Cleared {
        boss: &'static str,
    },
}

/// Record a kill at `now`, at the time in `at`, or clear the record when
/// `at` is blank. Yearless input takes the year of `now`.
pub fn edit_kill(
    boss: &str,
    at: Option<&str>,
    now: NaiveDateTime,
    ctx: &mut CliContext,
) -> Result<KillEdit, String> {
    ctx.refresh();
    let name = resolve_boss(ctx, boss, now)?;

    let killed_at = match at {
        None => now,
        Some(text) if text.trim().is_empty() => {
            clear_named(name, ctx)?;
            return Ok(KillEdit::Cleared { boss: name });
        }
        Some(text) => time_parse::parse(text, now.year()).ok_or_else(|| {
            format!(
                "Could not read time '{}'. Accepted: {}\n",
                text.trim(),
                time_parse::format_input_hint()
            )
        })?,
    };

    ctx.mutate(|records| records.record_kill(name, killed_at))?;
    tracing::info!(boss = name, killed_at = %killed_at, "Recorded kill");
    Ok(KillEdit::Recorded {
        boss: name,
        killed_at,
    })
}

pub fn record_kill(boss: &str, at: Option<&str>, ctx: &mut CliContext) -> Result<(), String> {
    let now = now();
    match edit_kill(boss, at, now, ctx)? {
        KillEdit::Cleared { boss } => println!("Cleared record for {boss}"),
        KillEdit::Recorded { boss, .. } => {
            if let Some(record) = ctx.records().get(boss) {
                print!("{}", render::card(&BossCard::new(record, now)));
            }
        }
    }
    Ok(())
}

pub fn clear_boss(boss: &str, ctx: &mut CliContext) -> Result<(), String> {
    ctx.refresh();
    let name = resolve_boss(ctx, boss, now())?;
    clear_named(name, ctx)?;
    println!("Cleared record for {name}");
    Ok(())
}

fn clear_named(name: &'static str, ctx: &mut CliContext) -> Result<(), String> {
    ctx.mutate(|records| records.clear(name))?;
    tracing::info!(boss = name, "Cleared kill record");
    Ok(())
}

pub fn reset_all(ctx: &mut CliContext) -> Result<(), String> {
    ctx.reset()?;
    tracing::info!(path = %ctx.store().path().display(), "Reset all records");
    println!("All records reset");
    Ok(())
}

pub fn reload(ctx: &mut CliContext) -> Result<(), String> {
    let discarded = ctx.has_unsaved();
    ctx.reload();
    if discarded {
        println!("Discarded unsaved changes");
    }
    print_notice(ctx);
    if ctx.last_outcome().is_loaded() {
        println!(
            "Loaded {} ({} of {} recorded)",
            ctx.store().path().display(),
            ctx.records().recorded_count(),
            ctx.records().len()
        );
    } else {
        println!("Using empty records for {}", ctx.store().path().display());
    }
    Ok(())
}

/// Retry writing the in-memory records.
pub fn save(ctx: &mut CliContext) -> Result<(), String> {
    if !ctx.has_unsaved() {
        println!("Nothing to save");
        return Ok(());
    }
    ctx.persist()?;
    println!("Saved to {}", ctx.store().path().display());
    Ok(())
}

pub fn backup(dir: Option<&str>, ctx: &mut CliContext) -> Result<(), String> {
    ctx.refresh();
    let dir = dir
        .map(PathBuf::from)
        .unwrap_or_else(|| ctx.config.backup_path());
    let path = write_backup(ctx.records(), &dir, now()).map_err(|e| format!("Backup failed: {e}\n"))?;
    println!("Backup written to {}", path.display());
    Ok(())
}

pub fn show_config(ctx: &CliContext) -> Result<(), String> {
    let config_path = match AppConfig::config_path() {
        Ok(path) => path.display().to_string(),
        Err(e) => format!("unavailable ({e})"),
    };
    println!("Config file:  {config_path}");
    println!("Data file:    {}", ctx.store().path().display());
    println!("Backup dir:   {}", ctx.config.backup_path().display());
    println!("Refresh:      {}s", ctx.config.refresh_interval().as_secs());
    Ok(())
}

/// Redraw the board every `secs` seconds (or the configured period) until Ctrl-C.
pub async fn watch(secs: Option<u64>, ctx: &mut CliContext) -> Result<(), String> {
    let period = secs
        .map(|s| std::time::Duration::from_secs(s.max(1)))
        .unwrap_or_else(|| ctx.config.refresh_interval());
    let mut ticker = tokio::time::interval(period);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Clear screen, cursor home
                print!("\x1B[2J\x1B[H");
                show_board(ctx)?;
                println!("\nRefreshing every {}s, Ctrl-C to stop", period.as_secs());
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
            result = &mut ctrl_c => {
                result.map_err(|e| e.to_string())?;
                println!();
                return Ok(());
            }
        }
    }
}

pub fn exit(ctx: &CliContext) -> Result<(), String> {
    let mut stdout = std::io::stdout();
    if ctx.has_unsaved() {
        writeln!(stdout, "Warning: unsaved changes are being discarded").map_err(|e| e.to_string())?;
    }
    writeln!(stdout, "quitting...").map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())
}
