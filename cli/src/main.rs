use clap::{Parser, Subcommand};
use respawn_cli::commands;
use respawn_cli::logging;
use respawn_cli::readline;
use respawn_cli::CliContext;
use respawn_core::context::{AppConfig, AppConfigExt};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let log_guard = logging::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    if let Some(path) = cli.data_file {
        config.data_file = path;
    }
    let mut ctx = CliContext::new(config);
    tracing::info!(path = %ctx.store().path().display(), "Using record file");

    // One-shot mode
    if let Some(command) = cli.command {
        if let Err(err) = dispatch(command, &mut ctx).await {
            print_error(&err)?;
            drop(log_guard);
            std::process::exit(1);
        }
        return Ok(());
    }

    if let Err(err) = commands::show_board(&mut ctx) {
        print_error(&err)?;
    }

    loop {
        let Some(line) = readline()? else {
            commands::exit(&ctx)?;
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => print_error(&err)?,
        }
    }

    Ok(())
}

fn print_error(err: &str) -> Result<(), String> {
    write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}

#[derive(Parser)]
#[command(version, about = "Shared field boss respawn tracker")]
struct Cli {
    /// Record file to use instead of the configured one
    #[arg(long, global = true)]
    data_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every boss sorted by respawn interval
    Board,
    /// Show one boss by board number or name
    Show { boss: String },
    /// Record a kill, now or at a given time
    Kill {
        boss: String,
        /// Kill time, e.g. "08/11 16:30" or "2025/08/11 16:30". Empty clears.
        #[arg(short, long)]
        at: Option<String>,
    },
    /// Remove the kill record for one boss
    Clear { boss: String },
    /// Clear every record
    Reset,
    /// Re-read the record file, discarding unsaved changes
    Reload,
    /// Retry writing changes after a failed save
    Save,
    /// Write a timestamped copy of all records
    Backup {
        #[arg(short, long)]
        dir: Option<String>,
    },
    /// Redraw the board periodically until Ctrl-C
    Watch {
        #[arg(short, long)]
        secs: Option<u64>,
    },
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting\n")?;
    args.insert(0, "respawn".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    if let Some(path) = cli.data_file {
        ctx.use_data_file(path);
    }

    match cli.command {
        Some(command) => dispatch(command, ctx).await,
        None => Ok(false),
    }
}

/// Run one command. Returns true when the session should end.
async fn dispatch(command: Commands, ctx: &mut CliContext) -> Result<bool, String> {
    match command {
        Commands::Board => commands::show_board(ctx)?,
        Commands::Show { boss } => commands::show_boss(&boss, ctx)?,
        Commands::Kill { boss, at } => commands::record_kill(&boss, at.as_deref(), ctx)?,
        Commands::Clear { boss } => commands::clear_boss(&boss, ctx)?,
        Commands::Reset => commands::reset_all(ctx)?,
        Commands::Reload => commands::reload(ctx)?,
        Commands::Save => commands::save(ctx)?,
        Commands::Backup { dir } => commands::backup(dir.as_deref(), ctx)?,
        Commands::Watch { secs } => commands::watch(secs, ctx).await?,
        Commands::Config => commands::show_config(ctx)?,
        Commands::Exit => {
            commands::exit(ctx)?;
            return Ok(true);
        }
    }
    Ok(false)
}
