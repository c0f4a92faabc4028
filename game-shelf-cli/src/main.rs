//! game-shelf CLI
//!
//! Serves the game catalog over HTTP and manages its database.

mod commands;
mod error;
mod web;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use game_shelf_lib::Settings;

pub(crate) use error::CliError;

#[derive(Parser)]
#[command(name = "game-shelf")]
#[command(about = "Browse and edit a catalog of games and the platforms they run on", long_about = None)]
struct Cli {
    /// Catalog database path (defaults to the settings file, then the data directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve {
        /// Address to listen on (e.g., 127.0.0.1:8080)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Load genres and platforms from YAML into the database
    Seed {
        /// Directory containing genres/ and platforms/ (default: ./catalog)
        #[arg(long)]
        catalog_dir: Option<PathBuf>,
    },

    /// Show row counts for the catalog database
    Stats,

    /// Inspect or change the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show resolved settings and where they came from
    Show,

    /// Print the settings file path
    Path,

    /// Remember a database path in the settings file
    SetDb {
        /// Database path to save
        #[arg(required_unless_present = "clear")]
        path: Option<PathBuf>,

        /// Remove the saved database path instead
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            if record.level() == log::Level::Info {
                writeln!(buf, "{}", record.args())
            } else {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
        })
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            log::error!("{}", CliError::config(e.to_string()));
            std::process::exit(1);
        }
    };
    let db_path = settings.database_path(cli.db);

    let result = match cli.command {
        Commands::Serve { bind } => {
            commands::serve::run_serve(db_path, settings.bind_address(bind))
        }
        Commands::Seed { catalog_dir } => commands::seed::run_seed(&db_path, catalog_dir),
        Commands::Stats => commands::stats::run_stats(&db_path),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings, &db_path),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path, clear } => {
                commands::config::run_config_set_db(if clear { None } else { path })
            }
        },
    };

    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
