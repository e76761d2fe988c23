use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use swt_cli::commands::{holidays, month, report, set, status};
use swt_cli::{Cli, Commands, Config};
use swt_store::{CalendarStore, SqliteBlob};

/// Load config and open the calendar store, ensuring the parent directory
/// exists.
fn open_store(config_path: Option<&Path>) -> Result<(CalendarStore<SqliteBlob>, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let backend = SqliteBlob::open(&config.database_path).context("failed to open database")?;
    let store = CalendarStore::open(backend, config.holiday_calendar());
    Ok((store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Month { month }) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            month::run(&mut stdout, &mut store, *month)?;
        }
        Some(Commands::Set {
            date,
            day_type,
            hours,
            secondary,
        }) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            set::run(
                &mut stdout,
                &mut store,
                date,
                day_type,
                *hours,
                secondary.as_deref(),
            )?;
        }
        Some(Commands::Report { month, json }) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            report::run(&mut stdout, &store, *month, *json)?;
        }
        Some(Commands::Holidays) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            holidays::run(&mut stdout, store.calendar())?;
        }
        Some(Commands::Status) => {
            let (store, config) = open_store(cli.config.as_deref())?;
            status::run(&mut stdout, &config, &store)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
