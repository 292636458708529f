use std::io::{stderr, stdout};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hp_cli::commands::{clear, export, set, show, status};
use hp_cli::delivery::{DirectoryDelivery, WriterDelivery};
use hp_cli::{Cli, Commands, Config};
use hp_core::SystemClock;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(hp_store::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = hp_store::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so `export --stdout` output stays a clean calendar
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .try_init();

    let clock = SystemClock;
    let mut out = stdout().lock();

    match &cli.command {
        Some(Commands::Show(args)) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            show::run(&mut out, &db, config.hour_range()?, args, &clock)?;
        }
        Some(Commands::Set(args)) => {
            let (mut db, config) = open_database(cli.config.as_deref())?;
            set::run(&mut out, &mut db, config.hour_range()?, args, &clock)?;
        }
        Some(Commands::Clear(args)) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            clear::run(&mut out, &mut db, args, &clock)?;
        }
        Some(Commands::Export(args)) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let range = config.hour_range()?;
            if args.stdout {
                // The calendar owns stdout; the summary line moves to stderr.
                let mut delivery = WriterDelivery::new(out);
                let mut summary = stderr().lock();
                export::run(
                    &mut summary,
                    &mut delivery,
                    &db,
                    range,
                    &config.file_prefix,
                    &args.date,
                    &clock,
                )?;
            } else {
                let dir = args
                    .output
                    .clone()
                    .unwrap_or_else(|| config.output_dir.clone());
                let mut delivery = DirectoryDelivery::new(dir);
                export::run(
                    &mut out,
                    &mut delivery,
                    &db,
                    range,
                    &config.file_prefix,
                    &args.date,
                    &clock,
                )?;
            }
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut out, &db, &config.database_path)?;
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
