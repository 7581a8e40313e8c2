//! townboard CLI entry point.

use std::process::ExitCode;

use chrono::{Local, NaiveDateTime};
use clap::Parser;

use townboard_cli::cli::{AdminAction, Cli, Command, ConfigAction};
use townboard_cli::commands;
use townboard_cli::config::CliConfig;
use townboard_cli::error::{CliError, CliResult};
use townboard_core::{LogConfig, init_logging};
use townboard_store::{EventStore, StoreError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_config = if cli.debug {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    if let Err(e) = init_logging(log_config) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Store(StoreError::Rejected(errors))) => {
            eprintln!("error: the event was not saved:");
            for error in errors {
                eprintln!("  - {error}");
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = if let Some(path) = &cli.config {
        CliConfig::load_from(path)?
    } else {
        CliConfig::load()?
    };

    // Config commands do not need the database.
    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Dump => commands::config::dump(&config),
            ConfigAction::Path => commands::config::path(),
        };
    }

    let db_path = config.database_path(cli.database.as_deref());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let store = EventStore::open(&db_path)?;
    let now = Local::now().naive_local();

    dispatch(cli.command, &store, cli.json, now)
}

fn dispatch(
    command: Command,
    store: &EventStore,
    json: bool,
    now: NaiveDateTime,
) -> CliResult<()> {
    match command {
        Command::List => commands::public::list(store, json, now),
        Command::Show { id } => commands::public::show(store, id, json),
        Command::Admin { action } => match action {
            AdminAction::List { filter } => {
                commands::admin::list(store, filter.as_deref(), json, now)
            }
            AdminAction::Add(args) => commands::admin::add(store, &args, now),
            AdminAction::Edit { id, fields } => commands::admin::edit(store, id, &fields, now),
            AdminAction::Toggle { id } => commands::admin::toggle(store, id, now),
            AdminAction::Delete { id, yes } => commands::admin::delete(store, id, yes),
        },
        // Handled in run() before the store is opened.
        Command::Config { .. } => Ok(()),
    }
}
