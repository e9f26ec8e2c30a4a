//! course-sync CLI
//!
//! Command-line interface for synchronizing scraped course schedules into a
//! local SQLite database.

mod cli_types;
mod commands;
mod config;
mod error;
mod lock;
mod progress;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction, SourceArgs};
use config::{Overrides, SyncConfig};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let source_args = match &cli.command {
        Commands::Sync { source, .. } | Commands::Blueprints { source, .. } => source.clone(),
        _ => SourceArgs::default(),
    };
    let config = SyncConfig::load(Overrides {
        db_path: cli.db.clone(),
        workers: source_args.workers,
        description_url: source_args.description_url.clone(),
    })?;

    match cli.command {
        Commands::Sync {
            feed,
            source,
            no_log,
        } => commands::sync::run_sync(&config, &feed, &source, no_log, cli.quiet),
        Commands::Blueprints { feed, source, csv } => {
            commands::blueprints::run_blueprints(&config, &feed, &source, csv)
        }
        Commands::Stats => commands::stats::run_stats(&config),
        Commands::Log { limit } => commands::history::run_history(&config, limit),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&config);
                Ok(())
            }
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }
}

/// Install the logger. Info-level lines are printed bare since they are the
/// command's normal output; `RUST_LOG` overrides the level.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        "warn,course_sync=debug"
    } else if quiet {
        "warn"
    } else {
        "warn,course_sync=info"
    };

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter));
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        });
    }
    builder.init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
