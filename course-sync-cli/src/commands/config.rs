use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::{SyncConfig, ValueSource, config_path};

/// Show resolved settings and their sources.
pub(crate) fn run_config_show(config: &SyncConfig) {
    log::info!(
        "{}",
        "course-sync Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    // Config file status
    match config_path() {
        Some(p) if p.exists() => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let fields: [(&str, ValueSource, Option<String>); 3] = [
        (
            "database",
            config.sources.db_path,
            Some(config.db_path.display().to_string()),
        ),
        (
            "workers",
            config.sources.workers,
            Some(config.workers.to_string()),
        ),
        (
            "description_url",
            config.sources.description_url,
            config.description_url.clone(),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        log::info!(
            "  {} {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            match value {
                Some(v) => v,
                None => "not set".to_string(),
            },
            source_str.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!(
        "  {} {} ms",
        "min_request_interval:".if_supports_color(Stdout, |t| t.cyan()),
        config.min_request_interval.as_millis(),
    );
    log::info!(
        "  {} {} s",
        "timeout:".if_supports_color(Stdout, |t| t.cyan()),
        config.timeout.as_secs(),
    );
}

/// Print the config file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    match config_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}
