use std::path::Path;
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use course_sync_import::{SyncOptions, SyncReport, sync_schedule};

use crate::CliError;
use crate::cli_types::SourceArgs;
use crate::config::SyncConfig;
use crate::lock;
use crate::progress::SpinnerProgress;

use super::{build_source, runtime};

/// Reconcile a schedule feed into the database.
pub(crate) fn run_sync(
    config: &SyncConfig,
    feed: &Path,
    args: &SourceArgs,
    no_log: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let courses = course_sync_core::load_feed(feed)?;
    log::info!(
        "Loaded {} courses from {}",
        courses.len(),
        feed.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let source = Arc::new(build_source(config, args)?);

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _lock = lock::acquire(&config.lock_path())?;

    let conn = course_sync_db::open_database(&config.db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open database at {}: {}",
            config.db_path.display(),
            e
        ))
    })?;

    let options = SyncOptions {
        workers: config.workers,
        write_log: !no_log,
    };
    let progress = SpinnerProgress::new(quiet);

    let rt = runtime()?;
    let report = rt.block_on(sync_schedule(&conn, courses, source, &options, &progress))?;

    print_report(&report);

    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::Incomplete {
            failed: report.failures.len(),
        })
    }
}

fn print_report(report: &SyncReport) {
    crate::log_blank();
    log::info!(
        "  Descriptions:   {:>8} of {}",
        report.described,
        report.courses
    );
    if report.fetch_failed > 0 {
        log::warn!(
            "  Fetch failures: {:>8}",
            report
                .fetch_failed
                .if_supports_color(Stdout, |t| t.yellow())
        );
        if let Some(e) = &report.first_fetch_error {
            log::warn!("  First failure:  {}", e);
        }
    }
    if report.unresolved > 0 {
        log::info!(
            "  Unresolved:     {:>8} (sections with no parent lecture)",
            report.unresolved
        );
    }
    for failure in &report.failures {
        log::error!(
            "  {} {}",
            "Failed:".if_supports_color(Stdout, |t| t.red()),
            failure
        );
    }
}
