use std::path::{Path, PathBuf};
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use course_sync_import::{compute_blueprints, fetch_catalog, write_blueprints_csv};

use crate::CliError;
use crate::cli_types::SourceArgs;
use crate::config::SyncConfig;

use super::{build_source, runtime, truncate_str};

/// Compute blueprints for a feed and print or export them.
pub(crate) fn run_blueprints(
    config: &SyncConfig,
    feed: &Path,
    args: &SourceArgs,
    csv: Option<PathBuf>,
) -> Result<(), CliError> {
    let courses = course_sync_core::load_feed(feed)?;
    let source = Arc::new(build_source(config, args)?);

    let rt = runtime()?;
    let table = rt.block_on(fetch_catalog(courses, source, config.workers))?;
    if let Some(e) = &table.first_error {
        log::warn!(
            "{} courses left out of blueprints; first failure: {}",
            table.failed,
            e
        );
    }

    let blueprints = compute_blueprints(&table.entries);

    if let Some(path) = csv {
        let file = std::fs::File::create(&path)?;
        let written = write_blueprints_csv(file, &blueprints)?;
        log::info!(
            "Wrote {} blueprints to {}",
            written,
            path.display().if_supports_color(Stdout, |t| t.cyan()),
        );
        return Ok(());
    }

    for bp in &blueprints {
        log::info!(
            "  {:<12} {:<40} {:>5}/{:<5} {} sections",
            format!("{} {}", bp.subject, bp.course_num).if_supports_color(Stdout, |t| t.bold()),
            truncate_str(&bp.title, 40),
            bp.enrolled,
            bp.capacity,
            bp.crns.len(),
        );
    }
    crate::log_blank();
    log::info!("{} blueprints", blueprints.len());

    Ok(())
}
