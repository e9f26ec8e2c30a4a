use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::config::SyncConfig;

pub(crate) fn run_stats(config: &SyncConfig) -> Result<(), CliError> {
    let db_path = &config.db_path;

    if !db_path.exists() {
        log::warn!("No schedule database found at {}", db_path.display());
        log::info!("Run 'course-sync sync <feed>' to create one.");
        return Ok(());
    }

    let conn = course_sync_db::open_database(db_path)
        .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))?;

    let stats = course_sync_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query stats: {}", e)))?;

    log::info!(
        "{}",
        "Schedule Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Instructors:    {:>8}", stats.instructors);
    log::info!("  Courses:        {:>8}", stats.courses);
    log::info!("  Lectures:       {:>8}", stats.lectures);
    log::info!("  Sections:       {:>8}", stats.subcourses);
    log::info!(
        "  Unresolved:     {:>8} (sections with no parent lecture)",
        stats.unresolved_subcourses,
    );
    log::info!("  Exams:          {:>8}", stats.exams);

    Ok(())
}
