use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use course_sync_db::SyncOutcome;

use crate::CliError;
use crate::config::SyncConfig;

/// Show the most recent table passes.
pub(crate) fn run_history(config: &SyncConfig, limit: u32) -> Result<(), CliError> {
    if !config.db_path.exists() {
        log::warn!("No schedule database found at {}", config.db_path.display());
        return Ok(());
    }

    let conn = course_sync_db::open_database(&config.db_path)
        .map_err(|e| CliError::database(format!("Failed to open database: {}", e)))?;
    let logs = course_sync_db::list_sync_logs(&conn, Some(limit))
        .map_err(|e| CliError::database(format!("Failed to read sync log: {}", e)))?;

    if logs.is_empty() {
        log::info!("No sync passes recorded yet.");
        return Ok(());
    }

    for entry in &logs {
        let outcome = match entry.outcome {
            SyncOutcome::Ok => format!("{}", "ok".if_supports_color(Stdout, |t| t.green())),
            SyncOutcome::Failed => {
                format!("{}", "failed".if_supports_color(Stdout, |t| t.red()))
            }
        };
        log::info!(
            "  {}  {:<18} {:<6} {:>6} staged {:>6} inserted {:>6} updated",
            entry.synced_at.if_supports_color(Stdout, |t| t.dimmed()),
            entry.table_name,
            outcome,
            entry.staged,
            entry.inserted,
            entry.updated,
        );
        if let Some(error) = &entry.error {
            log::info!("      {}", error);
        }
    }

    Ok(())
}
