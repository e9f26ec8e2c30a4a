//! Sync progress reporting.

use course_sync_db::{SyncError, SyncSummary};

/// Trait for receiving sync progress updates.
pub trait SyncProgress {
    /// Called when a phase starts (e.g., "Fetching descriptions").
    fn on_phase(&self, message: &str);

    /// Called after each table pass, successful or not.
    fn on_table(&self, table: &str, result: &Result<SyncSummary, SyncError>);

    /// Called when the run is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl SyncProgress for SilentProgress {
    fn on_phase(&self, _message: &str) {}
    fn on_table(&self, _table: &str, _result: &Result<SyncSummary, SyncError>) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl SyncProgress for LogProgress {
    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_table(&self, table: &str, result: &Result<SyncSummary, SyncError>) {
        match result {
            Ok(s) => log::info!(
                "  {:<18} {} staged, {} inserted, {} updated",
                table,
                s.staged,
                s.inserted,
                s.updated
            ),
            Err(e) => log::warn!("  {:<18} failed: {}", table, e),
        }
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
