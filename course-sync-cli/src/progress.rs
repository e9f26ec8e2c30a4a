//! Terminal progress display for sync runs.

use std::time::Duration;

use course_sync_db::{SyncError, SyncSummary};
use course_sync_import::SyncProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Spinner for the current phase, with one line printed per table pass.
pub(crate) struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    /// When `quiet` is true, the spinner is hidden.
    pub fn new(quiet: bool) -> Self {
        let pb = ProgressBar::new_spinner();
        if quiet {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("/-\\|"));
        }
        Self { pb }
    }
}

impl SyncProgress for SpinnerProgress {
    fn on_phase(&self, message: &str) {
        self.pb.enable_steady_tick(Duration::from_millis(100));
        self.pb.set_message(message.to_string());
        log::debug!("{}", message);
    }

    fn on_table(&self, table: &str, result: &Result<SyncSummary, SyncError>) {
        self.pb.suspend(|| match result {
            Ok(s) => log::info!(
                "  {} {:<18} {:>6} staged {:>6} inserted {:>6} updated",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                table,
                s.staged,
                s.inserted,
                s.updated,
            ),
            Err(e) => log::warn!(
                "  {} {:<18} {}",
                "\u{2716}".if_supports_color(Stdout, |t| t.red()),
                table,
                e,
            ),
        });
    }

    fn on_complete(&self, message: &str) {
        self.pb.finish_and_clear();
        log::info!("{}", message.if_supports_color(Stdout, |t| t.bold()));
    }
}
