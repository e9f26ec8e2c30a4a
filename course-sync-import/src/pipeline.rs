//! The full sync job: check, fetch, project, reconcile.
//!
//! Tables are reconciled one at a time in foreign-key order. A failed pass
//! is recorded and the run moves on to the next table; only an inconsistent
//! schedule (or a broken sync log) stops the job.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use course_sync_core::{ConsistencyError, RawCourse, check_unique_crns};
use course_sync_db::{
    OperationError, SyncError, SyncLog, SyncRow, SyncSummary, insert_sync_log, synchronize,
};
use course_sync_fetch::{CourseTable, DescriptionSource, FetchError, build_course_table};
use rusqlite::Connection;
use thiserror::Error;

use crate::progress::SyncProgress;
use crate::rows::{TableRows, build_rows};

/// Default number of concurrent description fetches.
pub const DEFAULT_WORKERS: usize = 16;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Inconsistent schedule: {0}")]
    Consistency(#[from] ConsistencyError),
    #[error("Failed to record sync log: {0}")]
    Log(#[from] OperationError),
}

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Concurrent description fetches.
    pub workers: usize,
    /// Append a `sync_log` row per table pass.
    pub write_log: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            write_log: true,
        }
    }
}

/// What a sync run did.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Courses in the input schedule.
    pub courses: usize,
    /// Courses that received a description.
    pub described: usize,
    pub fetch_failed: usize,
    pub first_fetch_error: Option<FetchError>,
    /// Subcourses stored without a parent lecture.
    pub unresolved: usize,
    /// Successful passes, in sync order.
    pub tables: Vec<SyncSummary>,
    /// Failed passes, in sync order.
    pub failures: Vec<SyncError>,
}

impl SyncReport {
    pub fn inserted(&self) -> usize {
        self.tables.iter().map(|s| s.inserted).sum()
    }

    pub fn updated(&self) -> usize {
        self.tables.iter().map(|s| s.updated).sum()
    }

    /// Every pass succeeded and every course got a description.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.fetch_failed == 0
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Sync complete: {} inserted, {} updated, {} of {} tables failed",
            self.inserted(),
            self.updated(),
            self.failures.len(),
            self.tables.len() + self.failures.len()
        )
    }
}

/// Check the schedule and fetch a description for every course.
pub async fn fetch_catalog<S>(
    courses: Vec<RawCourse>,
    source: Arc<S>,
    workers: usize,
) -> Result<CourseTable, PipelineError>
where
    S: DescriptionSource + 'static,
{
    check_unique_crns(&courses)?;
    Ok(build_course_table(courses, source, workers).await)
}

/// Run a full sync of `courses` into the database.
///
/// `courses` must be in schedule order. Fetch failures only cost the
/// affected course its description.
pub async fn sync_schedule<S>(
    conn: &Connection,
    courses: Vec<RawCourse>,
    source: Arc<S>,
    options: &SyncOptions,
    progress: &dyn SyncProgress,
) -> Result<SyncReport, PipelineError>
where
    S: DescriptionSource + 'static,
{
    check_unique_crns(&courses)?;

    progress.on_phase(&format!(
        "Fetching descriptions for {} courses",
        courses.len()
    ));
    let table = build_course_table(courses.clone(), source, options.workers).await;

    progress.on_phase("Building table rows");
    let rows = build_rows(&courses, &table.entries);

    progress.on_phase("Reconciling tables");
    let mut report = reconcile_rows(conn, &rows, options, progress)?;
    report.courses = courses.len();
    report.described = table.entries.len();
    report.fetch_failed = table.failed;
    report.first_fetch_error = table.first_error;

    progress.on_complete(&report.summary_line());
    Ok(report)
}

/// Reconcile prebuilt rows, one pass per table in foreign-key order.
pub fn reconcile_rows(
    conn: &Connection,
    rows: &TableRows,
    options: &SyncOptions,
    progress: &dyn SyncProgress,
) -> Result<SyncReport, PipelineError> {
    let mut report = SyncReport {
        unresolved: rows.unresolved,
        ..SyncReport::default()
    };

    run_pass(conn, &rows.instructors, options, progress, &mut report)?;
    run_pass(conn, &rows.courses, options, progress, &mut report)?;
    run_pass(conn, &rows.lectures, options, progress, &mut report)?;
    run_pass(conn, &rows.subcourses, options, progress, &mut report)?;
    run_pass(conn, &rows.exams, options, progress, &mut report)?;

    Ok(report)
}

fn run_pass<R: SyncRow>(
    conn: &Connection,
    rows: &[R],
    options: &SyncOptions,
    progress: &dyn SyncProgress,
    report: &mut SyncReport,
) -> Result<(), PipelineError> {
    let table = R::TABLE.name;
    let result = synchronize(conn, rows);
    progress.on_table(table, &result);

    if options.write_log {
        let synced_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        insert_sync_log(
            conn,
            &SyncLog::from_result(table, synced_at, rows.len(), &result),
        )?;
    }

    match result {
        Ok(summary) => report.tables.push(summary),
        Err(e) => report.failures.push(e),
    }
    Ok(())
}
