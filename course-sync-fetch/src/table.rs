//! Building the enriched course table.

use std::sync::Arc;

use course_sync_core::{CatalogEntry, RawCourse};

use crate::error::FetchError;
use crate::pool::WorkerPool;
use crate::source::DescriptionSource;

/// Result of enriching a schedule with descriptions.
#[derive(Debug)]
pub struct CourseTable {
    /// Enriched entries, in no particular order. Courses whose fetch failed
    /// are absent.
    pub entries: Vec<CatalogEntry>,
    /// Number of courses dropped because their fetch failed.
    pub failed: usize,
    /// First fetch error observed, if any.
    pub first_error: Option<FetchError>,
}

impl CourseTable {
    /// Collapse into a `Result`, discarding partial entries on failure.
    pub fn into_result(self) -> Result<Vec<CatalogEntry>, FetchError> {
        match self.first_error {
            Some(e) => Err(e),
            None => Ok(self.entries),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Fetch a description for every course using `workers` concurrent tasks.
///
/// A failed fetch is logged and drops only that course. The first failure is
/// reported in [`CourseTable::first_error`] alongside the partial result.
/// With no failures, the table has exactly one entry per input course.
pub async fn build_course_table<S>(
    courses: Vec<RawCourse>,
    source: Arc<S>,
    workers: usize,
) -> CourseTable
where
    S: DescriptionSource + 'static,
{
    let total = courses.len();
    let pool = WorkerPool::new(workers);
    log::debug!(
        "Fetching descriptions for {} courses ({} workers)",
        total,
        pool.workers()
    );

    let outcome = pool
        .run(courses, move |course: RawCourse| {
            let source = source.clone();
            async move {
                match source.fetch_description(&course).await {
                    Ok(description) => Ok(CatalogEntry::new(course, description)),
                    Err(e) => {
                        log::warn!("Dropping {} (CRN {}): {}", course.label(), course.crn, e);
                        Err(e)
                    }
                }
            }
        })
        .await;

    log::info!(
        "Fetched {} of {} descriptions ({} failed)",
        outcome.results.len(),
        total,
        outcome.failed
    );

    CourseTable {
        entries: outcome.results,
        failed: outcome.failed,
        first_error: outcome.first_error,
    }
}
