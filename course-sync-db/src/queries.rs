//! Read-only queries over the synchronized tables.

use course_sync_core::{Crn, UNRESOLVED_PARENT};
use rusqlite::{Connection, params};

use crate::operations::{OperationError, SyncLog, SyncOutcome};
use crate::tables::TableSpec;

/// Number of rows in a synchronized table.
pub fn count_rows(conn: &Connection, table: &TableSpec) -> Result<i64, OperationError> {
    let count = conn.query_row(
        &format!("SELECT COUNT(*) FROM \"{}\"", table.name),
        [],
        |r| r.get(0),
    )?;
    Ok(count)
}

/// CRNs of the sections attached to a lecture, ascending.
pub fn subcourses_for_lecture(
    conn: &Connection,
    lecture_crn: Crn,
) -> Result<Vec<Crn>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT crn FROM labs_discussions WHERE parent_lecture_crn = ?1 ORDER BY crn",
    )?;
    let rows = stmt.query_map(params![lecture_crn], |row| row.get(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Whether a table still holds a leftover staging copy.
pub fn staging_exists(conn: &Connection, table: &TableSpec) -> Result<bool, OperationError> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
        params![table.staging_name()],
        |row| row.get(0),
    )?;
    Ok(exists)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let instructors: i64 = conn.query_row("SELECT COUNT(*) FROM instructor", [], |r| r.get(0))?;
    let courses: i64 = conn.query_row("SELECT COUNT(*) FROM course", [], |r| r.get(0))?;
    let lectures: i64 = conn.query_row("SELECT COUNT(*) FROM lectures", [], |r| r.get(0))?;
    let subcourses: i64 =
        conn.query_row("SELECT COUNT(*) FROM labs_discussions", [], |r| r.get(0))?;
    let unresolved: i64 = conn.query_row(
        "SELECT COUNT(*) FROM labs_discussions WHERE parent_lecture_crn = ?1",
        params![UNRESOLVED_PARENT],
        |r| r.get(0),
    )?;
    let exams: i64 = conn.query_row("SELECT COUNT(*) FROM exam", [], |r| r.get(0))?;

    Ok(CatalogStats {
        instructors,
        courses,
        lectures,
        subcourses,
        unresolved_subcourses: unresolved,
        exams,
    })
}

/// Summary statistics for the synchronized catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogStats {
    pub instructors: i64,
    pub courses: i64,
    pub lectures: i64,
    pub subcourses: i64,
    pub unresolved_subcourses: i64,
    pub exams: i64,
}

// ── Sync Log Queries ────────────────────────────────────────────────────────

/// List recent sync log entries, newest first.
pub fn list_sync_logs(conn: &Connection, limit: Option<u32>) -> Result<Vec<SyncLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, table_name, synced_at, staged, inserted, updated, outcome, error
         FROM sync_log ORDER BY id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        let outcome: String = row.get(6)?;
        Ok(SyncLog {
            id: row.get(0)?,
            table_name: row.get(1)?,
            synced_at: row.get(2)?,
            staged: row.get(3)?,
            inserted: row.get(4)?,
            updated: row.get(5)?,
            outcome: SyncOutcome::from_str_loose(&outcome),
            error: row.get(7)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
