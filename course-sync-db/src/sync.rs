//! Staging-table reconciliation of freshly computed rows.
//!
//! One call to [`synchronize`] is one atomic pass over one table:
//!
//! 1. create `<table>_staging` with the target's columns and no rows
//! 2. bulk-insert every fresh row into staging
//! 3. insert staging rows whose key is absent from the target
//! 4. update target rows whose key exists but whose full row differs
//! 5. drop the staging table, whatever happened in 2-4
//! 6. commit only if 1-4 succeeded, otherwise roll back
//!
//! Rows are never deleted. The connection is expected to have no open
//! transaction; passes on the same table must not run concurrently since
//! they share the staging name.

use std::collections::HashSet;
use std::fmt;

use rusqlite::{Connection, params_from_iter};
use thiserror::Error;

use crate::tables::{SyncRow, TableSpec};

/// SQLite's default `SQLITE_MAX_VARIABLE_NUMBER` for the bundled build.
const MAX_HOST_PARAMS: usize = 32_766;

/// Step of a pass, used to tag failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Validate,
    Begin,
    Stage,
    BulkInsert,
    InsertNew,
    UpdateChanged,
    DropStaging,
    Commit,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Validate => "validate",
            Self::Begin => "begin",
            Self::Stage => "create staging",
            Self::BulkInsert => "bulk insert",
            Self::InsertNew => "insert new",
            Self::UpdateChanged => "update changed",
            Self::DropStaging => "drop staging",
            Self::Commit => "commit",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Sync of '{table}' failed during {phase}: {source}")]
    Sqlite {
        table: &'static str,
        phase: SyncPhase,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Sync of '{table}' rejected: duplicate primary key {key} in fresh rows")]
    DuplicateKey { table: &'static str, key: i64 },
}

impl SyncError {
    pub fn table(&self) -> &'static str {
        match self {
            Self::Sqlite { table, .. } | Self::DuplicateKey { table, .. } => table,
        }
    }

    pub fn phase(&self) -> SyncPhase {
        match self {
            Self::Sqlite { phase, .. } => *phase,
            Self::DuplicateKey { .. } => SyncPhase::Validate,
        }
    }

    /// True when the pass failed on a foreign-key constraint, i.e. a parent
    /// table has not been synchronized yet.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            Self::Sqlite {
                source: rusqlite::Error::SqliteFailure(err, _),
                ..
            } => err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            _ => false,
        }
    }
}

/// Counts from one successful pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSummary {
    pub table: &'static str,
    pub staged: usize,
    pub inserted: usize,
    pub updated: usize,
}

impl SyncSummary {
    pub fn unchanged(&self) -> usize {
        self.staged - self.inserted - self.updated
    }

    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.updated == 0
    }
}

/// Reconcile `rows` into their table.
pub fn synchronize<R: SyncRow>(conn: &Connection, rows: &[R]) -> Result<SyncSummary, SyncError> {
    let target = R::TABLE;
    check_unique_keys(&target, rows)?;

    let fail = |phase: SyncPhase| {
        move |source: rusqlite::Error| SyncError::Sqlite {
            table: target.name,
            phase,
            source,
        }
    };

    conn.execute_batch("BEGIN IMMEDIATE")
        .map_err(fail(SyncPhase::Begin))?;

    let result = run_pass(conn, &target, rows);

    let drop_sql = format!("DROP TABLE IF EXISTS \"{}\"", target.staging_name());
    let dropped = conn.execute_batch(&drop_sql);

    match (result, dropped) {
        (Ok(summary), Ok(())) => {
            if let Err(e) = conn.execute_batch("COMMIT") {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(fail(SyncPhase::Commit)(e));
            }
            log::debug!(
                "Synced {}: {} staged, {} inserted, {} updated",
                target.name,
                summary.staged,
                summary.inserted,
                summary.updated
            );
            Ok(summary)
        }
        (Ok(_), Err(e)) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(fail(SyncPhase::DropStaging)(e))
        }
        (Err(e), _) => {
            let _ = conn.execute_batch("ROLLBACK");
            // Normally a no-op: the rollback already discarded staging.
            let _ = conn.execute_batch(&drop_sql);
            Err(e)
        }
    }
}

fn check_unique_keys<R: SyncRow>(target: &TableSpec, rows: &[R]) -> Result<(), SyncError> {
    let mut seen = HashSet::with_capacity(rows.len());
    for row in rows {
        if !seen.insert(row.key()) {
            return Err(SyncError::DuplicateKey {
                table: target.name,
                key: row.key(),
            });
        }
    }
    Ok(())
}

/// Steps 1-4. Runs inside the caller's transaction.
fn run_pass<R: SyncRow>(
    conn: &Connection,
    target: &TableSpec,
    rows: &[R],
) -> Result<SyncSummary, SyncError> {
    let fail = |phase: SyncPhase| {
        move |source: rusqlite::Error| SyncError::Sqlite {
            table: target.name,
            phase,
            source,
        }
    };
    let staging = target.staging_name();
    let columns = target.columns.join(", ");

    conn.execute_batch(&format!(
        "CREATE TABLE \"{staging}\" AS SELECT {columns} FROM \"{}\" WHERE 0",
        target.name
    ))
    .map_err(fail(SyncPhase::Stage))?;

    bulk_insert(conn, &staging, target, rows).map_err(fail(SyncPhase::BulkInsert))?;

    let inserted = conn
        .execute(
            &format!(
                "INSERT INTO \"{table}\" ({columns})
                 SELECT {columns} FROM \"{staging}\" AS s
                 WHERE NOT EXISTS (SELECT 1 FROM \"{table}\" AS t WHERE t.{key} = s.{key})",
                table = target.name,
                key = target.key,
            ),
            [],
        )
        .map_err(fail(SyncPhase::InsertNew))?;

    let updated = update_changed(conn, &staging, target).map_err(fail(SyncPhase::UpdateChanged))?;

    Ok(SyncSummary {
        table: target.name,
        staged: rows.len(),
        inserted,
        updated,
    })
}

/// Multi-row `INSERT … VALUES` into staging. A single statement unless the
/// batch exceeds SQLite's host-parameter limit.
fn bulk_insert<R: SyncRow>(
    conn: &Connection,
    staging: &str,
    target: &TableSpec,
    rows: &[R],
) -> rusqlite::Result<()> {
    let width = target.columns.len();
    let per_statement = (MAX_HOST_PARAMS / width).max(1);
    let placeholder = format!("({})", vec!["?"; width].join(", "));
    let columns = target.columns.join(", ");

    for chunk in rows.chunks(per_statement) {
        let sql = format!(
            "INSERT INTO \"{staging}\" ({columns}) VALUES {}",
            vec![placeholder.as_str(); chunk.len()].join(", ")
        );
        let values: Vec<_> = chunk.iter().flat_map(|row| row.values()).collect();
        conn.execute(&sql, params_from_iter(values.iter()))?;
    }
    Ok(())
}

/// Update target rows that exist by key but match no target row on every
/// column at once. Comparisons are null-safe. A NULL staged into a
/// `keep_on_null` column matches and keeps whatever is stored.
fn update_changed(conn: &Connection, staging: &str, target: &TableSpec) -> rusqlite::Result<usize> {
    let tracked: Vec<&str> = target.tracked_columns().collect();
    if tracked.is_empty() {
        return Ok(0);
    }

    let assignments = tracked
        .iter()
        .map(|c| {
            if target.keeps_on_null(c) {
                format!("{c} = COALESCE(s.{c}, \"{table}\".{c})", table = target.name)
            } else {
                format!("{c} = s.{c}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let full_match = target
        .columns
        .iter()
        .map(|c| {
            if target.keeps_on_null(c) {
                format!("cur.{c} IS COALESCE(s.{c}, cur.{c})")
            } else {
                format!("cur.{c} IS s.{c}")
            }
        })
        .collect::<Vec<_>>()
        .join(" AND ");

    conn.execute(
        &format!(
            "UPDATE \"{table}\" SET {assignments}
             FROM \"{staging}\" AS s
             WHERE \"{table}\".{key} = s.{key}
               AND NOT EXISTS (SELECT 1 FROM \"{table}\" AS cur WHERE {full_match})",
            table = target.name,
            key = target.key,
        ),
        [],
    )
}
