//! Write operations outside the reconciliation protocol.

use rusqlite::{Connection, params};
use thiserror::Error;

use crate::sync::{SyncError, SyncSummary};

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result of a single table pass, as stored in `sync_log`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Ok,
    Failed,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Failed => "failed",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s {
            "ok" => Self::Ok,
            _ => Self::Failed,
        }
    }
}

/// One row of `sync_log`.
#[derive(Debug, Clone)]
pub struct SyncLog {
    pub id: i64,
    pub table_name: String,
    pub synced_at: String,
    pub staged: i64,
    pub inserted: i64,
    pub updated: i64,
    pub outcome: SyncOutcome,
    pub error: Option<String>,
}

impl SyncLog {
    /// Log entry for a finished pass. `synced_at` is an RFC 3339 timestamp.
    pub fn from_result(
        table: &str,
        synced_at: String,
        staged: usize,
        result: &Result<SyncSummary, SyncError>,
    ) -> Self {
        match result {
            Ok(summary) => Self {
                id: 0,
                table_name: table.to_string(),
                synced_at,
                staged: summary.staged as i64,
                inserted: summary.inserted as i64,
                updated: summary.updated as i64,
                outcome: SyncOutcome::Ok,
                error: None,
            },
            Err(e) => Self {
                id: 0,
                table_name: table.to_string(),
                synced_at,
                staged: staged as i64,
                inserted: 0,
                updated: 0,
                outcome: SyncOutcome::Failed,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Insert a sync log entry. Returns the generated ID.
pub fn insert_sync_log(conn: &Connection, log: &SyncLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO sync_log (table_name, synced_at, staged, inserted, updated, outcome, error)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            log.table_name,
            log.synced_at,
            log.staged,
            log.inserted,
            log.updated,
            log.outcome.as_str(),
            log.error,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
