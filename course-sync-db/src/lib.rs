//! SQLite persistence layer for synchronized schedules.
//!
//! Provides schema creation, the staging-table reconciliation protocol,
//! and query APIs backed by SQLite (via rusqlite with bundled feature).
//! Every function takes the connection explicitly; there is no global
//! database handle.

pub mod operations;
pub mod queries;
pub mod schema;
pub mod sync;
pub mod tables;

pub use operations::{OperationError, SyncLog, SyncOutcome, insert_sync_log};
pub use queries::{
    CatalogStats, catalog_stats, count_rows, list_sync_logs, staging_exists,
    subcourses_for_lecture,
};
pub use schema::{SchemaError, open_database, open_memory};
pub use sync::{SyncError, SyncPhase, SyncSummary, synchronize};
pub use tables::{
    COURSE, EXAM, INSTRUCTOR, LABS_DISCUSSIONS, LECTURES, SYNC_ORDER, SyncRow, TableSpec,
};
