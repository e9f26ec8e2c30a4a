//! SQLite schema creation and migration.

use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
}

/// Current schema version. Increment when adding migrations.
pub const CURRENT_VERSION: i32 = 2;

/// Create all tables and indexes if they don't exist.
///
/// This is idempotent — safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_V1_SQL)?;
    conn.execute_batch(SYNC_LOG_SQL)?;
    set_schema_version(conn, CURRENT_VERSION)?;
    Ok(())
}

/// Open or create a sync database at the given path.
pub fn open_database(path: &std::path::Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

    let version = get_schema_version(&conn)?;
    if version == 0 {
        create_schema(&conn)?;
    } else if version < CURRENT_VERSION {
        migrate(&conn, version)?;
    } else if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }

    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn get_schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<(), SchemaError> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Run migrations from `from_version` up to `CURRENT_VERSION`.
fn migrate(conn: &Connection, from_version: i32) -> Result<(), SchemaError> {
    let mut version = from_version;
    while version < CURRENT_VERSION {
        if version == 1 {
            // v1 kept no history of sync passes.
            conn.execute_batch(SYNC_LOG_SQL)?;
        }
        version += 1;
        set_schema_version(conn, version)?;
    }

    Ok(())
}

/// Schema as it shipped in version 1. Kept for migration tests.
pub const SCHEMA_V1_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS instructor (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS course (
    crn INTEGER PRIMARY KEY,
    subject TEXT NOT NULL,
    course_num TEXT NOT NULL,
    kind TEXT NOT NULL,
    title TEXT NOT NULL,
    units TEXT NOT NULL,
    description TEXT
);
CREATE INDEX IF NOT EXISTS idx_course_subject ON course(subject, course_num);

-- Lecture-type offerings (lectures and seminars)
CREATE TABLE IF NOT EXISTS lectures (
    crn INTEGER PRIMARY KEY REFERENCES course(crn),
    section TEXT NOT NULL,
    days TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    building TEXT NOT NULL,
    room TEXT NOT NULL,
    capacity INTEGER NOT NULL,
    enrolled INTEGER NOT NULL,
    instructor_id INTEGER NOT NULL REFERENCES instructor(id)
);

-- Discussions, labs, studios and fieldwork; parent_lecture_crn 0 = unresolved
CREATE TABLE IF NOT EXISTS labs_discussions (
    crn INTEGER PRIMARY KEY REFERENCES course(crn),
    kind TEXT NOT NULL,
    section TEXT NOT NULL,
    days TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    building TEXT NOT NULL,
    room TEXT NOT NULL,
    capacity INTEGER NOT NULL,
    enrolled INTEGER NOT NULL,
    instructor_id INTEGER NOT NULL REFERENCES instructor(id),
    parent_lecture_crn INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_labs_parent ON labs_discussions(parent_lecture_crn);

CREATE TABLE IF NOT EXISTS exam (
    crn INTEGER PRIMARY KEY REFERENCES course(crn),
    kind TEXT NOT NULL,
    date TEXT NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    building TEXT NOT NULL,
    room TEXT NOT NULL
);
"#;

const SYNC_LOG_SQL: &str = r#"
-- One row per table reconciliation pass
CREATE TABLE IF NOT EXISTS sync_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    table_name TEXT NOT NULL,
    synced_at TEXT NOT NULL,
    staged INTEGER NOT NULL DEFAULT 0,
    inserted INTEGER NOT NULL DEFAULT 0,
    updated INTEGER NOT NULL DEFAULT 0,
    outcome TEXT NOT NULL,
    error TEXT
);
CREATE INDEX IF NOT EXISTS idx_sync_log_table ON sync_log(table_name, synced_at);
"#;
