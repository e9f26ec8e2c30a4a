use course_sync_db::schema::{CURRENT_VERSION, SCHEMA_V1_SQL, create_schema, get_schema_version};
use course_sync_db::{SchemaError, open_database, open_memory};

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    // Creating again should not error
    create_schema(&conn).unwrap();
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "instructor",
        "course",
        "lectures",
        "labs_discussions",
        "exam",
        "sync_log",
    ];

    for table in &tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "Table '{table}' should exist");
    }
}

#[test]
fn open_database_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule.db");

    let conn = open_database(&path).unwrap();
    assert!(path.exists());
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    drop(conn);

    // Reopening an up-to-date database leaves the version alone
    let conn = open_database(&path).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn migrates_v1_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.db");

    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(SCHEMA_V1_SQL).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (1)", [])
            .unwrap();
        conn.execute("INSERT INTO instructor (id, name) VALUES (1, 'Staff')", [])
            .unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);

    let has_log: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='sync_log')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(has_log);

    // Existing data survives the migration
    let name: String = conn
        .query_row("SELECT name FROM instructor WHERE id = 1", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(name, "Staff");
}

#[test]
fn newer_database_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    {
        let conn = open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }

    match open_database(&path) {
        Err(SchemaError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_VERSION);
            assert_eq!(found, CURRENT_VERSION + 1);
        }
        other => panic!("expected version mismatch, got {other:?}"),
    }
}
