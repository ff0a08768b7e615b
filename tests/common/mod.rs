use assert_fs::TempDir;
use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use rusqlite::{Connection, params};
use std::path::{Path, PathBuf};

// 2023-05-15 12:00:00 UTC, May in every time zone
pub const MAY_2023: i64 = 1_684_152_000;

const SCHEMA: &str = r#"
    CREATE TABLE EventTable (id INTEGER PRIMARY KEY, name TEXT);
    CREATE TABLE PhotoTable (
        id INTEGER PRIMARY KEY,
        filename TEXT UNIQUE NOT NULL,
        event_id INTEGER,
        exposure_time INTEGER,
        develop_camera_id INTEGER DEFAULT -1
    );
    CREATE TABLE BackingPhotoTable (id INTEGER PRIMARY KEY, filepath TEXT UNIQUE NOT NULL);
"#;

/// Build a Shotwell-style catalog inside `temp_dir` and return its path.
pub fn create_catalog(temp_dir: &TempDir) -> (ChildPath, Connection) {
    let db = temp_dir.child("photo.db");
    let conn = Connection::open(db.path()).unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    (db, conn)
}

pub fn add_event(conn: &Connection, id: i64, name: Option<&str>) {
    conn.execute(
        "INSERT INTO EventTable (id, name) VALUES (?1, ?2)",
        params![id, name],
    )
    .unwrap();
}

pub fn add_photo(conn: &Connection, event_id: i64, filename: &Path, backing: Option<&Path>) {
    let backing_id: Option<i64> = backing.map(|backing| {
        conn.execute(
            "INSERT INTO BackingPhotoTable (filepath) VALUES (?1)",
            params![backing.to_string_lossy().to_string()],
        )
        .unwrap();
        conn.last_insert_rowid()
    });

    conn.execute(
        "INSERT INTO PhotoTable (filename, event_id, exposure_time, develop_camera_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            filename.to_string_lossy().to_string(),
            event_id,
            MAY_2023,
            backing_id.unwrap_or(-1)
        ],
    )
    .unwrap();
}

/// Write a source file under `src/` and return its path.
pub fn source_file(temp_dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let file = temp_dir.child("src").child(name);
    file.write_str(contents).unwrap();
    file.path().to_path_buf()
}
