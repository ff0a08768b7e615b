use crate::export_core::error::{ExportError, Result};
use crate::export_core::event::{Event, PhotoRecord};
use rusqlite::{Connection, OpenFlags, params};
use std::path::{Path, PathBuf};

/// Read-only view of a Shotwell catalog database.
pub struct Catalog {
    path: PathBuf,
    conn: Connection,
}

impl Catalog {
    /// Open the catalog at the specified path without write access.
    /// Fails with `CatalogUnavailable` if the file is missing or has no event table.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ExportError::CatalogUnavailable {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| unavailable(path, e))?;

        // Opening is lazy in SQLite; touch the schema to catch non-catalog files early
        conn.query_row("SELECT COUNT(*) FROM EventTable", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| unavailable(path, e))?;

        log::debug!("Opened catalog {}", path.display());

        Ok(Catalog {
            path: path.to_path_buf(),
            conn,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All events, ordered by catalog id.
    pub fn events(&self) -> Result<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM EventTable ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Event {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row?);
        }

        Ok(events)
    }

    /// Earliest known exposure time (unix seconds) among the event's photos.
    pub fn earliest_exposure(&self, event_id: i64) -> Result<Option<i64>> {
        let earliest: Option<i64> = self.conn.query_row(
            "SELECT MIN(exposure_time)
             FROM PhotoTable
             WHERE event_id = ?1 AND exposure_time IS NOT NULL",
            params![event_id],
            |row| row.get(0),
        )?;

        Ok(earliest)
    }

    /// Photos of an event with the path of their developed backing file, if any.
    pub fn photos(&self, event_id: i64) -> Result<Vec<PhotoRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT PhotoTable.filename, BackingPhotoTable.filepath
             FROM PhotoTable
             LEFT OUTER JOIN BackingPhotoTable
             ON BackingPhotoTable.id = PhotoTable.develop_camera_id
             WHERE PhotoTable.event_id = ?1
             ORDER BY PhotoTable.id",
        )?;

        let rows = stmt.query_map(params![event_id], |row| {
            let source: String = row.get(0)?;
            let backing: Option<String> = row.get(1)?;
            Ok(PhotoRecord {
                source: PathBuf::from(source),
                backing: backing.filter(|p| !p.is_empty()).map(PathBuf::from),
            })
        })?;

        let mut photos = Vec::new();
        for row in rows {
            photos.push(row?);
        }

        Ok(photos)
    }
}

fn unavailable(path: &Path, error: rusqlite::Error) -> ExportError {
    ExportError::CatalogUnavailable {
        path: path.to_path_buf(),
        reason: error.to_string(),
    }
}
