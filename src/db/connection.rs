use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::CoursetrackError;

use super::schema;

const TRACKER_DIR: &str = ".coursetrack";
const DB_FILE: &str = "coursetrack.db";

/// Find the tracker root by walking up from the current directory until a
/// `.coursetrack/` directory is found.
pub fn find_tracker_root() -> Result<PathBuf, CoursetrackError> {
    let mut dir = env::current_dir().map_err(|e| CoursetrackError::database(e.to_string()))?;
    loop {
        if dir.join(TRACKER_DIR).is_dir() {
            return Ok(dir);
        }
        if !dir.pop() {
            return Err(CoursetrackError::not_initialized());
        }
    }
}

/// Get the path to the course database.
pub fn db_path() -> Result<PathBuf, CoursetrackError> {
    let root = find_tracker_root()?;
    Ok(root.join(TRACKER_DIR).join(DB_FILE))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db() -> Result<Connection, CoursetrackError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(CoursetrackError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Initialize the store under the current directory: create `.coursetrack/`,
/// the database, and the schema. Safe to run again on an existing store.
pub fn init_db() -> Result<PathBuf, CoursetrackError> {
    let cwd = env::current_dir().map_err(|e| CoursetrackError::database(e.to_string()))?;
    let dir = cwd.join(TRACKER_DIR);
    fs::create_dir_all(&dir).map_err(|e| CoursetrackError::database(e.to_string()))?;
    let path = dir.join(DB_FILE);
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    schema::init_schema(&conn)?;
    Ok(path)
}

fn configure_connection(conn: &Connection) -> Result<(), CoursetrackError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
