use rusqlite::Connection;

use crate::error::CoursetrackError;

/// Create the schema if it does not exist. Name uniqueness is enforced here,
/// whatever the caller checked beforehand.
pub fn init_schema(conn: &Connection) -> Result<(), CoursetrackError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            status TEXT NOT NULL
                CHECK (status IN ('u', 'o', 'f')),
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}
