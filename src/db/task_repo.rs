use rusqlite::{params, Connection};

use crate::error::CoursetrackError;
use crate::models::{Status, Task, TaskDraft};

pub fn create_task(conn: &Connection, id: &str, draft: &TaskDraft) -> Result<Task, CoursetrackError> {
    conn.execute(
        "INSERT INTO tasks (id, name, status) VALUES (?1, ?2, ?3)",
        params![id, draft.name, draft.status.code()],
    )?;
    get_task_by_id(conn, id)
}

pub fn get_task_by_id(conn: &Connection, id: &str) -> Result<Task, CoursetrackError> {
    conn.query_row(
        "SELECT id, name, status, created_at, updated_at FROM tasks WHERE id = ?1",
        params![id],
        row_to_task,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => CoursetrackError::task_not_found(id),
        _ => CoursetrackError::from(e),
    })
}

/// Look a task up by its uniqueness key.
pub fn find_task_by_name(conn: &Connection, name: &str) -> Result<Option<Task>, CoursetrackError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, status, created_at, updated_at FROM tasks WHERE name = ?1",
    )?;
    let mut rows = stmt.query(params![name])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_task(row)?)),
        None => Ok(None),
    }
}

/// Uniqueness probe for validation. `exclude` is the id of the record being
/// updated, which may keep its own name.
pub fn name_in_use(
    conn: &Connection,
    name: &str,
    exclude: Option<&str>,
) -> Result<bool, CoursetrackError> {
    let count: i64 = match exclude {
        Some(id) => conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE name = ?1 AND id != ?2",
            params![name, id],
            |row| row.get(0),
        )?,
        None => conn.query_row(
            "SELECT COUNT(*) FROM tasks WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?,
    };
    Ok(count > 0)
}

/// Resolve a task reference: exact name → id prefix → name partial match.
pub fn resolve_task(conn: &Connection, reference: &str) -> Result<Task, CoursetrackError> {
    // 1. Exact name match
    if let Some(task) = find_task_by_name(conn, reference)? {
        return Ok(task);
    }

    // 2. ID prefix match
    let mut stmt = conn.prepare(
        "SELECT id, name, status, created_at, updated_at FROM tasks WHERE id LIKE ?1",
    )?;
    let prefix = format!("{reference}%");
    let tasks: Vec<Task> = stmt
        .query_map(params![prefix], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    if tasks.len() == 1 {
        return Ok(tasks.into_iter().next().unwrap());
    }
    if tasks.len() > 1 {
        let candidates: Vec<String> = tasks.iter().map(|t| format!("{} ({})", t.name, t.id)).collect();
        return Err(CoursetrackError::ambiguous_ref(reference, &candidates));
    }

    // 3. Name partial match
    let mut stmt = conn.prepare(
        "SELECT id, name, status, created_at, updated_at FROM tasks WHERE name LIKE ?1",
    )?;
    let pattern = format!("%{reference}%");
    let tasks: Vec<Task> = stmt
        .query_map(params![pattern], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;

    match tasks.len() {
        0 => Err(CoursetrackError::task_not_found(reference)),
        1 => Ok(tasks.into_iter().next().unwrap()),
        _ => {
            let candidates: Vec<String> = tasks.iter().map(|t| format!("{} ({})", t.name, t.id)).collect();
            Err(CoursetrackError::ambiguous_ref(reference, &candidates))
        }
    }
}

pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>, CoursetrackError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, status, created_at, updated_at FROM tasks ORDER BY name ASC",
    )?;
    let tasks = stmt
        .query_map([], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(tasks)
}

pub fn update_task(conn: &Connection, id: &str, draft: &TaskDraft) -> Result<Task, CoursetrackError> {
    let changed = conn.execute(
        "UPDATE tasks SET name = ?1, status = ?2, updated_at = datetime('now') WHERE id = ?3",
        params![draft.name, draft.status.code(), id],
    )?;
    if changed == 0 {
        return Err(CoursetrackError::task_not_found(id));
    }
    get_task_by_id(conn, id)
}

pub fn delete_task(conn: &Connection, id: &str) -> Result<(), CoursetrackError> {
    let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(CoursetrackError::task_not_found(id));
    }
    Ok(())
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        name: row.get(1)?,
        status: Status::from_code(&row.get::<_, String>(2)?).unwrap_or(Status::Unstarted),
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use crate::error::ErrorCode;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        schema::init_schema(&conn).expect("schema");
        conn
    }

    fn draft(name: &str, status: Status) -> TaskDraft {
        TaskDraft {
            name: name.to_string(),
            status,
        }
    }

    #[test]
    fn test_create_and_get() {
        let conn = test_conn();
        let created = create_task(&conn, "01A", &draft("Algebra I", Status::Unstarted)).unwrap();
        assert_eq!(created.name, "Algebra I");
        assert_eq!(created.status, Status::Unstarted);
        assert!(!created.created_at.is_empty());

        let fetched = get_task_by_id(&conn, "01A").unwrap();
        assert_eq!(fetched.name, "Algebra I");
    }

    #[test]
    fn test_duplicate_name_is_conflict_at_write_time() {
        let conn = test_conn();
        create_task(&conn, "01A", &draft("Algebra I", Status::Unstarted)).unwrap();
        // Straight to the store, skipping validation: the UNIQUE constraint
        // must still reject and be distinguishable from other failures.
        let err = create_task(&conn, "01B", &draft("Algebra I", Status::Finished)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NameConflict);
    }

    #[test]
    fn test_name_in_use_excludes_self() {
        let conn = test_conn();
        create_task(&conn, "01A", &draft("Algebra I", Status::Unstarted)).unwrap();
        assert!(name_in_use(&conn, "Algebra I", None).unwrap());
        assert!(!name_in_use(&conn, "Algebra I", Some("01A")).unwrap());
        assert!(name_in_use(&conn, "Algebra I", Some("01B")).unwrap());
        assert!(!name_in_use(&conn, "Geometry", None).unwrap());
    }

    #[test]
    fn test_resolve_ladder() {
        let conn = test_conn();
        create_task(&conn, "01AAA", &draft("Algebra I", Status::Unstarted)).unwrap();
        create_task(&conn, "01BBB", &draft("Algebra II", Status::Ongoing)).unwrap();
        create_task(&conn, "02CCC", &draft("Chemistry", Status::Finished)).unwrap();

        // exact name wins even though it is also a prefix of another name
        assert_eq!(resolve_task(&conn, "Algebra I").unwrap().id, "01AAA");
        // unique id prefix
        assert_eq!(resolve_task(&conn, "02").unwrap().id, "02CCC");
        // ambiguous id prefix
        let err = resolve_task(&conn, "01").unwrap_err();
        assert_eq!(err.code, ErrorCode::AmbiguousRef);
        // partial name
        assert_eq!(resolve_task(&conn, "Chem").unwrap().id, "02CCC");
        // ambiguous partial name
        let err = resolve_task(&conn, "Algebra").unwrap_err();
        assert_eq!(err.code, ErrorCode::AmbiguousRef);
        // miss
        let err = resolve_task(&conn, "Biology").unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
    }

    #[test]
    fn test_list_ordered_by_name() {
        let conn = test_conn();
        create_task(&conn, "01A", &draft("Chemistry", Status::Unstarted)).unwrap();
        create_task(&conn, "01B", &draft("Algebra I", Status::Unstarted)).unwrap();
        let names: Vec<String> = list_tasks(&conn).unwrap().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["Algebra I", "Chemistry"]);
    }

    #[test]
    fn test_update_replaces_fields() {
        let conn = test_conn();
        create_task(&conn, "01A", &draft("Algebra I", Status::Unstarted)).unwrap();
        let updated = update_task(&conn, "01A", &draft("Algebra II", Status::Ongoing)).unwrap();
        assert_eq!(updated.name, "Algebra II");
        assert_eq!(updated.status, Status::Ongoing);
        assert!(find_task_by_name(&conn, "Algebra I").unwrap().is_none());
    }

    #[test]
    fn test_update_to_taken_name_is_conflict() {
        let conn = test_conn();
        create_task(&conn, "01A", &draft("Algebra I", Status::Unstarted)).unwrap();
        create_task(&conn, "01B", &draft("Geometry", Status::Unstarted)).unwrap();
        let err = update_task(&conn, "01B", &draft("Algebra I", Status::Unstarted)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NameConflict);
    }

    #[test]
    fn test_delete_frees_name() {
        let conn = test_conn();
        create_task(&conn, "01A", &draft("Algebra I", Status::Unstarted)).unwrap();
        delete_task(&conn, "01A").unwrap();
        let err = delete_task(&conn, "01A").unwrap_err();
        assert_eq!(err.code, ErrorCode::TaskNotFound);
        // name is reusable after deletion
        create_task(&conn, "01B", &draft("Algebra I", Status::Finished)).unwrap();
    }
}
