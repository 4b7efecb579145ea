use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;

use crate::db::task_repo;
use crate::error::{CoursetrackError, FieldViolation};
use crate::models::{Status, TaskDraft};

/// Longest accepted course name, counted in characters.
pub const MAX_NAME_LEN: usize = 65;

/// The fields a task form edits. Schema additions never reach a form unless
/// they are added here.
pub const TASK_FIELDS: &[&str] = &["name", "status"];

/// Field values as submitted, before validation. `None` means the field was
/// not provided.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskCandidate {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl TaskCandidate {
    pub fn new(name: Option<String>, status: Option<String>) -> Self {
        Self { name, status }
    }
}

/// An editable form over a declared list of task fields.
#[derive(Debug, Clone)]
pub struct TaskForm {
    fields: &'static [&'static str],
}

impl TaskForm {
    pub fn new(fields: &'static [&'static str]) -> Self {
        Self { fields }
    }

    /// The standard task form: name and status.
    pub fn for_task() -> Self {
        Self::new(TASK_FIELDS)
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains(&field)
    }

    /// Bind a submitted candidate mapping. Only declared fields are read;
    /// unknown keys are ignored. Declared fields must hold text (or null):
    /// anything else is rejected before content validation.
    pub fn bind(
        &self,
        data: &serde_json::Map<String, Value>,
    ) -> Result<TaskCandidate, CoursetrackError> {
        let mut violations = Vec::new();
        let mut candidate = TaskCandidate::default();

        for &field in self.fields {
            let value = match data.get(field) {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(_) => {
                    violations.push(FieldViolation::new(field, "must be text"));
                    None
                }
            };
            match field {
                "name" => candidate.name = value,
                "status" => candidate.status = value,
                _ => {}
            }
        }

        if violations.is_empty() {
            Ok(candidate)
        } else {
            Err(CoursetrackError::validation(violations))
        }
    }

    /// Validate a candidate against every field constraint, collecting all
    /// violations rather than stopping at the first. The uniqueness check
    /// consults the store and, on update, excludes the record itself.
    pub fn validate(
        &self,
        conn: &Connection,
        candidate: &TaskCandidate,
        exclude: Option<&str>,
    ) -> Result<TaskDraft, CoursetrackError> {
        let mut violations = Vec::new();

        let name = candidate.name.as_deref().unwrap_or("").trim().to_string();
        if name.is_empty() {
            violations.push(FieldViolation::new("name", "required"));
        } else if name.chars().count() > MAX_NAME_LEN {
            violations.push(FieldViolation::new(
                "name",
                format!("must be at most {MAX_NAME_LEN} characters"),
            ));
        } else if task_repo::name_in_use(conn, &name, exclude)? {
            violations.push(FieldViolation::new(
                "name",
                "a course with this name already exists",
            ));
        }

        let status = match candidate.status.as_deref() {
            None | Some("") => {
                violations.push(FieldViolation::new("status", "required"));
                None
            }
            Some(code) => match Status::from_code(code) {
                Some(status) => Some(status),
                None => {
                    violations.push(FieldViolation::new(
                        "status",
                        format!("'{code}' is not a valid status code (expected u, o or f)"),
                    ));
                    None
                }
            },
        };

        match status {
            Some(status) if violations.is_empty() => Ok(TaskDraft { name, status }),
            _ => Err(CoursetrackError::validation(violations)),
        }
    }
}
