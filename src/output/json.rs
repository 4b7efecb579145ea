use serde_json::{json, Value};

use crate::error::CoursetrackError;
use crate::form::TaskForm;
use crate::models::{Status, Task};

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &CoursetrackError) -> Value {
    let mut v = json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    });
    if !err.violations.is_empty() {
        v["error"]["violations"] = json!(err.violations);
    }
    v
}

pub fn task_summary(t: &Task) -> Value {
    json!({
        "id": t.id,
        "name": t.name,
        "status": t.status.code()
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "name": t.name,
        "status": t.status.code(),
        "status_label": t.status.label(),
        "created_at": t.created_at,
        "updated_at": t.updated_at
    })
}

pub fn choices_json() -> Value {
    let choices: Vec<Value> = Status::choices()
        .iter()
        .map(|(code, label)| json!({ "code": code, "label": label }))
        .collect();
    json!(choices)
}

/// The editable form: declared fields with their current values (null on a
/// blank form) plus the status choice table.
pub fn form_json(form: &TaskForm, task: Option<&Task>) -> Value {
    let fields: Vec<Value> = form
        .fields()
        .iter()
        .map(|&field| {
            let value = match (field, task) {
                ("name", Some(t)) => json!(t.name),
                ("status", Some(t)) => json!(t.status.code()),
                _ => Value::Null,
            };
            json!({ "field": field, "value": value })
        })
        .collect();
    json!({
        "fields": fields,
        "choices": choices_json()
    })
}
