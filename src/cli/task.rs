use std::io::{self, Read};

use serde_json::json;

use crate::cli::commands::TaskCommands;
use crate::db::{connection, task_repo};
use crate::error::CoursetrackError;
use crate::form::{TaskCandidate, TaskForm};
use crate::output;

pub fn run(cmd: TaskCommands, json_output: bool) -> i32 {
    let result = match cmd {
        TaskCommands::Add { name, status } => run_add(&name, status.as_deref(), json_output),
        TaskCommands::List => run_list(json_output),
        TaskCommands::Show { reference } => run_show(&reference, json_output),
        TaskCommands::Update { reference, name, status } => {
            run_update(&reference, name.as_deref(), status.as_deref(), json_output)
        }
        TaskCommands::Delete { reference } => run_delete(&reference, json_output),
        TaskCommands::Form { reference } => run_form(reference.as_deref(), json_output),
        TaskCommands::Submit { reference } => run_submit(reference.as_deref(), json_output),
    };
    match result {
        Ok(code) => code,
        Err(e) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&output::json::error(&e)).unwrap());
            } else {
                eprintln!("Error: {}", e.message);
            }
            1
        }
    }
}

fn run_add(name: &str, status: Option<&str>, json_output: bool) -> Result<i32, CoursetrackError> {
    let conn = connection::open_db()?;
    let form = TaskForm::for_task();
    let candidate = TaskCandidate::new(Some(name.to_string()), status.map(str::to_string));
    let draft = form.validate(&conn, &candidate, None)?;

    let id = ulid::Ulid::new().to_string();
    let task = task_repo::create_task(&conn, &id, &draft)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task)
            })))
            .unwrap()
        );
    } else {
        println!("Added course: {} ({})", task, task.id);
    }
    Ok(0)
}

fn run_list(json_output: bool) -> Result<i32, CoursetrackError> {
    let conn = connection::open_db()?;
    let tasks = task_repo::list_tasks(&conn)?;

    if json_output {
        let tasks_json: Vec<_> = tasks.iter().map(output::json::task_summary).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "tasks": tasks_json,
                "count": tasks.len()
            })))
            .unwrap()
        );
    } else {
        output::text::print_task_list(&tasks);
    }
    Ok(0)
}

fn run_show(reference: &str, json_output: bool) -> Result<i32, CoursetrackError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, reference)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task)
            })))
            .unwrap()
        );
    } else {
        output::text::print_task(&task);
        println!(
            "  Updated: {} ({}d ago)",
            task.updated_at,
            elapsed_days(&task.updated_at)
        );
    }
    Ok(0)
}

fn run_update(
    reference: &str,
    name: Option<&str>,
    status: Option<&str>,
    json_output: bool,
) -> Result<i32, CoursetrackError> {
    let conn = connection::open_db()?;
    let current = task_repo::resolve_task(&conn, reference)?;

    // A field left off the command line keeps its current value; the merged
    // record is validated as a whole, uniqueness excluding this task.
    let candidate = TaskCandidate::new(
        Some(name.unwrap_or(&current.name).to_string()),
        Some(
            status
                .map(str::to_string)
                .unwrap_or_else(|| current.status.code().to_string()),
        ),
    );
    let form = TaskForm::for_task();
    let draft = form.validate(&conn, &candidate, Some(&current.id))?;
    let task = task_repo::update_task(&conn, &current.id, &draft)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task)
            })))
            .unwrap()
        );
    } else {
        println!("Updated course: {} ({})", task, task.id);
    }
    Ok(0)
}

fn run_delete(reference: &str, json_output: bool) -> Result<i32, CoursetrackError> {
    let conn = connection::open_db()?;
    let task = task_repo::resolve_task(&conn, reference)?;
    task_repo::delete_task(&conn, &task.id)?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "deleted": { "id": task.id, "name": task.name }
            })))
            .unwrap()
        );
    } else {
        println!("Deleted course: {} ({})", task, task.id);
    }
    Ok(0)
}

fn run_form(reference: Option<&str>, json_output: bool) -> Result<i32, CoursetrackError> {
    let conn = connection::open_db()?;
    let task = match reference {
        Some(r) => Some(task_repo::resolve_task(&conn, r)?),
        None => None,
    };
    let form = TaskForm::for_task();

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "form": output::json::form_json(&form, task.as_ref())
            })))
            .unwrap()
        );
    } else {
        output::text::print_form(&form, task.as_ref());
    }
    Ok(0)
}

fn run_submit(reference: Option<&str>, json_output: bool) -> Result<i32, CoursetrackError> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| CoursetrackError::invalid_input(e.to_string()))?;

    let data: serde_json::Value = serde_json::from_str(&input)
        .map_err(|e| CoursetrackError::invalid_input(format!("Invalid JSON: {e}")))?;
    let Some(map) = data.as_object() else {
        return Err(CoursetrackError::invalid_input(
            "Submission must be a JSON object",
        ));
    };

    let conn = connection::open_db()?;
    let form = TaskForm::for_task();
    let candidate = form.bind(map)?;

    let (task, created) = match reference {
        Some(r) => {
            let current = task_repo::resolve_task(&conn, r)?;
            let draft = form.validate(&conn, &candidate, Some(&current.id))?;
            (task_repo::update_task(&conn, &current.id, &draft)?, false)
        }
        None => {
            let draft = form.validate(&conn, &candidate, None)?;
            let id = ulid::Ulid::new().to_string();
            (task_repo::create_task(&conn, &id, &draft)?, true)
        }
    };

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::json::success(json!({
                "task": output::json::task_json(&task),
                "created": created
            })))
            .unwrap()
        );
    } else if created {
        println!("Added course: {} ({})", task, task.id);
    } else {
        println!("Updated course: {} ({})", task, task.id);
    }
    Ok(0)
}

fn elapsed_days(timestamp: &str) -> i64 {
    let Ok(updated) = chrono::NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%d %H:%M:%S") else {
        return 0;
    };
    let now = chrono::Utc::now().naive_utc();
    (now - updated).num_days()
}
