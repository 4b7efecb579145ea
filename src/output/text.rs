use crate::form::TaskForm;
use crate::models::{Status, Task};

pub fn print_task(t: &Task) {
    println!("Course: {} ({})", t, t.id);
    println!("  Status: {} ({})", t.status.label(), t.status.code());
    println!("  Created: {}", t.created_at);
}

pub fn print_task_list(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No courses tracked.");
        return;
    }
    for t in tasks {
        println!(
            "  [{}] {} ({})",
            t.status.code(),
            t,
            &t.id[..std::cmp::min(8, t.id.len())]
        );
    }
}

pub fn print_choices() {
    println!("Status codes:");
    for (code, label) in Status::choices() {
        println!("  {code}  {label}");
    }
}

pub fn print_form(form: &TaskForm, task: Option<&Task>) {
    println!("Fields:");
    for &field in form.fields() {
        let value = match (field, task) {
            ("name", Some(t)) => t.name.clone(),
            ("status", Some(t)) => t.status.code().to_string(),
            _ => String::new(),
        };
        println!("  {field}: {value}");
    }
    print_choices();
}
