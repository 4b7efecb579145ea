use clap::{Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "coursetrack",
    version = VERSION,
    about = "Track courses and their progress",
    after_help = "\
NOTE:
  The store lives at <dir>/.coursetrack/coursetrack.db. Commands walk up
  from the current directory to find it; run `coursetrack init` first.

STATUS CODES:
  u  Course not started
  o  In progress
  f  Finished

VALIDATION:
  Course names are required, unique, and at most 65 characters. A rejected
  submission reports every violated field, not just the first.

EXIT CODES:
  0  Success
  1  Error (validation, conflict, not found, database)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a course store under the current directory
    Init,

    #[command(flatten)]
    Task(TaskCommands),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a course
    Add {
        /// Course name (unique, at most 65 characters)
        name: String,

        /// Status code: u, o or f
        #[arg(long)]
        status: Option<String>,
    },

    /// List all courses
    List,

    /// Show course details
    Show {
        /// Course name, id prefix, or partial name
        reference: String,
    },

    /// Replace a course's name and/or status
    Update {
        /// Course name, id prefix, or partial name
        reference: String,

        /// New course name
        #[arg(long)]
        name: Option<String>,

        /// New status code: u, o or f
        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a course
    Delete {
        /// Course name, id prefix, or partial name
        reference: String,
    },

    /// Print the editable course form (blank, or filled from a course)
    Form {
        /// Course to fill the form from
        reference: Option<String>,
    },

    /// Read a form submission from stdin and create or update a course
    #[command(after_help = "\
STDIN FORMAT:
  One JSON object, e.g. {\"name\":\"Algebra I\", \"status\":\"o\"}

NOTE:
  Only the form's declared fields (name, status) are read; other keys are
  ignored. Without a reference a new course is created; with one, that
  course is updated and may keep its own name.")]
    Submit {
        /// Course to update instead of creating a new one
        reference: Option<String>,
    },
}
