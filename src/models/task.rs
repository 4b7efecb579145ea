use std::fmt;

use serde::{Deserialize, Serialize};

/// Course progress state. Stored and submitted as a one-letter code; the
/// label is what listings and forms display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "u")]
    Unstarted,
    #[serde(rename = "o")]
    Ongoing,
    #[serde(rename = "f")]
    Finished,
}

impl Status {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unstarted => "u",
            Self::Ongoing => "o",
            Self::Finished => "f",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unstarted => "Course not started",
            Self::Ongoing => "In progress",
            Self::Finished => "Finished",
        }
    }

    pub fn from_code(s: &str) -> Option<Self> {
        match s {
            "u" => Some(Self::Unstarted),
            "o" => Some(Self::Ongoing),
            "f" => Some(Self::Finished),
            _ => None,
        }
    }

    /// The (code, label) table handed to form rendering, in declaration order.
    pub fn choices() -> [(&'static str, &'static str); 3] {
        [
            (Self::Unstarted.code(), Self::Unstarted.label()),
            (Self::Ongoing.code(), Self::Ongoing.label()),
            (Self::Finished.code(), Self::Finished.label()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub status: Status,
    pub created_at: String,
    pub updated_at: String,
}

/// A task renders as its course name.
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A validated (name, status) pair, accepted for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub status: Status,
}
