use serde::{Deserialize, Serialize};
use std::fmt;

/// Column a task lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    /// Board order, left to right.
    pub const ALL: [Status; 3] = [Status::ToDo, Status::InProgress, Status::Done];

    pub fn label(self) -> &'static str {
        match self {
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Status::ToDo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Status> {
        Self::ALL.get(index).copied()
    }

    /// Neighbouring column, clamped at both ends of the board.
    pub fn shifted(self, direction: isize) -> Status {
        let index = (self.index() as isize + direction).clamp(0, Self::ALL.len() as isize - 1);
        Self::ALL[index as usize]
    }

    /// Next value in selector order, wrapping around.
    pub fn cycled(self, direction: isize) -> Status {
        let len = Self::ALL.len() as isize;
        let index = (self.index() as isize + direction).rem_euclid(len);
        Self::ALL[index as usize]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque task identifier. Never reassigned once a task exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The mutable part of a task, as collected by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    pub name: String,
    pub due_date: String,
    pub status: Status,
}

impl TaskFields {
    pub fn new(name: impl Into<String>, due_date: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            due_date: due_date.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub due_date: String, // ISO date, "YYYY-MM-DD"
    pub status: Status,
}

impl Task {
    pub fn new(id: TaskId, fields: TaskFields) -> Self {
        Self {
            id,
            name: fields.name,
            due_date: fields.due_date,
            status: fields.status,
        }
    }

    pub fn fields(&self) -> TaskFields {
        TaskFields {
            name: self.name.clone(),
            due_date: self.due_date.clone(),
            status: self.status,
        }
    }

    /// Replaces name, due date and status; the id stays.
    pub fn apply(&mut self, fields: TaskFields) {
        self.name = fields.name;
        self.due_date = fields.due_date;
        self.status = fields.status;
    }
}
