use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::{Record, RecordId};

/// Storage key for the backlog collection
pub const TASKS_KEY: &str = "pmLite_backlog_tasks";

/// Board column a task sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    Todo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Fixed column order of the board
    pub const COLUMNS: [TaskStatus; 3] = [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Parse a user-supplied status. Accepts the labels and the short
    /// forms `todo`, `in-progress`/`doing`, `done` in any case.
    pub fn parse_status(s: &str) -> Option<TaskStatus> {
        let norm: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        match norm.as_str() {
            "todo" => Some(TaskStatus::Todo),
            "inprogress" | "doing" => Some(TaskStatus::InProgress),
            "done" => Some(TaskStatus::Done),
            _ => None,
        }
    }

    /// Column to the left, if any
    pub fn prev(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Todo => None,
            TaskStatus::InProgress => Some(TaskStatus::Todo),
            TaskStatus::Done => Some(TaskStatus::InProgress),
        }
    }

    /// Column to the right, if any
    pub fn next(self) -> Option<TaskStatus> {
        match self {
            TaskStatus::Todo => Some(TaskStatus::InProgress),
            TaskStatus::InProgress => Some(TaskStatus::Done),
            TaskStatus::Done => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn parse_priority(s: &str) -> Option<Priority> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" | "h" => Some(Priority::High),
            "medium" | "med" | "m" => Some(Priority::Medium),
            "low" | "l" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A card on the backlog board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    /// `YYYY-MM-DD`, or empty when unset
    #[serde(default)]
    pub due: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due: String,
}

impl Default for TaskDraft {
    fn default() -> Self {
        TaskDraft {
            title: String::new(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            due: String::new(),
        }
    }
}

impl Record for Task {
    type Draft = TaskDraft;

    const STORAGE_KEY: &'static str = TASKS_KEY;
    const NOUN: &'static str = "task";

    fn id(&self) -> RecordId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn seed() -> Vec<Self> {
        let task = |id, title: &str, status, priority, due: &str| Task {
            id,
            title: title.into(),
            status,
            priority,
            due: due.into(),
        };
        vec![
            task(1, "Set up CI pipeline", TaskStatus::Todo, Priority::High, "2024-04-28"),
            task(2, "Fix login bug", TaskStatus::InProgress, Priority::Medium, "2024-04-25"),
            task(3, "Write test cases", TaskStatus::Todo, Priority::Low, "2024-05-02"),
            task(4, "Deploy to staging", TaskStatus::Done, Priority::High, "2024-04-20"),
        ]
    }

    fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            status: self.status,
            priority: self.priority,
            due: self.due.clone(),
        }
    }

    fn from_draft(draft: &TaskDraft, id: RecordId, _existing: Option<&Self>) -> Option<Self> {
        if draft.title.trim().is_empty() {
            return None;
        }
        Some(Task {
            id,
            title: draft.title.clone(),
            status: draft.status,
            priority: draft.priority,
            due: draft.due.clone(),
        })
    }
}
