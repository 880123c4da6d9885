use serde::Serialize;

use crate::model::activity::ActivityEntry;
use crate::model::feedback::Feedback;
use crate::model::note::Note;
use crate::model::objective::{KeyResult, Objective};
use crate::model::task::{Task, TaskStatus};
use crate::ops::dashboard::DashboardSummary;
use crate::ops::okr;
use crate::ops::routes::Resolution;
use crate::util::unicode::{fit_to_width, truncate_to_width};

/// Title column width on the board
const BOARD_TITLE_CELLS: usize = 36;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct SessionJson {
    pub authenticated: bool,
}

#[derive(Serialize)]
pub struct RouteJson {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[derive(Serialize)]
pub struct ObjectiveJson {
    pub id: i64,
    pub title: String,
    pub owner: String,
    pub due: String,
    pub progress: u8,
    pub key_results: Vec<KeyResult>,
}

#[derive(Serialize)]
pub struct OkrListJson {
    pub heading: String,
    pub objectives: Vec<ObjectiveJson>,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub priority: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub due: String,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub status: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct NoteJson {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date: String,
}

/// Printed by every mutating command under `--json`
#[derive(Serialize)]
pub struct MutationJson {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn objective_to_json(objective: &Objective) -> ObjectiveJson {
    ObjectiveJson {
        id: objective.id,
        title: objective.title.clone(),
        owner: objective.owner.clone(),
        due: objective.due.clone(),
        progress: okr::progress_percent(objective),
        key_results: objective.key_results.clone(),
    }
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id,
        title: task.title.clone(),
        status: task.status.label().to_string(),
        priority: task.priority.label().to_string(),
        due: task.due.clone(),
    }
}

pub fn column_to_json(status: TaskStatus, tasks: &[&Task]) -> ColumnJson {
    ColumnJson {
        status: status.label().to_string(),
        tasks: tasks.iter().map(|t| task_to_json(t)).collect(),
    }
}

pub fn note_to_json(note: &Note) -> NoteJson {
    NoteJson {
        id: note.id,
        title: note.title.clone(),
        content: note.content.clone(),
        tags: note.tags.clone(),
        date: note.date.clone(),
    }
}

pub fn resolution_to_json(path: &str, resolution: Resolution) -> RouteJson {
    let (render, redirect) = match resolution {
        Resolution::Render(route) => (Some(route.to_string()), None),
        Resolution::Redirect(to) => (None, Some(to.to_string())),
    };
    RouteJson {
        path: path.to_string(),
        render,
        redirect,
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

fn check_char(done: bool) -> char {
    if done { 'x' } else { ' ' }
}

/// Objective header, details line and numbered key results
pub fn format_objective(objective: &Objective) -> Vec<String> {
    let (done, total) = okr::progress(objective);
    let mut lines = vec![
        format!("{}  {}", objective.id, objective.title),
        format!(
            "    owner: {}  due: {}  progress: {}/{} ({}%)",
            objective.owner,
            objective.due,
            done,
            total,
            okr::progress_percent(objective)
        ),
    ];
    for (i, kr) in objective.key_results.iter().enumerate() {
        lines.push(format!("    [{}] {}. {}", check_char(kr.done), i + 1, kr.text));
    }
    lines
}

pub fn format_task_line(task: &Task) -> String {
    let due = if task.due.is_empty() {
        String::new()
    } else {
        format!("  due {}", task.due)
    };
    format!(
        "  {}  {}  {:<6}{}",
        task.id,
        fit_to_width(&task.title, BOARD_TITLE_CELLS),
        task.priority.label(),
        due
    )
    .trim_end()
    .to_string()
}

/// One board column: header with count, then its cards
pub fn format_column(status: TaskStatus, tasks: &[&Task]) -> Vec<String> {
    let mut lines = vec![format!("== {} ({}) ==", status, tasks.len())];
    if tasks.is_empty() {
        lines.push("  (empty)".to_string());
    }
    lines.extend(tasks.iter().map(|t| format_task_line(t)));
    lines
}

pub fn format_note(note: &Note) -> Vec<String> {
    let mut header = format!("{}  {}", note.id, note.title);
    if !note.date.is_empty() {
        header.push_str(&format!("  ({})", note.date));
    }
    let mut lines = vec![header];
    for line in note.content.lines() {
        lines.push(format!("    {}", line));
    }
    if !note.tags.is_empty() {
        let tags: Vec<String> = note.tags.iter().map(|t| format!("#{}", t)).collect();
        lines.push(format!("    {}", tags.join(" ")));
    }
    lines
}

pub fn format_activity_entry(entry: &ActivityEntry) -> String {
    format!(
        "{}  {}",
        entry.timestamp.format("%Y-%m-%d %H:%M"),
        truncate_to_width(&entry.action, 80)
    )
}

pub fn format_feedback(entry: &Feedback) -> String {
    format!("{}  [{}]  {}", entry.submitted, entry.kind, entry.message)
}

pub fn format_dashboard(summary: &DashboardSummary) -> Vec<String> {
    let mut lines = vec![
        format!("objectives: {}", summary.objectives),
        format!("tasks:      {}", summary.tasks),
        format!("notes:      {}", summary.notes),
        String::new(),
        "recent activity:".to_string(),
    ];
    if summary.recent_activity.is_empty() {
        lines.push("  (none)".to_string());
    }
    for entry in &summary.recent_activity {
        lines.push(format!("  {}", format_activity_entry(entry)));
    }
    lines
}

pub fn format_resolution(path: &str, resolution: Resolution) -> String {
    match resolution {
        Resolution::Render(route) => format!("{} -> {}", path, route),
        Resolution::Redirect(to) => format!("{} -> redirect {}", path, to),
    }
}
