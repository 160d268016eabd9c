use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Project, Task, TaskStatus};

/// Date formats accepted for deadlines, tried in order.
pub const DEADLINE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"];

/// Parse a deadline typed at the prompt. Empty input means no deadline; a
/// date is taken as the last second of that day in UTC.
pub fn parse_deadline(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    DEADLINE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|dt| Some(dt.and_utc()))
        .ok_or_else(|| "Invalid date format. Use YYYY-MM-DD, DD-MM-YYYY, etc.".to_string())
}

pub fn status_icon(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Todo => "⏳",
        TaskStatus::Doing => "🔄",
        TaskStatus::Done => "✅",
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: usize,
    pub doing: usize,
    pub done: usize,
}

impl StatusCounts {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut counts, task| {
            match task.status {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::Doing => counts.doing += 1,
                TaskStatus::Done => counts.done += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.todo + self.doing + self.done
    }

    pub fn summary(&self) -> String {
        format!("⏳ {} | 🔄 {} | ✅ {}", self.todo, self.doing, self.done)
    }
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// One-line task label used in pickers and listings.
pub fn task_line(task: &Task) -> String {
    let deadline = task
        .deadline
        .map(|d| format!(" | 📅 {}", format_timestamp(&d)))
        .unwrap_or_default();
    format!("#{}: {} {}{}", task.id, status_icon(task.status), task.title, deadline)
}

pub fn project_line(project: &Project, task_count: usize) -> String {
    format!("{}. {} ({} tasks)", project.id, project.name, task_count)
}
