use chrono::{Datelike, Timelike, Utc};

use todo::cli::format::{parse_deadline, project_line, status_icon, task_line, StatusCounts};
use todo::models::{Project, Task, TaskStatus};

fn task(id: i64, status: TaskStatus) -> Task {
    Task {
        id,
        project_id: 1,
        title: format!("Task {id}"),
        description: None,
        status,
        deadline: None,
        closed_at: None,
        created_at: Utc::now(),
    }
}

#[test]
fn parse_deadline_accepts_all_supported_formats() {
    for input in ["2031-03-04", "2031/03/04", "04-03-2031", "04/03/2031"] {
        let deadline = parse_deadline(input)
            .unwrap_or_else(|e| panic!("{input}: {e}"))
            .expect("a date yields a deadline");
        assert_eq!((deadline.year(), deadline.month(), deadline.day()), (2031, 3, 4), "{input}");
        assert_eq!((deadline.hour(), deadline.minute(), deadline.second()), (23, 59, 59));
    }
}

#[test]
fn parse_deadline_treats_blank_as_none() {
    assert_eq!(parse_deadline("").unwrap(), None);
    assert_eq!(parse_deadline("   ").unwrap(), None);
}

#[test]
fn parse_deadline_rejects_garbage() {
    assert!(parse_deadline("tomorrow").is_err());
    assert!(parse_deadline("2031-13-01").is_err());
}

#[test]
fn status_counts_group_by_status() {
    let tasks = vec![
        task(1, TaskStatus::Todo),
        task(2, TaskStatus::Done),
        task(3, TaskStatus::Done),
        task(4, TaskStatus::Doing),
    ];
    let counts = StatusCounts::from_tasks(&tasks);

    assert_eq!(
        counts,
        StatusCounts {
            todo: 1,
            doing: 1,
            done: 2
        }
    );
    assert_eq!(counts.total(), 4);
    assert_eq!(counts.summary(), "⏳ 1 | 🔄 1 | ✅ 2");
}

#[test]
fn task_and_project_lines() {
    let mut t = task(7, TaskStatus::Doing);
    assert_eq!(task_line(&t), "#7: 🔄 Task 7");

    t.deadline = parse_deadline("2031-03-04").unwrap();
    assert_eq!(task_line(&t), "#7: 🔄 Task 7 | 📅 2031-03-04 23:59");

    let project = Project {
        id: 3,
        name: "Home".to_string(),
        description: None,
        created_at: Utc::now(),
    };
    assert_eq!(project_line(&project, 2), "3. Home (2 tasks)");
    assert_eq!(status_icon(TaskStatus::Done), "✅");
}

#[test]
fn status_parses_only_exact_lowercase_names() {
    assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    assert_eq!("doing".parse::<TaskStatus>().unwrap(), TaskStatus::Doing);
    assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
    for input in ["DONE", " doing ", "Todo", "closed", ""] {
        assert!(input.parse::<TaskStatus>().is_err(), "{input:?} should be rejected");
    }
}
