use anyhow::Result;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use super::format::{
    format_timestamp, parse_deadline, project_line, status_icon, task_line, StatusCounts,
};
use super::ui;
use crate::config::Limits;
use crate::error::AppError;
use crate::models::{Project, Task, TaskStatus};
use crate::services::projects::{self, CreateProject, UpdateProject};
use crate::services::tasks::{self, CreateTask, UpdateTask};
use crate::services::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};
use crate::store::{SharedStore, Store};

const MAIN_MENU: [&str; 5] = [
    "Project management",
    "Task management",
    "Switch to project",
    "Display current project tasks",
    "Exit",
];

const PROJECT_MENU: [&str; 5] = [
    "Create new project",
    "List all projects",
    "Edit project",
    "Delete project",
    "Back to main menu",
];

const TASK_MENU: [&str; 6] = [
    "Add new task",
    "List all tasks in project",
    "Edit task",
    "Change task status",
    "Delete task",
    "Back to main menu",
];

/// Print a failed service call and carry on with `None`.
pub fn reported<T>(result: Result<T, AppError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            ui::print_error(&e.message());
            None
        }
    }
}

/// Every project with its task counts, in id order.
pub async fn project_overview(
    store: &dyn Store,
) -> Result<Vec<(Project, StatusCounts)>, AppError> {
    let projects = projects::list(store).await?;
    let mut overview = Vec::with_capacity(projects.len());
    for project in projects {
        let tasks = store.list_tasks(project.id).await?;
        overview.push((project, StatusCounts::from_tasks(&tasks)));
    }
    Ok(overview)
}

pub struct Menu {
    store: SharedStore,
    limits: Limits,
    current_project: Option<i64>,
    theme: ColorfulTheme,
}

impl Menu {
    pub fn new(store: SharedStore, limits: Limits) -> Self {
        Self {
            store,
            limits,
            current_project: None,
            theme: ColorfulTheme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_banner();

        loop {
            let title = match self.current_project().await {
                Some(project) => format!("TO-DO LIST MANAGER · {}", project.name),
                None => "TO-DO LIST MANAGER".to_string(),
            };
            ui::print_section(&title);

            let choice = Select::with_theme(&self.theme)
                .with_prompt("Main menu")
                .items(&MAIN_MENU)
                .default(0)
                .interact()?;

            match choice {
                0 => self.project_menu().await?,
                1 => self.task_menu().await?,
                2 => self.switch_project().await?,
                3 => match self.current_project().await {
                    Some(project) => self.list_tasks(&project).await?,
                    None => ui::print_error("Please select a project first!"),
                },
                _ => break,
            }
        }

        println!();
        println!("{}", "👋 Thank you for using ToDo List Manager! Goodbye!".cyan());
        Ok(())
    }

    pub fn select_project(&mut self, id: i64) {
        self.current_project = Some(id);
    }

    pub fn selected_project_id(&self) -> Option<i64> {
        self.current_project
    }

    /// The selected project, clearing the selection if it no longer exists.
    /// A failed lookup is printed and keeps the selection.
    pub async fn current_project(&mut self) -> Option<Project> {
        let id = self.current_project?;
        match self.store.find_project(id).await {
            Ok(Some(project)) => Some(project),
            Ok(None) => {
                self.current_project = None;
                None
            }
            Err(e) => {
                ui::print_error(&e.message());
                None
            }
        }
    }

    async fn project_menu(&mut self) -> Result<()> {
        loop {
            ui::print_section("PROJECT MANAGEMENT");
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Projects")
                .items(&PROJECT_MENU)
                .default(0)
                .interact()?;

            match choice {
                0 => self.create_project().await?,
                1 => self.list_projects().await?,
                2 => self.edit_project().await?,
                3 => self.delete_project().await?,
                _ => return Ok(()),
            }
        }
    }

    async fn task_menu(&mut self) -> Result<()> {
        loop {
            let Some(project) = self.current_project().await else {
                ui::print_error("Please select a project first!");
                return Ok(());
            };

            ui::print_section(&format!("TASK MANAGEMENT · {}", project.name.to_uppercase()));
            let choice = Select::with_theme(&self.theme)
                .with_prompt("Tasks")
                .items(&TASK_MENU)
                .default(0)
                .interact()?;

            match choice {
                0 => self.create_task(&project).await?,
                1 => self.list_tasks(&project).await?,
                2 => self.edit_task(&project).await?,
                3 => self.change_task_status(&project).await?,
                4 => self.delete_task(&project).await?,
                _ => return Ok(()),
            }
        }
    }

    async fn create_project(&mut self) -> Result<()> {
        let name: String = Input::with_theme(&self.theme)
            .with_prompt(format!("Project name (max {MAX_NAME_LEN} chars)"))
            .interact_text()?;
        let description: String = Input::with_theme(&self.theme)
            .with_prompt(format!("Project description (optional, max {MAX_DESCRIPTION_LEN} chars)"))
            .allow_empty(true)
            .interact_text()?;

        let req = CreateProject {
            name,
            description: Some(description),
        };
        let project = match projects::create(self.store.as_ref(), &self.limits, req).await {
            Ok(project) => project,
            Err(e) => {
                ui::print_error(&format!("Error creating project: {}", e.message()));
                return Ok(());
            }
        };
        ui::print_success(&format!("Project '{}' created successfully!", project.name));

        let switch = Confirm::with_theme(&self.theme)
            .with_prompt("Switch to this project?")
            .default(true)
            .interact()?;
        if switch {
            self.current_project = Some(project.id);
            ui::print_info(&format!("Switched to project: {}", project.name));
        }
        Ok(())
    }

    async fn list_projects(&self) -> Result<()> {
        let Some(projects) = reported(project_overview(self.store.as_ref()).await) else {
            return Ok(());
        };
        if projects.is_empty() {
            ui::print_info("📭 No projects found.");
            return Ok(());
        }

        println!();
        println!("{}", format!("All projects ({})", projects.len()).bold());
        ui::print_separator();
        for (project, counts) in &projects {
            println!("ID: {}", project.id);
            println!("Name: {}", project.name.bold());
            println!("Description: {}", project.description.as_deref().unwrap_or("-"));
            println!("Tasks: 📋 Total: {} | {}", counts.total(), counts.summary());
            println!("Created: {}", format_timestamp(&project.created_at));
            ui::print_separator();
        }
        Ok(())
    }

    /// Let the user pick a project, or `None` if there are none or they cancel.
    async fn pick_project(&self, prompt: &str) -> Result<Option<Project>> {
        let Some(projects) = reported(project_overview(self.store.as_ref()).await) else {
            return Ok(None);
        };
        if projects.is_empty() {
            ui::print_warning("No projects available. Please create a project first.");
            return Ok(None);
        }

        let mut items: Vec<String> = projects
            .iter()
            .map(|(project, counts)| project_line(project, counts.total()))
            .collect();
        items.push("Cancel".to_string());

        let idx = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()?;
        Ok(projects.into_iter().nth(idx).map(|(project, _)| project))
    }

    async fn switch_project(&mut self) -> Result<()> {
        if let Some(project) = self.pick_project("Select a project").await? {
            self.select_project(project.id);
            ui::print_success(&format!("Switched to project: {}", project.name));
        }
        Ok(())
    }

    async fn edit_project(&mut self) -> Result<()> {
        let Some(project) = self.pick_project("Project to edit").await? else {
            return Ok(());
        };

        let name: String = Input::with_theme(&self.theme)
            .with_prompt("New name (Enter to keep)")
            .default(project.name.clone())
            .interact_text()?;
        let description: String = Input::with_theme(&self.theme)
            .with_prompt("New description (clear to remove)")
            .with_initial_text(project.description.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        let req = UpdateProject {
            name: Some(name),
            description: Some(description),
        };
        match projects::update(self.store.as_ref(), project.id, req).await {
            Ok(_) => ui::print_success("Project updated successfully!"),
            Err(e) => ui::print_error(&format!("Error updating project: {}", e.message())),
        }
        Ok(())
    }

    async fn delete_project(&mut self) -> Result<()> {
        let Some(project) = self.pick_project("Project to delete").await? else {
            return Ok(());
        };

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!(
                "Delete project '{}' and ALL its tasks? This cannot be undone!",
                project.name
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            ui::print_warning("Deletion cancelled.");
            return Ok(());
        }

        match projects::delete(self.store.as_ref(), project.id).await {
            Ok(()) => {
                ui::print_success("Project and all its tasks deleted successfully!");
                if self.current_project == Some(project.id) {
                    self.current_project = None;
                    ui::print_info("Current project cleared.");
                }
            }
            Err(e) => ui::print_error(&format!("Error deleting project: {}", e.message())),
        }
        Ok(())
    }

    fn prompt_deadline(&self, prompt: &str) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .validate_with(|input: &String| parse_deadline(input).map(|_| ()))
            .interact_text()?;
        parse_deadline(&raw).map_err(anyhow::Error::msg)
    }

    async fn create_task(&self, project: &Project) -> Result<()> {
        let title: String = Input::with_theme(&self.theme)
            .with_prompt(format!("Task title (max {MAX_NAME_LEN} chars)"))
            .interact_text()?;
        let description: String = Input::with_theme(&self.theme)
            .with_prompt(format!("Task description (optional, max {MAX_DESCRIPTION_LEN} chars)"))
            .allow_empty(true)
            .interact_text()?;
        let deadline = self.prompt_deadline("Deadline (optional, YYYY-MM-DD)")?;

        let req = CreateTask {
            title,
            description: Some(description),
            deadline,
        };
        match tasks::create(self.store.as_ref(), &self.limits, project.id, req).await {
            Ok(task) => {
                ui::print_success(&format!("Task '{}' created successfully!", task.title));
                println!("   Status: {}", task.status.as_str().to_uppercase());
                if let Some(deadline) = task.deadline {
                    println!("   Deadline: {}", format_timestamp(&deadline));
                }
            }
            Err(e) => ui::print_error(&format!("Error creating task: {}", e.message())),
        }
        Ok(())
    }

    async fn list_tasks(&self, project: &Project) -> Result<()> {
        let Some(tasks) = reported(tasks::list(self.store.as_ref(), project.id).await) else {
            return Ok(());
        };
        if tasks.is_empty() {
            ui::print_info(&format!("📭 No tasks found in project '{}'.", project.name));
            return Ok(());
        }

        println!();
        println!("{}", format!("Tasks in '{}' ({} total)", project.name, tasks.len()).bold());
        ui::print_separator();

        for status in TaskStatus::ALL {
            let group: Vec<&Task> = tasks.iter().filter(|t| t.status == status).collect();
            if group.is_empty() {
                continue;
            }
            println!();
            println!(
                "{} {} ({}):",
                status_icon(status),
                status.as_str().to_uppercase(),
                group.len()
            );
            for task in group {
                let deadline = task
                    .deadline
                    .map(|d| format!(" | 📅 {}", format_timestamp(&d)))
                    .unwrap_or_default();
                println!("  #{}: {}{}", task.id, task.title, deadline);
                if let Some(description) = &task.description {
                    println!("     Description: {description}");
                }
                println!("     Created: {}", format_timestamp(&task.created_at));
                if let Some(closed_at) = task.closed_at {
                    println!("     Closed: {}", format_timestamp(&closed_at));
                }
            }
        }

        println!();
        println!("📊 Summary: {}", StatusCounts::from_tasks(&tasks).summary());
        Ok(())
    }

    async fn pick_task(&self, project: &Project, prompt: &str) -> Result<Option<Task>> {
        let Some(tasks) = reported(tasks::list(self.store.as_ref(), project.id).await) else {
            return Ok(None);
        };
        if tasks.is_empty() {
            ui::print_warning("No tasks available.");
            return Ok(None);
        }

        let mut items: Vec<String> = tasks.iter().map(task_line).collect();
        items.push("Cancel".to_string());

        let idx = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&items)
            .default(0)
            .interact()?;
        Ok(tasks.into_iter().nth(idx))
    }

    async fn edit_task(&self, project: &Project) -> Result<()> {
        let Some(task) = self.pick_task(project, "Task to edit").await? else {
            return Ok(());
        };

        let title: String = Input::with_theme(&self.theme)
            .with_prompt("New title (Enter to keep)")
            .default(task.title.clone())
            .interact_text()?;
        let description: String = Input::with_theme(&self.theme)
            .with_prompt("New description (clear to remove)")
            .with_initial_text(task.description.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;
        let current_deadline = task
            .deadline
            .map(|d| format_timestamp(&d))
            .unwrap_or_else(|| "not set".to_string());
        let deadline = self.prompt_deadline(&format!(
            "New deadline (current: {current_deadline}, Enter to keep)"
        ))?;

        let req = UpdateTask {
            title: Some(title),
            description: Some(description),
            deadline,
            status: None,
        };
        match tasks::update(self.store.as_ref(), project.id, task.id, req).await {
            Ok(_) => ui::print_success("Task updated successfully!"),
            Err(e) => ui::print_error(&format!("Error updating task: {}", e.message())),
        }
        Ok(())
    }

    async fn change_task_status(&self, project: &Project) -> Result<()> {
        let Some(task) = self.pick_task(project, "Task to update").await? else {
            return Ok(());
        };

        let items: Vec<String> = TaskStatus::ALL
            .iter()
            .map(|s| format!("{} {}", status_icon(*s), s.as_str().to_uppercase()))
            .collect();
        let current = TaskStatus::ALL
            .iter()
            .position(|s| *s == task.status)
            .unwrap_or_default();
        let idx = Select::with_theme(&self.theme)
            .with_prompt("New status")
            .items(&items)
            .default(current)
            .interact()?;
        let Some(status) = TaskStatus::ALL.get(idx) else {
            return Ok(());
        };

        match tasks::change_status(self.store.as_ref(), project.id, task.id, status.as_str()).await
        {
            Ok(task) => ui::print_success(&format!(
                "Task status changed to: {} {}",
                status_icon(task.status),
                task.status.as_str().to_uppercase()
            )),
            Err(e) => ui::print_error(&format!("Error changing task status: {}", e.message())),
        }
        Ok(())
    }

    async fn delete_task(&self, project: &Project) -> Result<()> {
        let Some(task) = self.pick_task(project, "Task to delete").await? else {
            return Ok(());
        };

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(format!("Delete task '{}'?", task.title))
            .default(false)
            .interact()?;
        if !confirmed {
            ui::print_warning("Deletion cancelled.");
            return Ok(());
        }

        match tasks::delete(self.store.as_ref(), project.id, task.id).await {
            Ok(()) => ui::print_success("Task deleted successfully!"),
            Err(e) => ui::print_error(&format!("Error deleting task: {}", e.message())),
        }
        Ok(())
    }
}
