pub mod project;
pub mod task;

pub use project::{NewProject, Project};
pub use task::{NewTask, Task, TaskStatus};
