use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Weak};

use super::errors::ConfigurationError;
use super::ids::TaskId;
use super::project::Project;
use crate::ports::TaskContext;

/// A unit of work inside a project.
///
/// The task only holds a `Weak` reference to its project: the project owns
/// the build, and a task that outlives it can no longer resolve services.
pub struct Task {
    id: TaskId,
    name: String,
    path: String,
    project: Weak<Project>,
}

impl Task {
    pub(crate) fn new(
        id: TaskId,
        name: String,
        project_name: &str,
        project: Weak<Project>,
    ) -> Self {
        let path = format!(":{project_name}:{name}");
        Self {
            id,
            name,
            path,
            project,
        }
    }

    /// A task that was never attached to a project.
    pub fn detached(id: TaskId, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = format!(":{name}");
        Self {
            id,
            name,
            path,
            project: Weak::new(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn project(&self) -> Result<Arc<Project>, ConfigurationError> {
        self.project
            .upgrade()
            .ok_or_else(|| ConfigurationError::MissingProject {
                task: self.path.clone(),
            })
    }

    /// `<project reports dir>/<task name>`
    pub fn reports_dir(&self) -> Result<PathBuf, ConfigurationError> {
        Ok(self.project()?.reports_dir().join(&self.name))
    }
}

impl TaskContext for Task {
    fn task_id(&self) -> TaskId {
        self.id
    }

    fn task_name(&self) -> &str {
        &self.name
    }

    fn task_path(&self) -> String {
        self.path.clone()
    }

    fn reports_dir(&self) -> Result<PathBuf, ConfigurationError> {
        Task::reports_dir(self)
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("path", &self.path)
            .finish()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task '{}'", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    #[test]
    fn detached_task_has_no_project() {
        let task = Task::detached(TaskId::from_ulid(Ulid::new()), "lint");
        let err = task.project().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingProject {
                task: ":lint".to_string()
            }
        );
        assert!(task.reports_dir().is_err());
    }
}
