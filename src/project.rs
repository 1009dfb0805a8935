//! Projects: named, ordered collections of tasks.
//!
//! A project owns its tasks outright. Task ids come from the allocator of
//! the owning `ProjectList`, which is passed in for every operation that
//! creates or destroys a task.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::ids::{IdAllocator, ProjectId, TaskId};
use crate::task::{NewTask, Task, TaskEdit, TaskRecord};

/// A named list of tasks in display order.
///
/// Every task held here has `project_id() == self.id()`.
#[derive(Debug, Clone)]
pub struct Project {
    id: ProjectId,
    name: String,
    tasks: Vec<Task>,
}

/// Snapshot of a project and all of its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub tasks: Vec<TaskRecord>,
}

impl Project {
    pub(crate) fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Project {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Create a task at the end of the list and return its id.
    pub fn add_task(&mut self, ids: &mut IdAllocator, draft: NewTask) -> ModelResult<TaskId> {
        let task = Task::create(ids, self.id, draft)?;
        let id = task.id();
        self.tasks.push(task);
        Ok(id)
    }

    /// Remove a task and give its id back to the allocator.
    pub fn delete_task(&mut self, ids: &mut IdAllocator, task_id: TaskId) -> ModelResult<()> {
        let task = self.take_task(task_id)?;
        ids.release(task.id());
        Ok(())
    }

    /// Toggle completion and return the new state.
    pub fn toggle_task(&mut self, task_id: TaskId) -> ModelResult<bool> {
        Ok(self.find_mut(task_id)?.toggle_completed())
    }

    pub fn edit_task(&mut self, task_id: TaskId, edit: TaskEdit) -> ModelResult<()> {
        self.find_mut(task_id)?.edit(edit)
    }

    pub fn task_data(&self, task_id: TaskId) -> ModelResult<TaskRecord> {
        self.find(task_id).map(Task::record)
    }

    pub fn export(&self) -> ProjectRecord {
        ProjectRecord {
            id: self.id,
            name: self.name.clone(),
            tasks: self.tasks.iter().map(Task::record).collect(),
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(Task::id).collect()
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub(crate) fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Detach a task without releasing its id. Used for moves.
    pub(crate) fn take_task(&mut self, task_id: TaskId) -> ModelResult<Task> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id() == task_id)
            .ok_or(self.task_not_found(task_id))?;
        Ok(self.tasks.remove(index))
    }

    /// Append a task whose id is already reserved, re-stamping its owner.
    pub(crate) fn adopt_task(&mut self, mut task: Task) {
        task.set_project_id(self.id);
        self.tasks.push(task);
    }

    pub(crate) fn drain_tasks(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    fn find(&self, task_id: TaskId) -> ModelResult<&Task> {
        self.tasks
            .iter()
            .find(|t| t.id() == task_id)
            .ok_or(self.task_not_found(task_id))
    }

    fn find_mut(&mut self, task_id: TaskId) -> ModelResult<&mut Task> {
        let not_found = self.task_not_found(task_id);
        self.tasks
            .iter_mut()
            .find(|t| t.id() == task_id)
            .ok_or(not_found)
    }

    fn task_not_found(&self, task_id: TaskId) -> ModelError {
        ModelError::TaskNotFound {
            project: self.id,
            task: task_id,
        }
    }
}
