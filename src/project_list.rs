//! The aggregate root: every project, and through them every task.
//!
//! # Invariants
//! - Exactly one project has id `INBOX_ID`; it is first and never removed.
//! - Task ids are unique across all projects; project ids among projects.
//! - Every operation either applies completely or returns an error and
//!   leaves the list untouched.

use chrono::{DateTime, Local, NaiveDate};
use log::{debug, warn};

use crate::dates::end_of_week;
use crate::error::{ModelError, ModelResult};
use crate::fields::{CompletionFilter, DueBucket, TaskDisposal};
use crate::ids::{AllocError, IdAllocator, ProjectId, TaskId, INBOX_ID};
use crate::project::{Project, ProjectRecord};
use crate::snapshot::{ProjectListSeed, Snapshot};
use crate::task::{is_blank, NewTask, Task, TaskEdit, TaskRecord};

pub const INBOX_NAME: &str = "Inbox";

/// Owner of all projects and of both id namespaces.
#[derive(Debug, Clone)]
pub struct ProjectList {
    projects: Vec<Project>,
    project_ids: IdAllocator,
    task_ids: IdAllocator,
}

/// One line of the project overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub task_count: usize,
    pub open_count: usize,
}

impl Default for ProjectList {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectList {
    /// A list holding only the empty Inbox.
    pub fn new() -> Self {
        let mut project_ids = IdAllocator::new();
        let inbox_id = project_ids.allocate();
        debug_assert_eq!(inbox_id, INBOX_ID);
        ProjectList {
            projects: vec![Project::new(INBOX_ID, INBOX_NAME)],
            project_ids,
            task_ids: IdAllocator::new(),
        }
    }

    /// Rebuild a list from seed data, typically a previously exported snapshot.
    ///
    /// Explicit ids are reserved before any fresh id is allocated. Records
    /// with an empty name are skipped. A record with id 0 merges into the
    /// Inbox and renames it when its name is not blank. Duplicate explicit
    /// ids, a second id-0 record included, fail with `ModelError::Alloc`.
    pub fn from_seed(seed: ProjectListSeed) -> ModelResult<Self> {
        let mut list = ProjectList::new();

        let mut projects = Vec::with_capacity(seed.projects.len());
        for mut project in seed.projects {
            if project.id != Some(INBOX_ID) && is_blank(&project.name) {
                warn!(
                    "event=seed_skip module=project_list reason=empty_project_name id={:?}",
                    project.id
                );
                continue;
            }
            project.tasks.retain(|task| {
                let keep = !is_blank(&task.name);
                if !keep {
                    warn!(
                        "event=seed_skip module=project_list reason=empty_task_name id={:?}",
                        task.id
                    );
                }
                keep
            });
            projects.push(project);
        }

        let mut inbox_seen = false;
        for project in &projects {
            match project.id {
                Some(INBOX_ID) if inbox_seen => {
                    return Err(AllocError::AlreadyInUse(INBOX_ID).into());
                }
                Some(INBOX_ID) => inbox_seen = true,
                Some(id) => list.project_ids.reserve(id)?,
                None => {}
            }
            for task in &project.tasks {
                if let Some(id) = task.id {
                    list.task_ids.reserve(id)?;
                }
            }
        }

        for seed_project in projects {
            let project_id = match seed_project.id {
                Some(id) => id,
                None => list.project_ids.allocate(),
            };
            let mut project = if project_id == INBOX_ID {
                let mut inbox = list.projects.remove(0);
                if !is_blank(&seed_project.name) {
                    inbox.set_name(seed_project.name);
                }
                inbox
            } else {
                Project::new(project_id, seed_project.name)
            };
            for draft in seed_project.tasks {
                let task_id = match draft.id {
                    Some(id) => id,
                    None => list.task_ids.allocate(),
                };
                project.adopt_task(Task::with_reserved_id(task_id, project_id, draft));
            }
            if project_id == INBOX_ID {
                list.projects.insert(0, project);
            } else {
                list.projects.push(project);
            }
        }

        debug!(
            "event=seed_load module=project_list status=ok projects={} tasks={}",
            list.projects.len(),
            list.task_ids.len()
        );
        Ok(list)
    }

    pub fn add_project(&mut self, name: &str) -> ModelResult<ProjectId> {
        if is_blank(name) {
            return Err(ModelError::EmptyName);
        }
        let id = self.project_ids.allocate();
        self.projects.push(Project::new(id, name));
        debug!("event=project_add module=project_list status=ok id={id}");
        Ok(id)
    }

    /// Delete a project, moving its tasks to the Inbox or deleting them.
    pub fn delete_project(&mut self, project_id: ProjectId, disposal: TaskDisposal) -> ModelResult<()> {
        if project_id == INBOX_ID {
            warn!("event=project_delete module=project_list status=rejected reason=inbox");
            return Err(ModelError::InboxProtected);
        }
        let index = self.position(project_id)?;
        let mut project = self.projects.remove(index);
        let tasks = project.drain_tasks();
        let task_count = tasks.len();
        match disposal {
            TaskDisposal::MoveToInbox => {
                let inbox = self.inbox_mut();
                for task in tasks {
                    inbox.adopt_task(task);
                }
            }
            TaskDisposal::Delete => {
                for task in tasks {
                    self.task_ids.release(task.id());
                }
            }
        }
        self.project_ids.release(project_id);
        debug!(
            "event=project_delete module=project_list status=ok id={project_id} tasks={task_count} disposal={disposal:?}"
        );
        Ok(())
    }

    pub fn rename_project(&mut self, project_id: ProjectId, name: &str) -> ModelResult<()> {
        if is_blank(name) {
            return Err(ModelError::EmptyName);
        }
        self.project_mut(project_id)?.set_name(name);
        debug!("event=project_rename module=project_list status=ok id={project_id}");
        Ok(())
    }

    pub fn add_task(&mut self, project_id: ProjectId, draft: NewTask) -> ModelResult<TaskId> {
        let index = self.position(project_id)?;
        let id = self.projects[index].add_task(&mut self.task_ids, draft)?;
        debug!("event=task_add module=project_list status=ok project={project_id} id={id}");
        Ok(id)
    }

    pub fn delete_task(&mut self, project_id: ProjectId, task_id: TaskId) -> ModelResult<()> {
        let index = self.position(project_id)?;
        self.projects[index].delete_task(&mut self.task_ids, task_id)?;
        debug!("event=task_delete module=project_list status=ok project={project_id} id={task_id}");
        Ok(())
    }

    pub fn edit_task(&mut self, project_id: ProjectId, task_id: TaskId, edit: TaskEdit) -> ModelResult<()> {
        self.project_mut(project_id)?.edit_task(task_id, edit)?;
        debug!("event=task_edit module=project_list status=ok project={project_id} id={task_id}");
        Ok(())
    }

    /// Toggle completion and return the new state.
    pub fn toggle_task(&mut self, project_id: ProjectId, task_id: TaskId) -> ModelResult<bool> {
        let completed = self.project_mut(project_id)?.toggle_task(task_id)?;
        debug!(
            "event=task_toggle module=project_list status=ok project={project_id} id={task_id} completed={completed}"
        );
        Ok(completed)
    }

    /// Move a task to the end of another project, keeping its id.
    ///
    /// Both projects and the task are checked before anything changes.
    /// Moving a task into the project it already lives in is a no-op.
    pub fn move_task(&mut self, from: ProjectId, task_id: TaskId, to: ProjectId) -> ModelResult<()> {
        let from_index = self.position(from)?;
        let to_index = self.position(to)?;
        if from_index == to_index {
            return self.projects[from_index].task_data(task_id).map(|_| ());
        }
        let task = self.projects[from_index].take_task(task_id)?;
        self.projects[to_index].adopt_task(task);
        debug!("event=task_move module=project_list status=ok id={task_id} from={from} to={to}");
        Ok(())
    }

    pub fn project_data(&self, project_id: ProjectId) -> ModelResult<ProjectRecord> {
        self.project(project_id).map(Project::export)
    }

    pub fn task_data(&self, project_id: ProjectId, task_id: TaskId) -> ModelResult<TaskRecord> {
        self.project(project_id)?.task_data(task_id)
    }

    /// Tasks from every project falling into `bucket` relative to `today`,
    /// in project order then task order. Undated tasks are never included.
    pub fn tasks_due(&self, bucket: DueBucket, today: NaiveDate, filter: CompletionFilter) -> Vec<TaskRecord> {
        let in_bucket = |due: NaiveDate| match bucket {
            DueBucket::Today => due <= today,
            DueBucket::ThisWeek => due <= end_of_week(today),
            DueBucket::Overdue => due < today,
        };
        self.projects
            .iter()
            .flat_map(|project| project.tasks())
            .filter(|task| task.due_date().is_some_and(in_bucket))
            .filter(|task| filter.admits(task.completed()))
            .map(Task::record)
            .collect()
    }

    /// Tasks due on or before the end of the calendar day containing `now`.
    pub fn today_view(&self, now: DateTime<Local>, filter: CompletionFilter) -> Vec<TaskRecord> {
        self.tasks_due(DueBucket::Today, now.date_naive(), filter)
    }

    pub fn project_summaries(&self) -> Vec<ProjectSummary> {
        self.projects
            .iter()
            .map(|project| ProjectSummary {
                id: project.id(),
                name: project.name().to_string(),
                task_count: project.task_count(),
                open_count: project.tasks().filter(|t| !t.completed()).count(),
            })
            .collect()
    }

    pub fn export(&self) -> Snapshot {
        Snapshot {
            projects: self.projects.iter().map(Project::export).collect(),
        }
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn task_count(&self) -> usize {
        self.projects.iter().map(Project::task_count).sum()
    }

    fn position(&self, project_id: ProjectId) -> ModelResult<usize> {
        self.projects
            .iter()
            .position(|p| p.id() == project_id)
            .ok_or(ModelError::ProjectNotFound(project_id))
    }

    fn project(&self, project_id: ProjectId) -> ModelResult<&Project> {
        let index = self.position(project_id)?;
        Ok(&self.projects[index])
    }

    fn project_mut(&mut self, project_id: ProjectId) -> ModelResult<&mut Project> {
        let index = self.position(project_id)?;
        Ok(&mut self.projects[index])
    }

    fn inbox_mut(&mut self) -> &mut Project {
        debug_assert_eq!(self.projects[0].id(), INBOX_ID);
        &mut self.projects[0]
    }
}
