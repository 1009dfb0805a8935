//! Task data structure and related functionality.
//!
//! A `Task` is owned by exactly one `Project` and never leaves it by
//! reference: callers see `TaskRecord` snapshots, feed `NewTask` records
//! in, and change tasks through `TaskEdit` forms.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::{lenient_due_date, parse_due_input};
use crate::error::{ModelError, ModelResult};
use crate::fields::Priority;
use crate::ids::{IdAllocator, ProjectId, TaskId};

/// A single to-do item.
#[derive(Debug, Clone)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    name: String,
    description: Option<String>,
    creation_date: DateTime<Utc>,
    due_date: Option<NaiveDate>,
    completed: bool,
    priority: Priority,
}

/// Immutable snapshot of a task, as exported to callers and storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub creation_date: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub priority: Priority,
}

/// Inbound task data.
///
/// `id` and `creation_date` are only set when restoring persisted tasks;
/// left empty, a fresh id is allocated and the creation time is now.
/// Any `project_id` in the source data is ignored: the receiving project
/// stamps its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewTask {
    pub id: Option<TaskId>,
    pub name: String,
    pub description: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "lenient_due_date")]
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub priority: Priority,
}

impl NewTask {
    pub fn named(name: impl Into<String>) -> Self {
        NewTask {
            name: name.into(),
            ..NewTask::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Set the due date from user text; unparseable text leaves it unset.
    pub fn due_input(mut self, input: &str, today: NaiveDate) -> Self {
        self.due_date = parse_due_input(input, today);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn created_at(mut self, creation_date: DateTime<Utc>) -> Self {
        self.creation_date = Some(creation_date);
        self
    }
}

impl From<TaskRecord> for NewTask {
    fn from(record: TaskRecord) -> Self {
        NewTask {
            id: Some(record.id),
            name: record.name,
            description: record.description,
            creation_date: Some(record.creation_date),
            due_date: record.due_date,
            completed: record.completed,
            priority: record.priority,
        }
    }
}

/// Edit form for an existing task.
///
/// Mirrors a submitted form: a missing or empty `description` or
/// `due_date` clears the stored value. `name` and `priority` are kept when
/// absent, and an empty `name` rejects the whole edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    pub name: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl Task {
    /// Build a task for `project_id`, reserving `draft.id` or allocating one.
    ///
    /// The allocator is untouched when the name is rejected.
    pub fn create(ids: &mut IdAllocator, project_id: ProjectId, draft: NewTask) -> ModelResult<Task> {
        if is_blank(&draft.name) {
            return Err(ModelError::EmptyName);
        }
        let id = match draft.id {
            Some(id) => {
                ids.reserve(id)?;
                id
            }
            None => ids.allocate(),
        };
        Ok(Task::with_reserved_id(id, project_id, draft))
    }

    /// Build a task whose id the caller has already reserved. `draft.id`
    /// is ignored and the name is assumed to be validated.
    pub(crate) fn with_reserved_id(id: TaskId, project_id: ProjectId, draft: NewTask) -> Task {
        Task {
            id,
            project_id,
            name: draft.name,
            description: non_empty(draft.description),
            creation_date: draft.creation_date.unwrap_or_else(Utc::now),
            due_date: draft.due_date,
            completed: draft.completed,
            priority: draft.priority,
        }
    }

    /// Flip the completion flag and return the new value.
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }

    /// Apply an edit form in place (see `TaskEdit` for the clearing rules).
    pub fn edit(&mut self, edit: TaskEdit) -> ModelResult<()> {
        if let Some(name) = &edit.name {
            if is_blank(name) {
                return Err(ModelError::EmptyName);
            }
        }
        if let Some(name) = edit.name {
            self.name = name;
        }
        self.description = non_empty(edit.description);
        self.due_date = edit.due_date;
        if let Some(priority) = edit.priority {
            self.priority = priority;
        }
        Ok(())
    }

    pub fn record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id,
            project_id: self.project_id,
            name: self.name.clone(),
            description: self.description.clone(),
            creation_date: self.creation_date,
            due_date: self.due_date,
            completed: self.completed,
            priority: self.priority,
        }
    }

    /// Overdue once the due day has fully passed. Completed and undated
    /// tasks are never overdue.
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        overdue(self.due_date, self.completed, today)
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(Local::now().date_naive())
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub(crate) fn set_project_id(&mut self, project_id: ProjectId) {
        self.project_id = project_id;
    }
}

impl TaskRecord {
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        overdue(self.due_date, self.completed, today)
    }
}

fn overdue(due_date: Option<NaiveDate>, completed: bool, today: NaiveDate) -> bool {
    match due_date {
        Some(due) if !completed => due < today,
        _ => false,
    }
}

pub(crate) fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_applies_defaults() {
        let mut ids = IdAllocator::new();
        let task = Task::create(&mut ids, 4, NewTask::named("Write report")).unwrap();
        assert_eq!(task.id(), 0);
        assert_eq!(task.project_id(), 4);
        assert_eq!(task.description(), None);
        assert_eq!(task.due_date(), None);
        assert!(!task.completed());
        assert_eq!(task.priority(), Priority::Low);
    }

    #[test]
    fn test_create_rejects_blank_name_without_allocating() {
        let mut ids = IdAllocator::new();
        assert_eq!(
            Task::create(&mut ids, 0, NewTask::named("   ")).unwrap_err(),
            ModelError::EmptyName
        );
        assert!(ids.is_empty());
    }

    #[test]
    fn test_create_with_explicit_id_reserves_it() {
        let mut ids = IdAllocator::new();
        let task = Task::create(&mut ids, 0, NewTask::named("a").with_id(5)).unwrap();
        assert_eq!(task.id(), 5);
        assert!(ids.is_in_use(5));
        assert_eq!(
            Task::create(&mut ids, 0, NewTask::named("b").with_id(5)).unwrap_err(),
            ModelError::Alloc(crate::ids::AllocError::AlreadyInUse(5))
        );
    }

    #[test]
    fn test_create_keeps_given_creation_date() {
        let mut ids = IdAllocator::new();
        let created = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        let task = Task::create(&mut ids, 0, NewTask::named("a").created_at(created)).unwrap();
        assert_eq!(task.record().creation_date, created);
    }

    #[test]
    fn test_malformed_due_input_means_no_due_date() {
        let draft = NewTask::named("a").due_input("someday", date(2024, 5, 15));
        assert_eq!(draft.due_date, None);
    }

    #[test]
    fn test_toggle_flips_both_ways() {
        let mut ids = IdAllocator::new();
        let mut task = Task::create(&mut ids, 0, NewTask::named("a")).unwrap();
        assert!(task.toggle_completed());
        assert!(!task.toggle_completed());
    }

    #[test]
    fn test_edit_clears_absent_description_and_due() {
        let mut ids = IdAllocator::new();
        let draft = NewTask::named("a")
            .description("details")
            .due(date(2024, 5, 1))
            .priority(Priority::High);
        let mut task = Task::create(&mut ids, 0, draft).unwrap();

        task.edit(TaskEdit::default()).unwrap();

        assert_eq!(task.name(), "a");
        assert_eq!(task.description(), None);
        assert_eq!(task.due_date(), None);
        assert_eq!(task.priority(), Priority::High);
    }

    #[test]
    fn test_edit_with_empty_name_changes_nothing() {
        let mut ids = IdAllocator::new();
        let mut task = Task::create(&mut ids, 0, NewTask::named("a").description("keep")).unwrap();
        let edit = TaskEdit {
            name: Some(String::new()),
            ..TaskEdit::default()
        };
        assert_eq!(task.edit(edit), Err(ModelError::EmptyName));
        assert_eq!(task.name(), "a");
        assert_eq!(task.description(), Some("keep"));
    }

    #[test]
    fn test_overdue() {
        let mut ids = IdAllocator::new();
        let today = date(2024, 5, 15);
        let mut task = Task::create(&mut ids, 0, NewTask::named("a").due(date(2024, 5, 14))).unwrap();
        assert!(task.is_overdue_on(today));
        assert!(!task.is_overdue_on(date(2024, 5, 14)));
        task.toggle_completed();
        assert!(!task.is_overdue_on(today));

        let undated = Task::create(&mut ids, 0, NewTask::named("b")).unwrap();
        assert!(!undated.is_overdue_on(today));
    }

    #[test]
    fn test_record_is_a_detached_copy() {
        let mut ids = IdAllocator::new();
        let mut task = Task::create(&mut ids, 0, NewTask::named("a")).unwrap();
        let mut record = task.record();
        record.name = "changed".into();
        task.toggle_completed();
        assert_eq!(task.name(), "a");
        assert!(!record.completed);
    }
}
