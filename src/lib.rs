//! # todo_projects
//!
//! A personal task tracker: projects holding tasks with due dates,
//! priorities and a completion flag, plus a permanent Inbox project.
//!
//! ## Key Features
//!
//! - **Owned model**: `ProjectList` owns every `Project`, each project owns
//!   its tasks. Callers only ever see plain records (`TaskRecord`,
//!   `ProjectRecord`, `Snapshot`).
//! - **Small, stable ids**: freed ids are reused before new ones are issued,
//!   and persisted ids survive a reload.
//! - **Cross-project moves** that keep the task id.
//! - **Date views**: due today or earlier, due this week, overdue.
//! - **JSON storage** of the exported snapshot, with lenient date parsing.
//!
//! ## Quick Start
//!
//! ```
//! use todo_projects::{NewTask, ProjectList, TaskDisposal, INBOX_ID};
//!
//! let mut list = ProjectList::new();
//! let work = list.add_project("Work").unwrap();
//! let task = list.add_task(work, NewTask::named("Ship")).unwrap();
//! list.move_task(work, task, INBOX_ID).unwrap();
//! list.delete_project(work, TaskDisposal::MoveToInbox).unwrap();
//! assert_eq!(list.task_data(INBOX_ID, task).unwrap().project_id, INBOX_ID);
//! ```
//!
//! Every command and query returns `ModelResult`; a missing project or task
//! is an `Err`, never a panic.

pub mod dates;
pub mod error;
pub mod fields;
pub mod ids;
pub mod logging;
pub mod project;
pub mod project_list;
pub mod snapshot;
pub mod store;
pub mod task;

pub use error::{ModelError, ModelResult, ParseError, StoreError};
pub use fields::{CompletionFilter, DueBucket, Priority, TaskDisposal};
pub use ids::{AllocError, IdAllocator, ProjectId, TaskId, INBOX_ID};
pub use project::{Project, ProjectRecord};
pub use project_list::{ProjectList, ProjectSummary, INBOX_NAME};
pub use snapshot::{ProjectListSeed, ProjectSeed, Snapshot};
pub use task::{NewTask, Task, TaskEdit, TaskRecord};
