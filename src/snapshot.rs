//! Plain-data records crossing the model boundary.
//!
//! `Snapshot` is what the model exports. `ProjectListSeed` is what it is
//! built from; ids are optional there so hand-written seeds work too.
//! Exported JSON parses as a seed unchanged.

use serde::{Deserialize, Serialize};

use crate::ids::ProjectId;
use crate::project::ProjectRecord;
use crate::task::NewTask;

/// Full outbound state of a `ProjectList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub projects: Vec<ProjectRecord>,
}

/// Inbound state for `ProjectList::from_seed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectListSeed {
    pub projects: Vec<ProjectSeed>,
}

/// Inbound project. A seed with id 0 fills the Inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSeed {
    pub id: Option<ProjectId>,
    pub name: String,
    pub tasks: Vec<NewTask>,
}

impl ProjectSeed {
    pub fn named(name: impl Into<String>) -> Self {
        ProjectSeed {
            name: name.into(),
            ..ProjectSeed::default()
        }
    }

    pub fn with_id(mut self, id: ProjectId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn task(mut self, task: NewTask) -> Self {
        self.tasks.push(task);
        self
    }
}

impl From<ProjectRecord> for ProjectSeed {
    fn from(record: ProjectRecord) -> Self {
        ProjectSeed {
            id: Some(record.id),
            name: record.name,
            tasks: record.tasks.into_iter().map(NewTask::from).collect(),
        }
    }
}

impl From<Snapshot> for ProjectListSeed {
    fn from(snapshot: Snapshot) -> Self {
        ProjectListSeed {
            projects: snapshot.projects.into_iter().map(ProjectSeed::from).collect(),
        }
    }
}
