//! Error types for the task model and its file store.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ids::{AllocError, ProjectId, TaskId};

/// Result type returned by every model command and query.
pub type ModelResult<T> = Result<T, ModelError>;

/// Reasons a model operation did not take effect.
///
/// All of these leave the model unchanged.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A task or project name was empty or only whitespace.
    #[error("name must not be empty")]
    EmptyName,

    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),

    #[error("task {task} not found in project {project}")]
    TaskNotFound { project: ProjectId, task: TaskId },

    /// The Inbox cannot be deleted.
    #[error("the Inbox project cannot be deleted")]
    InboxProtected,

    /// An explicit id collided with a live one (corrupt or duplicated data).
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// Errors raised while loading or saving a snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot in {} is inconsistent: {source}", .path.display())]
    Model {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Failure to turn snapshot JSON into a `ProjectList`.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ParseError {
    /// Attach the file the snapshot came from.
    pub fn at(self, path: &Path) -> StoreError {
        let path = path.to_path_buf();
        match self {
            ParseError::Json(source) => StoreError::Json { path, source },
            ParseError::Model(source) => StoreError::Model { path, source },
        }
    }
}
