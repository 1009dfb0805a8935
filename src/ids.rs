//! Identifier allocation for tasks and projects.
//!
//! Each namespace (tasks, projects) gets its own `IdAllocator`. Ids stay
//! small across long sessions because released ids are handed out again
//! before the allocator moves past them.

use std::collections::BTreeSet;

use thiserror::Error;

/// Identifier of a task. Unique across all projects of one `ProjectList`.
pub type TaskId = u64;

/// Identifier of a project.
pub type ProjectId = u64;

/// Reserved id of the permanent Inbox project.
pub const INBOX_ID: ProjectId = 0;

/// Misuse of an allocator by its caller.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AllocError {
    /// The id is already held by a live entity in this namespace.
    #[error("id {0} is already in use")]
    AlreadyInUse(u64),
}

/// Issues and reclaims ids within one namespace.
///
/// Every id below `cursor` is in use, so `allocate` only has to scan
/// forward from the cursor past explicitly reserved ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    cursor: u64,
    in_use: BTreeSet<u64>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the lowest free id at or after the cursor and mark it used.
    pub fn allocate(&mut self) -> u64 {
        let mut id = self.cursor;
        while self.in_use.contains(&id) {
            id += 1;
        }
        self.in_use.insert(id);
        self.cursor = id + 1;
        id
    }

    /// Mark an explicit id (usually loaded from storage) as used.
    ///
    /// The cursor is left alone so lower free ids remain available.
    pub fn reserve(&mut self, id: u64) -> Result<(), AllocError> {
        if !self.in_use.insert(id) {
            return Err(AllocError::AlreadyInUse(id));
        }
        Ok(())
    }

    /// Return an id to the pool. Returns `false` if it was not in use.
    pub fn release(&mut self, id: u64) -> bool {
        if !self.in_use.remove(&id) {
            return false;
        }
        if id < self.cursor {
            self.cursor = id;
        }
        true
    }

    pub fn is_in_use(&self, id: u64) -> bool {
        self.in_use.contains(&id)
    }

    /// Number of live ids.
    pub fn len(&self) -> usize {
        self.in_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_use.is_empty()
    }
}
