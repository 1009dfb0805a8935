//! Enumerations and field types shared by the model and the CLI.
//!
//! This module defines task priority, the completion policy of date views,
//! the date buckets themselves, and what happens to tasks when their
//! project is deleted.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Priority classification for a task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    #[default]
    #[serde(alias = "Low")]
    Low,
    #[serde(alias = "Medium")]
    Medium,
    #[serde(alias = "High")]
    High,
}

/// Whether completed tasks take part in a date view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionFilter {
    /// Only tasks that are not yet completed.
    #[default]
    ActiveOnly,
    /// Completed tasks are listed alongside active ones.
    IncludeCompleted,
}

impl CompletionFilter {
    pub fn from_include_completed(include: bool) -> Self {
        if include {
            CompletionFilter::IncludeCompleted
        } else {
            CompletionFilter::ActiveOnly
        }
    }

    pub fn admits(self, completed: bool) -> bool {
        match self {
            CompletionFilter::ActiveOnly => !completed,
            CompletionFilter::IncludeCompleted => true,
        }
    }
}

/// Date buckets for cross-project views. Undated tasks belong to none.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DueBucket {
    /// Due on or before the reference day.
    Today,
    /// Due on or before the Sunday closing the reference ISO week.
    ThisWeek,
    /// Due strictly before the reference day.
    Overdue,
}

/// What happens to the tasks of a project being deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskDisposal {
    /// Re-home every task in the Inbox, keeping ids and order.
    #[default]
    MoveToInbox,
    /// Delete the tasks with the project and release their ids.
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_defaults_to_low_and_orders() {
        assert_eq!(Priority::default(), Priority::Low);
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_priority_serde_names() {
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
        let p: Priority = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(p, Priority::High);
    }

    #[test]
    fn test_completion_filter_admits() {
        assert!(CompletionFilter::ActiveOnly.admits(false));
        assert!(!CompletionFilter::ActiveOnly.admits(true));
        assert!(CompletionFilter::IncludeCompleted.admits(true));
        assert_eq!(
            CompletionFilter::from_include_completed(true),
            CompletionFilter::IncludeCompleted
        );
    }
}
