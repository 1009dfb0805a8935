//! Command implementations for the CLI interface.
//!
//! Each handler loads nothing itself: `run` loads the project list once,
//! dispatches, and saves again after any command that changed it.

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::{Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::warn;

use todo_projects::dates::{format_due_relative, parse_due_input};
use todo_projects::store;
use todo_projects::{
    CompletionFilter, DueBucket, NewTask, Priority, ProjectId, ProjectList, TaskDisposal,
    TaskEdit, TaskId, TaskRecord, INBOX_ID,
};

pub type CmdResult = Result<(), Box<dyn Error>>;

#[derive(Subcommand)]
pub enum Commands {
    /// List projects with their task counts.
    Projects,

    /// Add, rename or delete a project.
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Add a new task.
    Add {
        /// Short name for the task.
        name: String,
        /// Project id (defaults to the Inbox).
        #[arg(long, default_value_t = INBOX_ID)]
        project: ProjectId,
        /// Optional longer description.
        #[arg(long)]
        desc: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", "friday", or "in Nd".
        #[arg(long)]
        due: Option<String>,
        /// Priority: low | medium | high.
        #[arg(long, value_enum, default_value_t = Priority::Low)]
        priority: Priority,
    },

    /// List tasks, optionally limited to one project or a due-date bucket.
    List {
        /// Only tasks of this project.
        #[arg(long)]
        project: Option<ProjectId>,
        /// Due filter: today | this-week | overdue.
        #[arg(long, value_enum)]
        due: Option<DueBucket>,
        /// Include completed tasks.
        #[arg(long)]
        all: bool,
    },

    /// Tasks due today or earlier, across all projects.
    Today {
        /// Include completed tasks.
        #[arg(long)]
        all: bool,
    },

    /// Show a single task.
    View { project: ProjectId, task: TaskId },

    /// Edit a task like a form submission.
    ///
    /// Omitting --desc or --due clears the stored value; omitting --name or
    /// --priority keeps it.
    Edit {
        project: ProjectId,
        task: TaskId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        due: Option<String>,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },

    /// Toggle a task between active and completed.
    Toggle { project: ProjectId, task: TaskId },

    /// Move a task to another project, keeping its id.
    Move {
        from: ProjectId,
        task: TaskId,
        to: ProjectId,
    },

    /// Delete a task.
    Delete { project: ProjectId, task: TaskId },

    /// Print the full JSON snapshot, or write it to a file.
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replace the database with a JSON snapshot file.
    Import { input: PathBuf },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ProjectAction {
    /// Create a project.
    Add { name: String },
    /// Rename a project.
    Rename { id: ProjectId, name: String },
    /// Delete a project. Its tasks move to the Inbox unless --delete-tasks.
    Delete {
        id: ProjectId,
        #[arg(long)]
        delete_tasks: bool,
    },
}

/// Load the database, run one command, and save it if it changed.
pub fn run(command: Commands, db_path: &Path) -> CmdResult {
    let mut list = store::load(db_path)?;
    let today = Local::now().date_naive();

    let changed = match command {
        Commands::Projects => {
            cmd_projects(&list);
            false
        }
        Commands::Project { action } => {
            cmd_project(&mut list, action)?;
            true
        }
        Commands::Add { name, project, desc, due, priority } => {
            cmd_add(&mut list, today, name, project, desc, due, priority)?;
            true
        }
        Commands::List { project, due, all } => {
            cmd_list(&list, today, project, due, all)?;
            false
        }
        Commands::Today { all } => {
            cmd_list(&list, today, None, Some(DueBucket::Today), all)?;
            false
        }
        Commands::View { project, task } => {
            cmd_view(&list, today, project, task)?;
            false
        }
        Commands::Edit { project, task, name, desc, due, priority } => {
            cmd_edit(&mut list, today, project, task, name, desc, due, priority)?;
            true
        }
        Commands::Toggle { project, task } => {
            let completed = list.toggle_task(project, task)?;
            println!("Task {task} is now {}", if completed { "done" } else { "open" });
            true
        }
        Commands::Move { from, task, to } => {
            list.move_task(from, task, to)?;
            println!("Moved task {task} to project {to}");
            true
        }
        Commands::Delete { project, task } => {
            list.delete_task(project, task)?;
            println!("Deleted task {task}");
            true
        }
        Commands::Export { output } => {
            cmd_export(&list, output)?;
            false
        }
        Commands::Import { input } => {
            list = cmd_import(&input)?;
            true
        }
        Commands::Completions { shell } => {
            cmd_completions(shell);
            false
        }
    };

    if changed {
        store::save(&list, db_path)?;
    }
    Ok(())
}

/// List all projects with task counts.
pub fn cmd_projects(list: &ProjectList) {
    println!("{:<5} {:<24} {:>5} {:>5}", "ID", "Project", "Open", "All");
    for summary in list.project_summaries() {
        println!(
            "{:<5} {:<24} {:>5} {:>5}",
            summary.id,
            truncate(&summary.name, 24),
            summary.open_count,
            summary.task_count
        );
    }
}

/// Handle project management commands.
pub fn cmd_project(list: &mut ProjectList, action: ProjectAction) -> CmdResult {
    match action {
        ProjectAction::Add { name } => {
            let id = list.add_project(&name)?;
            println!("Added project {id}");
        }
        ProjectAction::Rename { id, name } => {
            list.rename_project(id, &name)?;
            println!("Renamed project {id}");
        }
        ProjectAction::Delete { id, delete_tasks } => {
            let disposal = if delete_tasks {
                TaskDisposal::Delete
            } else {
                TaskDisposal::MoveToInbox
            };
            list.delete_project(id, disposal)?;
            println!("Deleted project {id}");
        }
    }
    Ok(())
}

/// Add a new task to a project.
pub fn cmd_add(
    list: &mut ProjectList,
    today: NaiveDate,
    name: String,
    project: ProjectId,
    desc: Option<String>,
    due: Option<String>,
    priority: Priority,
) -> CmdResult {
    let mut draft = NewTask::named(name).priority(priority);
    draft.description = desc;
    if let Some(due) = due {
        draft.due_date = parse_due(&due, today);
    }
    let id = list.add_task(project, draft)?;
    println!("Added task {id}");
    Ok(())
}

/// List tasks with optional project and due-date filtering.
pub fn cmd_list(
    list: &ProjectList,
    today: NaiveDate,
    project: Option<ProjectId>,
    due: Option<DueBucket>,
    all: bool,
) -> CmdResult {
    let filter = CompletionFilter::from_include_completed(all);
    let mut tasks: Vec<TaskRecord> = match due {
        Some(bucket) => list.tasks_due(bucket, today, filter),
        None => list
            .export()
            .projects
            .into_iter()
            .flat_map(|p| p.tasks)
            .filter(|t| filter.admits(t.completed))
            .collect(),
    };
    if let Some(project) = project {
        // Surface a missing project as an error rather than an empty table.
        list.project_data(project)?;
        tasks.retain(|t| t.project_id == project);
    }

    let names: HashMap<ProjectId, String> = list
        .project_summaries()
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    print_table(&tasks, &names, today);
    Ok(())
}

/// Show every field of one task.
pub fn cmd_view(list: &ProjectList, today: NaiveDate, project: ProjectId, task: TaskId) -> CmdResult {
    let t = list.task_data(project, task)?;
    let project_name = list.project_data(project)?.name;
    println!("ID:          {}", t.id);
    println!("Name:        {}", t.name);
    println!("Project:     {} ({})", project_name, t.project_id);
    println!("Status:      {}", format_status(&t, today));
    println!("Priority:    {}", format_priority(t.priority));
    match t.due_date {
        Some(d) => println!("Due:         {} ({})", d, format_due_relative(Some(d), today)),
        None => println!("Due:         -"),
    }
    println!("Created:     {}", t.creation_date.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    if let Some(desc) = &t.description {
        println!("Description:\n{desc}");
    }
    Ok(())
}

/// Edit a task; absent description and due date are cleared.
#[allow(clippy::too_many_arguments)]
pub fn cmd_edit(
    list: &mut ProjectList,
    today: NaiveDate,
    project: ProjectId,
    task: TaskId,
    name: Option<String>,
    desc: Option<String>,
    due: Option<String>,
    priority: Option<Priority>,
) -> CmdResult {
    let edit = TaskEdit {
        name,
        description: desc,
        due_date: due.as_deref().and_then(|d| parse_due(d, today)),
        priority,
    };
    list.edit_task(project, task, edit)?;
    println!("Updated task {task}");
    Ok(())
}

/// Print the snapshot or write it to a file.
pub fn cmd_export(list: &ProjectList, output: Option<PathBuf>) -> CmdResult {
    match output {
        Some(path) => {
            store::save(list, &path)?;
            println!("Exported {} project(s) to {}", list.project_count(), path.display());
        }
        None => println!("{}", store::to_json(list)?),
    }
    Ok(())
}

/// Read a snapshot file into a fresh project list.
pub fn cmd_import(input: &Path) -> Result<ProjectList, Box<dyn Error>> {
    let data = fs::read_to_string(input)
        .map_err(|e| format!("failed to read {}: {e}", input.display()))?;
    let list = store::from_json(&data).map_err(|e| e.at(input))?;
    println!(
        "Imported {} project(s) and {} task(s)",
        list.project_count(),
        list.task_count()
    );
    Ok(list)
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

fn parse_due(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parsed = parse_due_input(input, today);
    if parsed.is_none() {
        warn!("event=due_parse module=cmd status=ignored input={input:?}");
        eprintln!("Could not understand due date '{input}', leaving it unset.");
    }
    parsed
}

/// Print tasks in a formatted table.
fn print_table(tasks: &[TaskRecord], names: &HashMap<ProjectId, String>, today: NaiveDate) {
    println!(
        "{:<5} {:<14} {:<8} {:<6} {:<10} {}",
        "ID", "Project", "Status", "Pri", "Due", "Name"
    );
    for t in tasks {
        let project = names.get(&t.project_id).map(String::as_str).unwrap_or("-");
        println!(
            "{:<5} {:<14} {:<8} {:<6} {:<10} {}",
            t.id,
            truncate(project, 14),
            format_status(t, today),
            format_priority(t.priority),
            format_due_relative(t.due_date, today),
            t.name
        );
    }
}

fn format_status(t: &TaskRecord, today: NaiveDate) -> &'static str {
    if t.completed {
        "done"
    } else if t.is_overdue_on(today) {
        "overdue"
    } else {
        "open"
    }
}

fn format_priority(p: Priority) -> String {
    p.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer name", 6), "a lon…");
    }

    #[test]
    fn test_format_priority_uses_cli_names() {
        assert_eq!(format_priority(Priority::High), "high");
    }

    #[test]
    fn test_import_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(cmd_import(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_completions_leave_database_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("projects.json");
        run(Commands::Completions { shell: Shell::Bash }, &db).unwrap();
        assert!(!db.exists());
    }
}
