//! # todo - Personal task tracking CLI
//!
//! Projects hold tasks with optional descriptions, due dates and
//! priorities. Every database starts with a permanent Inbox project (id 0);
//! tasks can move between projects without changing their id.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a project and add a task due tomorrow
//! todo project add Work
//! todo add "Ship release" --project 1 --due tomorrow --priority high
//!
//! # What is due today or earlier?
//! todo today
//!
//! # Complete it, then move it to the Inbox
//! todo toggle 1 0
//! todo move 1 0 0
//! ```
//!
//! Data is stored in `~/.todo/projects.json` (override with `--db` or
//! `TODO_DB`). Logs go to stderr; raise detail with `--log-level debug`.

use std::path::PathBuf;

use clap::Parser;

mod cli;
mod cmd;

use cli::Cli;
use todo_projects::logging::init_logging;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(2);
    }

    let db_path = cli.db.unwrap_or_else(default_db_path);
    if let Err(e) = cmd::run(cli.command, &db_path) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn default_db_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".todo").join("projects.json")
}
