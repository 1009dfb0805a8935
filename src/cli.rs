use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed task manager with projects and an Inbox.
/// Storage defaults to ~/.todo/projects.json or a path passed via --db.
#[derive(Parser)]
#[command(name = "todo", version, about = "Personal task tracking CLI")]
pub struct Cli {
    /// Path to the JSON database file.
    #[arg(long, global = true, env = "TODO_DB")]
    pub db: Option<PathBuf>,

    /// Log level written to stderr: trace | debug | info | warn | error | off.
    #[arg(long, global = true, env = "TODO_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}
