use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file (defaults to ~/.tasklist.db)
    #[arg(long, global = true, env = "TASKLIST_DB", value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Where to write logs while the TUI is running (defaults to ~/.tasklist.log)
    #[arg(long, global = true, env = "TASKLIST_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task
    Add {
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// List all tasks
    List,
    /// Replace the text of a task
    Edit {
        #[arg(value_name = "ID")]
        id: i64,
        #[arg(value_name = "TEXT")]
        text: String,
    },
    /// Delete a task
    Delete {
        #[arg(value_name = "ID")]
        id: i64,
    },
    /// Launch TUI interface
    Tui,
    /// Print shell completions
    Completions {
        #[arg(value_enum, value_name = "SHELL")]
        shell: clap_complete::Shell,
    },
}
