pub mod config_cmd;
pub mod daemon_cmd;
pub mod run_cmd;
pub mod runs_cmd;
pub mod schedule_cmd;
pub mod script_cmd;
pub mod trigger_cmd;
pub mod webhook_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Scripter: script scheduler and automation engine.
#[derive(Debug, Parser)]
#[command(name = "scripter", version, about)]
pub struct Cli {
    /// Path to the SQLite database file (default: ./scripter.db).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show version.
    Version,
    /// Trigger a script manually, outside any schedule or event.
    Run {
        #[arg(long = "script-id")]
        script_id: i64,
    },
    /// Manage scripts.
    #[command(subcommand)]
    Script(ScriptCommand),
    /// Manage schedules.
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Inspect execution history.
    #[command(subcommand)]
    Runs(RunsCommand),
    /// Manage file triggers.
    #[command(subcommand)]
    Trigger(TriggerCommand),
    /// Manage and serve webhooks.
    #[command(subcommand)]
    Webhook(WebhookCommand),
    /// Import/export declarative config files.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Start the scheduler loop.
    Daemon {
        #[arg(long = "tick", default_value_t = 2)]
        tick_seconds: u64,
        /// Run a single scheduler tick then exit.
        #[arg(long)]
        once: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScriptCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        command: String,
        #[arg(long = "cwd")]
        working_dir: Option<String>,
    },
    List,
    Show {
        script_id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    Add {
        #[arg(long = "script-id")]
        script_id: i64,
        #[arg(long = "interval")]
        interval_seconds: i64,
    },
    #[command(name = "add-cron")]
    AddCron {
        #[arg(long = "script-id")]
        script_id: i64,
        /// Five-field cron expression, e.g. "0 9 * * 1-5".
        #[arg(long)]
        cron: String,
        /// IANA timezone, e.g. "America/New_York".
        #[arg(long)]
        tz: Option<String>,
    },
    List,
}

#[derive(Debug, Subcommand)]
pub enum RunsCommand {
    List {
        #[arg(long, default_value_t = 10)]
        limit: i64,
        #[arg(long = "script-id")]
        script_id: Option<i64>,
    },
    Show {
        run_id: i64,
        #[arg(long = "max", default_value_t = 4000)]
        max_chars: usize,
    },
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum TriggerCommand {
    #[command(name = "add-file")]
    AddFile {
        #[arg(long = "script-id")]
        script_id: i64,
        #[arg(long)]
        path: String,
        #[arg(long)]
        recursive: bool,
    },
    List,
    Remove {
        trigger_id: i64,
    },
    /// Scan a path twice with the file-mutation oracle and print both
    /// results, without touching the database.
    #[command(name = "debug-scan")]
    DebugScan {
        #[arg(long)]
        path: String,
        #[arg(long)]
        recursive: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum WebhookCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long = "script-id")]
        script_id: i64,
    },
    List,
    Remove {
        name: String,
    },
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 5055)]
        port: u16,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    Apply { path: PathBuf },
    Export { path: PathBuf },
}

pub fn resolve_db_path(db: &Option<PathBuf>) -> PathBuf {
    db.clone().unwrap_or_else(|| PathBuf::from("scripter.db"))
}
