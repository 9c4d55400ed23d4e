use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use scripter::cli::{self, Cli, Command, ConfigCommand, RunsCommand, ScheduleCommand, ScriptCommand, TriggerCommand, WebhookCommand};
use scripter::config::Settings;
use scripter::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,scripter=debug")),
        )
        .init();

    let cli = Cli::parse();
    let db_path = cli::resolve_db_path(&cli.db);
    let settings = Settings::load_or_default(None);

    if matches!(cli.command, Command::Version) {
        println!("scripter {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let store = Store::open(&db_path).await?;

    match cli.command {
        Command::Version => unreachable!(),
        Command::Run { script_id } => cli::run_cmd::run(&store, script_id).await,
        Command::Script(cmd) => match cmd {
            ScriptCommand::Add { name, command, working_dir } => {
                cli::script_cmd::add(&store, &name, &command, working_dir.as_deref()).await
            }
            ScriptCommand::List => cli::script_cmd::list(&store).await,
            ScriptCommand::Show { script_id } => cli::script_cmd::show(&store, script_id).await,
        },
        Command::Schedule(cmd) => match cmd {
            ScheduleCommand::Add { script_id, interval_seconds } => {
                cli::schedule_cmd::add(&store, script_id, interval_seconds).await
            }
            ScheduleCommand::AddCron { script_id, cron, tz } => {
                cli::schedule_cmd::add_cron(&store, script_id, &cron, tz.as_deref()).await
            }
            ScheduleCommand::List => cli::schedule_cmd::list(&store).await,
        },
        Command::Runs(cmd) => match cmd {
            RunsCommand::List { limit, script_id } => cli::runs_cmd::list(&store, limit, script_id).await,
            RunsCommand::Show { run_id, max_chars } => cli::runs_cmd::show(&store, run_id, max_chars).await,
            RunsCommand::Clear => cli::runs_cmd::clear(&store).await,
        },
        Command::Trigger(cmd) => match cmd {
            TriggerCommand::AddFile { script_id, path, recursive } => {
                cli::trigger_cmd::add_file(&store, script_id, &path, recursive).await
            }
            TriggerCommand::List => cli::trigger_cmd::list(&store).await,
            TriggerCommand::Remove { trigger_id } => cli::trigger_cmd::remove(&store, trigger_id).await,
            TriggerCommand::DebugScan { path, recursive } => {
                cli::trigger_cmd::debug_scan(&path, recursive).await
            }
        },
        Command::Webhook(cmd) => match cmd {
            WebhookCommand::Add { name, script_id } => cli::webhook_cmd::add(&store, &name, script_id).await,
            WebhookCommand::List => cli::webhook_cmd::list(&store).await,
            WebhookCommand::Remove { name } => cli::webhook_cmd::remove(&store, &name).await,
            WebhookCommand::Serve { host, port } => {
                cli::webhook_cmd::serve(Arc::new(store), &host, port).await
            }
        },
        Command::Config(cmd) => match cmd {
            ConfigCommand::Apply { path } => cli::config_cmd::apply(&store, &path).await,
            ConfigCommand::Export { path } => cli::config_cmd::export(&store, &path).await,
        },
        Command::Daemon { tick_seconds, once } => {
            cli::daemon_cmd::run(&db_path, &settings, tick_seconds, once).await
        }
    }
}
