use std::path::Path;

use crate::config::Settings;
use crate::scheduler::{run_loop, RunLoopOptions};

pub async fn run(db_path: &Path, settings: &Settings, tick_seconds: u64, once: bool) -> anyhow::Result<()> {
    let options = RunLoopOptions {
        tick_seconds,
        once,
        file_quiet_seconds: settings.file_quiet_seconds,
        file_min_interval_seconds: settings.file_min_interval_seconds,
    };
    run_loop(db_path, options).await?;
    Ok(())
}
