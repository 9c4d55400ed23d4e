//! Spawns a shell command and captures its output under a wall-clock timeout.

use std::time::Duration;

use tokio::process::Command;

use crate::error::{Error, Result};

pub struct ExecResult {
    pub exit_code: Option<i64>,
    pub stdout: String,
    pub stderr: String,
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Run `command` through the platform shell, capturing stdout/stderr as
/// strings. Returns `Error::Timeout` if it doesn't finish within `timeout`
/// (defaulting to 60s), killing the child process in that case.
pub async fn run_command(
    command: &str,
    working_dir: Option<&str>,
    timeout: Option<Duration>,
) -> Result<ExecResult> {
    let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);

    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command).kill_on_drop(true);
    if let Some(dir) = working_dir {
        cmd.current_dir(dir);
    }

    let child = cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(ExecResult {
            exit_code: output.status.code().map(i64::from),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }),
        Ok(Err(e)) => Err(Error::Io(e)),
        Err(_) => Err(Error::Timeout(format!(
            "command did not finish within {}s",
            timeout.as_secs()
        ))),
    }
}
