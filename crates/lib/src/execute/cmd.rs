//! Command execution against the real system.
//!
//! Each command gets its working directory from the [`Invocation`]; the
//! process-wide current directory is left alone.

use std::io;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use super::types::{CommandRunner, ExecuteError, ExitOutcome, Invocation};

/// Runs commands as child processes that inherit stdout and stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  async fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome> {
    info!(cmd = %invocation, cwd = ?invocation.cwd, "executing command");

    let status = Command::new(&invocation.program)
      .args(&invocation.args)
      .current_dir(&invocation.cwd)
      .stdin(Stdio::null())
      .status()
      .await?;

    debug!(code = ?status.code(), "command exited");

    Ok(ExitOutcome { code: status.code() })
  }
}

/// Run a command and return its stdout (trimmed).
///
/// Used for short queries such as `git describe`, where the output is the
/// answer rather than progress for the user.
pub async fn capture_stdout(invocation: &Invocation) -> Result<String, ExecuteError> {
  debug!(cmd = %invocation, cwd = ?invocation.cwd, "capturing command output");

  let output = Command::new(&invocation.program)
    .args(&invocation.args)
    .current_dir(&invocation.cwd)
    .stdin(Stdio::null())
    .output()
    .await
    .map_err(|source| ExecuteError::Spawn {
      cmd: invocation.to_string(),
      source,
    })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
      debug!(stderr = %stderr, "command stderr");
    }

    return Err(ExecuteError::CmdFailed {
      cmd: invocation.to_string(),
      code: output.status.code(),
    });
  }

  Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
