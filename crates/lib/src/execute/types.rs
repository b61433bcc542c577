//! Types for external command execution.

use std::fmt;
use std::future::Future;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while running a command whose output is captured.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// The program could not be started.
  #[error("failed to spawn {cmd}: {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: io::Error,
  },

  /// Command exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  CmdFailed { cmd: String, code: Option<i32> },
}

/// A single external command: program, arguments, and the directory it runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
}

impl Invocation {
  pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      cwd: cwd.into(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.program)?;
    for arg in &self.args {
      write!(f, " {}", arg)?;
    }
    Ok(())
  }
}

/// How a command finished. `code` is `None` when it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
  pub code: Option<i32>,
}

impl ExitOutcome {
  pub fn success(self) -> bool {
    self.code == Some(0)
  }
}

/// Runs external commands to completion.
///
/// Output is not captured: the toolchain writes straight to the terminal,
/// and only the exit status is reported back.
pub trait CommandRunner {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = io::Result<ExitOutcome>> + Send;
}
