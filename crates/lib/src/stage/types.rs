//! Types shared by the packaging stages.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::util::fs::CopyError;

/// The external step a [`SetupError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Configure,
  Build,
  Install,
}

impl Stage {
  pub fn as_str(&self) -> &'static str {
    match self {
      Stage::Configure => "configure",
      Stage::Build => "build",
      Stage::Install => "install",
    }
  }
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Fatal setup failure.
///
/// This is the single error kind for every failed external step and for a
/// missing build directory. The message names the stage that failed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct SetupError {
  pub stage: Stage,
  pub message: String,
  /// Exit code of the failed command, `None` if it never ran or was killed.
  pub code: Option<i32>,
  #[source]
  pub source: Option<io::Error>,
}

impl SetupError {
  pub fn new(stage: Stage, message: impl Into<String>) -> Self {
    Self {
      stage,
      message: message.into(),
      code: None,
      source: None,
    }
  }

  pub fn with_code(mut self, code: Option<i32>) -> Self {
    self.code = code;
    self
  }

  pub fn with_source(mut self, source: io::Error) -> Self {
    self.source = Some(source);
    self
  }
}

/// Errors from the install stage: the external step or the tree copy after it.
#[derive(Debug, Error)]
pub enum InstallError {
  #[error(transparent)]
  Setup(#[from] SetupError),

  #[error(transparent)]
  Copy(#[from] CopyError),
}

/// Result of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
  /// Directory the backend tree was merged into.
  pub destination: PathBuf,
  /// Files copied from the backend's install tree.
  pub copied: Vec<PathBuf>,
  /// Everything reported as installed: the standard outputs plus the
  /// backend's install location.
  pub outputs: Vec<PathBuf>,
}
