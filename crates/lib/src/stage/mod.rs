//! Packaging stages.
//!
//! configure → build → install, strictly in that order. Each stage fails
//! fast with a [`SetupError`]; nothing is retried or rolled back.

pub mod build;
pub mod install;
pub mod package;
pub mod types;

pub use build::build_backend;
pub use install::{InstallDestination, install_backend};
pub use package::install_package_files;
pub use types::{InstallError, InstallReport, SetupError, Stage};

use tracing::error;

use crate::execute::{CommandRunner, Invocation};

/// Run one external step, turning a spawn failure or non-zero exit into a
/// [`SetupError`] for `stage`.
async fn run_step(
  runner: &impl CommandRunner,
  invocation: &Invocation,
  stage: Stage,
  message: String,
) -> Result<(), SetupError> {
  match runner.run(invocation).await {
    Ok(outcome) if outcome.success() => Ok(()),
    Ok(outcome) => {
      error!(stage = %stage, cmd = %invocation, code = ?outcome.code, "command failed");
      Err(SetupError::new(stage, message).with_code(outcome.code))
    }
    Err(source) => {
      error!(stage = %stage, cmd = %invocation, error = %source, "command could not be started");
      Err(SetupError::new(stage, message).with_source(source))
    }
  }
}
