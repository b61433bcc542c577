//! Install the native backend into its final destination.

use std::path::{Path, PathBuf};

use tracing::info;

use super::run_step;
use super::types::{InstallError, InstallReport, SetupError, Stage};
use crate::config::ProjectConfig;
use crate::execute::{CommandRunner, Invocation};
use crate::util::fs::copy_tree;

/// Where the installed tree ends up, chosen once by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallDestination {
  /// Staging directory of a binary distribution being assembled.
  Staging(PathBuf),
  /// The interpreter's library install directory.
  Library(PathBuf),
}

impl InstallDestination {
  pub fn path(&self) -> &Path {
    match self {
      InstallDestination::Staging(path) | InstallDestination::Library(path) => path,
    }
  }

  pub fn kind(&self) -> &'static str {
    match self {
      InstallDestination::Staging(_) => "staging",
      InstallDestination::Library(_) => "library",
    }
  }
}

/// The install command: `<build tool> install`.
pub fn install_invocation(config: &ProjectConfig) -> Invocation {
  Invocation::new(&config.build_program, &config.build_dir).arg("install")
}

/// Run the build tool's install target and merge the result into `destination`.
///
/// Requires an existing build directory; without one no command runs.
/// `base_outputs` are the outputs of the standard install step; the report
/// extends them with the backend's location under the destination.
pub async fn install_backend(
  config: &ProjectConfig,
  destination: &InstallDestination,
  base_outputs: Vec<PathBuf>,
  runner: &impl CommandRunner,
) -> Result<InstallReport, InstallError> {
  let name = &config.package.import_name;
  info!(package = %name, "installing backend and dependencies");

  if !config.build_dir.is_dir() {
    return Err(SetupError::new(Stage::Install, "Failed to find build dir!").into());
  }

  info!(prefix = ?config.install_prefix, "creating installation");
  run_step(
    runner,
    &install_invocation(config),
    Stage::Install,
    format!("Failed to install {}", name),
  )
  .await?;

  let install_root = config.install_root();
  info!(from = ?install_root, to = ?destination.path(), kind = destination.kind(), "copying installation");
  let copied = copy_tree(&install_root, destination.path())?;

  let mut outputs = base_outputs;
  let backend_output = destination.path().join(name);
  if !outputs.contains(&backend_output) {
    outputs.push(backend_output);
  }

  info!(files = copied.len(), "install finished");
  Ok(InstallReport {
    destination: destination.path().to_path_buf(),
    copied,
    outputs,
  })
}
