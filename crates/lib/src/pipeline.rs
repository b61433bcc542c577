//! End-to-end flows: build, install, and wheel.
//!
//! Each flow composes the stages in order and stops at the first failure.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::ProjectConfig;
use crate::execute::CommandRunner;
use crate::jobs::Jobs;
use crate::platform::paths;
use crate::stage::{
  InstallDestination, InstallError, InstallReport, SetupError, build_backend, install_backend, install_package_files,
};
use crate::util::fs::CopyError;
use crate::wheel::{DistInfo, WheelError, WheelTag, build_wheel};

/// Any failure of a packaging flow.
#[derive(Debug, Error)]
pub enum PackError {
  #[error(transparent)]
  Setup(#[from] SetupError),

  #[error(transparent)]
  Copy(#[from] CopyError),

  #[error(transparent)]
  Wheel(#[from] WheelError),

  #[error("failed to clean staging directory {path}: {source}")]
  CleanStaging {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl From<InstallError> for PackError {
  fn from(err: InstallError) -> Self {
    match err {
      InstallError::Setup(e) => PackError::Setup(e),
      InstallError::Copy(e) => PackError::Copy(e),
    }
  }
}

/// A wheel produced by [`Pipeline::wheel`].
#[derive(Debug, Clone)]
pub struct WheelArtifact {
  pub path: PathBuf,
  pub tag: WheelTag,
  pub version: String,
  pub install: InstallReport,
}

/// Runs packaging flows for one project.
pub struct Pipeline<'a, R: CommandRunner> {
  config: &'a ProjectConfig,
  runner: &'a R,
  jobs: Jobs,
}

impl<'a, R: CommandRunner> Pipeline<'a, R> {
  pub fn new(config: &'a ProjectConfig, runner: &'a R, jobs: Jobs) -> Self {
    Self { config, runner, jobs }
  }

  /// Configure and build the backend.
  pub async fn build(&self) -> Result<(), PackError> {
    build_backend(self.config, self.jobs, self.runner).await?;
    Ok(())
  }

  /// Install the package and the backend into `destination`.
  ///
  /// Builds first unless `skip_build` is set, in which case an earlier build
  /// must have left the build directory behind.
  pub async fn install(&self, destination: InstallDestination, skip_build: bool) -> Result<InstallReport, PackError> {
    if !skip_build {
      self.build().await?;
    }

    let base_outputs = install_package_files(self.config, destination.path())?;
    let report = install_backend(self.config, &destination, base_outputs, self.runner).await?;
    Ok(report)
  }

  /// Build a platform-tagged wheel of the project into `dist_dir`.
  pub async fn wheel(&self, dist_dir: &Path, version: &str, skip_build: bool) -> Result<WheelArtifact, PackError> {
    let tag = WheelTag::for_package(self.config.package.universal).with_build_platform();
    info!(tag = %tag, version = %version, "building wheel");

    let staging = paths::staging_dir(&self.config.top_dir, &tag.platform);
    if staging.exists() {
      std::fs::remove_dir_all(&staging).map_err(|source| PackError::CleanStaging {
        path: staging.clone(),
        source,
      })?;
    }

    let install = self.install(InstallDestination::Staging(staging.clone()), skip_build).await?;

    let info = DistInfo {
      package: &self.config.package,
      version,
      tag: &tag,
      long_description: self.config.package.long_description(&self.config.top_dir),
    };
    let path = build_wheel(&staging, &info, dist_dir)?;

    Ok(WheelArtifact {
      path,
      tag,
      version: version.to_string(),
      install,
    })
  }
}
