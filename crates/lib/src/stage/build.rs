//! Configure and build the native backend.

use tokio::fs;
use tracing::info;

use super::run_step;
use super::types::{SetupError, Stage};
use crate::config::ProjectConfig;
use crate::execute::{CommandRunner, Invocation};
use crate::jobs::Jobs;

/// The configure command: `<configure> <source_dir> "<feature flags>" -DCMAKE_INSTALL_PREFIX=<prefix>`.
///
/// The feature flags stay one argument, exactly as configured.
pub fn configure_invocation(config: &ProjectConfig) -> Invocation {
  Invocation::new(&config.configure_program, &config.build_dir)
    .arg(config.source_dir.to_string_lossy())
    .arg(&config.feature_flags)
    .arg(format!("-DCMAKE_INSTALL_PREFIX={}", config.install_prefix.display()))
}

/// The build command: `<build tool> -j<N>`.
pub fn build_invocation(config: &ProjectConfig, jobs: Jobs) -> Invocation {
  Invocation::new(&config.build_program, &config.build_dir).arg(jobs.make_flag())
}

/// Configure and build the backend inside the build directory.
///
/// Creates the build directory when missing. A failing configure step stops
/// before the build step runs.
pub async fn build_backend(config: &ProjectConfig, jobs: Jobs, runner: &impl CommandRunner) -> Result<(), SetupError> {
  let name = &config.package.import_name;
  info!(package = %name, "building backend and dependencies");

  if !config.build_dir.exists() {
    info!(path = ?config.build_dir, "creating build directory");
    fs::create_dir_all(&config.build_dir).await.map_err(|source| {
      SetupError::new(
        Stage::Configure,
        format!("Failed to create build directory {}", config.build_dir.display()),
      )
      .with_source(source)
    })?;
  }

  info!(package = %name, "running configure");
  run_step(
    runner,
    &configure_invocation(config),
    Stage::Configure,
    format!("Failed to configure {}", name),
  )
  .await?;

  info!(package = %name, jobs = jobs.get(), "building");
  run_step(
    runner,
    &build_invocation(config, jobs),
    Stage::Build,
    format!("Failed to build {}", name),
  )
  .await?;

  info!("build finished");
  Ok(())
}
