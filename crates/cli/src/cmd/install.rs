//! Implementation of the `nativepack install` command.
//!
//! Installs the Python package and then overlays the backend's install tree
//! onto the library directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use nativepack_lib::config::ProjectConfig;
use nativepack_lib::execute::SystemRunner;
use nativepack_lib::jobs::Jobs;
use nativepack_lib::pipeline::Pipeline;
use nativepack_lib::platform::paths;
use nativepack_lib::stage::InstallDestination;

use crate::output::{display_relative, print_output, print_stat, print_success};

pub fn cmd_install(project_dir: &Path, lib_dir: Option<PathBuf>, skip_build: bool) -> Result<()> {
  let config = super::load_config(project_dir)?;
  let jobs = Jobs::from_env(&config.jobs_env);

  let rt = super::runtime()?;
  let lib_dir = rt.block_on(resolve_lib_dir(&config, lib_dir))?;
  debug!(lib_dir = %lib_dir.display(), "resolved library directory");

  let pipeline = Pipeline::new(&config, &SystemRunner, jobs);
  let report = rt.block_on(pipeline.install(InstallDestination::Library(lib_dir), skip_build))?;

  print_success(&format!(
    "Installed {} into {}",
    config.package.import_name,
    report.destination.display()
  ));
  for output in &report.outputs {
    print_output(&display_relative(output, &report.destination));
  }
  print_stat("Backend files", &report.copied.len().to_string());
  Ok(())
}

/// `--lib-dir`, else the manifest's `lib-dir`, else the interpreter's purelib.
async fn resolve_lib_dir(config: &ProjectConfig, flag: Option<PathBuf>) -> Result<PathBuf> {
  if let Some(dir) = flag.or_else(|| config.lib_dir.clone()) {
    return Ok(dir);
  }
  paths::python_purelib(&config.python, &config.top_dir)
    .await
    .context("Failed to determine the library directory; pass --lib-dir")
}
