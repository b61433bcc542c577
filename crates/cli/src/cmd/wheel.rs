//! Implementation of the `nativepack wheel` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use nativepack_lib::execute::SystemRunner;
use nativepack_lib::jobs::Jobs;
use nativepack_lib::pipeline::Pipeline;
use nativepack_lib::platform::paths;
use nativepack_lib::version::resolve_version;

use crate::output::{print_stat, print_success};

/// Build, stage, and archive a wheel tagged for the host platform.
///
/// Prints the wheel's path on success.
pub fn cmd_wheel(project_dir: &Path, dist_dir: Option<PathBuf>, skip_build: bool) -> Result<()> {
  let config = super::load_config(project_dir)?;
  let jobs = Jobs::from_env(&config.jobs_env);
  let dist_dir = dist_dir.unwrap_or_else(|| paths::dist_dir(&config.top_dir));

  let rt = super::runtime()?;
  let version = rt
    .block_on(resolve_version(&config))
    .context("Failed to determine the package version")?;
  let artifact = rt.block_on(Pipeline::new(&config, &SystemRunner, jobs).wheel(&dist_dir, &version, skip_build))?;

  print_success(&format!("Built wheel {}", artifact.path.display()));
  print_stat("Tag", &artifact.tag.to_string());
  print_stat("Backend files", &artifact.install.copied.len().to_string());
  Ok(())
}
