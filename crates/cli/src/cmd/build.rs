//! Implementation of the `nativepack build` command.

use std::path::Path;

use anyhow::Result;

use nativepack_lib::execute::SystemRunner;
use nativepack_lib::jobs::Jobs;
use nativepack_lib::pipeline::Pipeline;

use crate::output::print_success;

/// Configure and build the backend in the project's build directory.
pub fn cmd_build(project_dir: &Path) -> Result<()> {
  let config = super::load_config(project_dir)?;
  let jobs = Jobs::from_env(&config.jobs_env);

  let rt = super::runtime()?;
  rt.block_on(Pipeline::new(&config, &SystemRunner, jobs).build())?;

  print_success(&format!(
    "Built {} in {} ({} job{})",
    config.package.import_name,
    config.build_dir.display(),
    jobs,
    if jobs.get() == 1 { "" } else { "s" }
  ));
  Ok(())
}
