mod build;
mod info;
mod install;
mod wheel;

use std::path::Path;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;

use nativepack_lib::config::ProjectConfig;

pub use build::cmd_build;
pub use info::cmd_info;
pub use install::cmd_install;
pub use wheel::cmd_wheel;

fn load_config(project_dir: &Path) -> Result<ProjectConfig> {
  ProjectConfig::load(project_dir)
    .with_context(|| format!("Failed to load project at {}", project_dir.display()))
}

fn runtime() -> Result<Runtime> {
  Runtime::new().context("Failed to create async runtime")
}
