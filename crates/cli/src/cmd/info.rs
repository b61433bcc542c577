use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use nativepack_lib::jobs::Jobs;
use nativepack_lib::platform::{paths, platform_triple};
use nativepack_lib::version::resolve_version;
use nativepack_lib::wheel::WheelTag;

use crate::output::{OutputFormat, print_info, print_json, print_stat};

#[derive(Debug, Serialize)]
struct ProjectInfo {
  name: String,
  import_name: String,
  version: Option<String>,
  wheel_tag: String,
  platform: Option<String>,
  top_dir: PathBuf,
  build_dir: PathBuf,
  install_prefix: PathBuf,
  staging_dir: PathBuf,
  jobs: usize,
}

pub fn cmd_info(project_dir: &Path, format: OutputFormat) -> Result<()> {
  let config = super::load_config(project_dir)?;
  let jobs = Jobs::from_env(&config.jobs_env);
  let tag = WheelTag::for_package(config.package.universal).with_build_platform();

  // Info stays useful outside a git checkout.
  let rt = super::runtime()?;
  let version = rt.block_on(resolve_version(&config)).ok();

  let info = ProjectInfo {
    name: config.package.name.clone(),
    import_name: config.package.import_name.clone(),
    version,
    wheel_tag: tag.to_string(),
    platform: platform_triple(),
    staging_dir: paths::staging_dir(&config.top_dir, &tag.platform),
    top_dir: config.top_dir.clone(),
    build_dir: config.build_dir.clone(),
    install_prefix: config.install_prefix.clone(),
    jobs: jobs.get(),
  };

  if format.is_json() {
    return print_json(&info);
  }

  print_info(&format!("{} ({})", info.name, info.import_name));
  print_stat("Version", info.version.as_deref().unwrap_or("unknown"));
  print_stat("Wheel tag", &info.wheel_tag);
  print_stat("Platform", info.platform.as_deref().unwrap_or("unsupported"));
  print_stat("Project", &info.top_dir.display().to_string());
  print_stat("Build dir", &info.build_dir.display().to_string());
  print_stat("Install prefix", &info.install_prefix.display().to_string());
  print_stat("Staging dir", &info.staging_dir.display().to_string());
  print_stat("Jobs", &info.jobs.to_string());
  Ok(())
}
