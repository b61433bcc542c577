//! Standard install of the package's own Python sources.
//!
//! Runs before the backend install so the backend tree overlays it.

use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::DirEntry;

use crate::config::ProjectConfig;
use crate::util::fs::{CopyError, copy_tree_filtered};

fn is_installable(entry: &DirEntry) -> bool {
  let name = entry.file_name().to_string_lossy();
  if entry.file_type().is_dir() {
    return name != "__pycache__";
  }
  !(name.ends_with(".pyc") || name.ends_with(".pyo"))
}

/// Copy `<source_dir>/<import_name>` into `destination`, returning the
/// installed files. A project without Python sources installs nothing.
pub fn install_package_files(config: &ProjectConfig, destination: &Path) -> Result<Vec<PathBuf>, CopyError> {
  let package_dir = config.package_source_dir();
  if !package_dir.is_dir() {
    warn!(path = ?package_dir, "package sources not found, installing backend only");
    return Ok(Vec::new());
  }

  let target = destination.join(&config.package.import_name);
  info!(from = ?package_dir, to = ?target, "installing package files");
  copy_tree_filtered(&package_dir, &target, is_installable)
}
