//! Recursive tree copying.
//!
//! Copies merge into the destination: existing files are overwritten,
//! anything else already there is left in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Error while copying a directory tree.
#[derive(Debug, Error)]
pub enum CopyError {
  #[error("failed to traverse directory {path}: {source}")]
  WalkDir {
    path: PathBuf,
    #[source]
    source: walkdir::Error,
  },

  #[error("failed to copy {from} to {to}: {source}")]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Copy everything under `src` into `dst`.
///
/// Returns the destination paths of the copied files and symlinks, in
/// traversal order.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<Vec<PathBuf>, CopyError> {
  copy_tree_filtered(src, dst, |_| true)
}

/// Like [`copy_tree`], skipping entries (and whole directories) for which
/// `keep` returns false.
pub fn copy_tree_filtered(
  src: &Path,
  dst: &Path,
  keep: impl Fn(&DirEntry) -> bool,
) -> Result<Vec<PathBuf>, CopyError> {
  debug!(from = ?src, to = ?dst, "copying tree");

  let mut copied = Vec::new();
  let walker = WalkDir::new(src)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|e| e.depth() == 0 || keep(e));

  for entry in walker {
    let entry = entry.map_err(|source| CopyError::WalkDir {
      path: src.to_path_buf(),
      source,
    })?;

    let rel_path = entry.path().strip_prefix(src).unwrap_or(entry.path());
    let target = dst.join(rel_path);
    let file_type = entry.file_type();

    if file_type.is_dir() {
      fs::create_dir_all(&target).map_err(|source| CopyError::CreateDir {
        path: target.clone(),
        source,
      })?;
      continue;
    }

    if let Some(parent) = target.parent() {
      fs::create_dir_all(parent).map_err(|source| CopyError::CreateDir {
        path: parent.to_path_buf(),
        source,
      })?;
    }

    trace!(from = ?entry.path(), to = ?target, "copying entry");
    copy_entry(entry.path(), &target, file_type.is_symlink()).map_err(|source| CopyError::Copy {
      from: entry.path().to_path_buf(),
      to: target.clone(),
      source,
    })?;
    copied.push(target);
  }

  Ok(copied)
}

#[cfg(unix)]
fn copy_entry(from: &Path, to: &Path, is_symlink: bool) -> io::Result<()> {
  if is_symlink {
    let link_target = fs::read_link(from)?;
    remove_existing(to)?;
    return std::os::unix::fs::symlink(link_target, to);
  }
  // fs::copy would write through a symlink left by an earlier install
  if fs::symlink_metadata(to).map(|m| m.file_type().is_symlink()).unwrap_or(false) {
    fs::remove_file(to)?;
  }
  fs::copy(from, to).map(|_| ())
}

#[cfg(not(unix))]
fn copy_entry(from: &Path, to: &Path, _is_symlink: bool) -> io::Result<()> {
  fs::copy(from, to).map(|_| ())
}

#[cfg(unix)]
fn remove_existing(path: &Path) -> io::Result<()> {
  match fs::symlink_metadata(path) {
    Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
    Ok(_) => fs::remove_file(path),
    Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
    Err(e) => Err(e),
  }
}
