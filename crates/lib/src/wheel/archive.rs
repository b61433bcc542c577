//! Wheel archive writing.
//!
//! The staging directory already holds the installed tree; this adds the
//! `.dist-info` directory and zips everything with a `RECORD` of hashes.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use super::tag::WheelTag;
use crate::consts::APP_NAME;
use crate::metadata::PackageMetadata;
use crate::util::hash::hash_bytes;

#[derive(Debug, Error)]
pub enum WheelError {
  #[error("io error at {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to traverse staging directory: {0}")]
  WalkDir(#[from] walkdir::Error),

  #[error("failed to write wheel archive: {0}")]
  Zip(#[from] zip::result::ZipError),
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> WheelError + '_ {
  move |source| WheelError::Io {
    path: path.to_path_buf(),
    source,
  }
}

/// Everything needed to describe the wheel in its `.dist-info` directory.
#[derive(Debug, Clone)]
pub struct DistInfo<'a> {
  pub package: &'a PackageMetadata,
  pub version: &'a str,
  pub tag: &'a WheelTag,
  pub long_description: Option<String>,
}

impl DistInfo<'_> {
  /// `<name>-<version>.dist-info`
  pub fn dir_name(&self) -> String {
    format!("{}-{}.dist-info", normalize_dist_name(&self.package.name), escape_version(self.version))
  }

  /// Contents of the `WHEEL` file.
  pub fn render_wheel(&self) -> String {
    let mut out = format!(
      "Wheel-Version: 1.0\nGenerator: {} ({})\nRoot-Is-Purelib: true\n",
      APP_NAME,
      env!("CARGO_PKG_VERSION")
    );
    for tag in self.tag.expand() {
      out.push_str(&format!("Tag: {}\n", tag));
    }
    out
  }
}

/// Normalize a distribution name for file names: runs of `-`, `_` and `.`
/// become a single `_`, and letters are lowercased.
pub fn normalize_dist_name(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  let mut in_separator = false;
  for c in name.chars() {
    if matches!(c, '-' | '_' | '.') {
      if !in_separator {
        out.push('_');
      }
      in_separator = true;
    } else {
      out.push(c.to_ascii_lowercase());
      in_separator = false;
    }
  }
  out
}

fn escape_version(version: &str) -> String {
  version.replace('-', "_")
}

/// `<name>-<version>-<tag>.whl`
pub fn wheel_file_name(name: &str, version: &str, tag: &WheelTag) -> String {
  format!("{}-{}-{}.whl", normalize_dist_name(name), escape_version(version), tag)
}

/// Write the `.dist-info` directory (everything but `RECORD`) into `staging`.
pub fn write_dist_info(staging: &Path, info: &DistInfo<'_>) -> Result<PathBuf, WheelError> {
  let dir = staging.join(info.dir_name());
  fs::create_dir_all(&dir).map_err(io_err(&dir))?;

  let mut files = vec![
    (
      "METADATA",
      info
        .package
        .render_metadata(info.version, info.long_description.as_deref()),
    ),
    ("WHEEL", info.render_wheel()),
    ("top_level.txt", info.package.render_top_level()),
  ];
  if let Some(entry_points) = info.package.render_entry_points() {
    files.push(("entry_points.txt", entry_points));
  }

  for (name, content) in files {
    let path = dir.join(name);
    fs::write(&path, content).map_err(io_err(&path))?;
  }

  debug!(path = ?dir, "wrote dist-info");
  Ok(dir)
}

/// Archive member: path inside the wheel and path on disk.
struct Member {
  name: String,
  path: PathBuf,
}

/// Collect staged files in wheel order: package files first, then the
/// `.dist-info` files; RECORD is appended separately.
///
/// Symlinks to files are archived with their target's content. Dangling
/// links and links to directories are skipped.
fn collect_members(staging: &Path, dist_info: &str) -> Result<Vec<Member>, WheelError> {
  let record = format!("{}/RECORD", dist_info);
  let mut members = Vec::new();

  for entry in WalkDir::new(staging).follow_links(false).sort_by_file_name() {
    let entry = entry?;
    let file_type = entry.file_type();
    if file_type.is_dir() {
      continue;
    }
    if file_type.is_symlink() {
      match fs::metadata(entry.path()) {
        Ok(target) if target.is_file() => {}
        Ok(_) => {
          warn!(path = ?entry.path(), "skipping symlink to a directory");
          continue;
        }
        Err(err) => {
          warn!(path = ?entry.path(), error = %err, "skipping dangling symlink");
          continue;
        }
      }
    }
    let rel = entry.path().strip_prefix(staging).unwrap_or(entry.path());
    let name = rel
      .components()
      .map(|c| c.as_os_str().to_string_lossy())
      .collect::<Vec<_>>()
      .join("/");
    if name == record {
      continue;
    }
    members.push(Member {
      name,
      path: entry.path().to_path_buf(),
    });
  }

  let prefix = format!("{}/", dist_info);
  members.sort_by(|a, b| {
    let a_meta = a.name.starts_with(&prefix);
    let b_meta = b.name.starts_with(&prefix);
    a_meta.cmp(&b_meta).then_with(|| a.name.cmp(&b.name))
  });

  Ok(members)
}

#[cfg(unix)]
fn file_mode(path: &Path) -> io::Result<u32> {
  use std::os::unix::fs::PermissionsExt;
  Ok(fs::metadata(path)?.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn file_mode(_path: &Path) -> io::Result<u32> {
  Ok(0o644)
}

/// Quote a RECORD field when a CSV reader would otherwise split it.
fn record_field(field: &str) -> Cow<'_, str> {
  if field.contains([',', '"', '\n', '\r']) {
    Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
  } else {
    Cow::Borrowed(field)
  }
}

fn member_options(mode: u32) -> SimpleFileOptions {
  SimpleFileOptions::default()
    .compression_method(CompressionMethod::Deflated)
    .last_modified_time(DateTime::default())
    .unix_permissions(mode)
}

/// Build a wheel from `staging` into `dist_dir` and return its path.
///
/// Timestamps are pinned to the zip epoch so identical trees produce
/// identical archives.
pub fn build_wheel(staging: &Path, info: &DistInfo<'_>, dist_dir: &Path) -> Result<PathBuf, WheelError> {
  write_dist_info(staging, info)?;
  let dist_info = info.dir_name();
  let members = collect_members(staging, &dist_info)?;

  fs::create_dir_all(dist_dir).map_err(io_err(dist_dir))?;
  let wheel_path = dist_dir.join(wheel_file_name(&info.package.name, info.version, info.tag));
  let mut tmp = tempfile::NamedTempFile::new_in(dist_dir).map_err(io_err(dist_dir))?;

  let mut record = String::new();
  {
    let mut zip = ZipWriter::new(tmp.as_file_mut());

    for member in &members {
      let content = fs::read(&member.path).map_err(io_err(&member.path))?;
      let digest = hash_bytes(&content);
      let mode = file_mode(&member.path).map_err(io_err(&member.path))?;

      zip.start_file(member.name.as_str(), member_options(mode))?;
      zip.write_all(&content).map_err(io_err(&member.path))?;
      record.push_str(&format!("{},{},{}\n", record_field(&member.name), digest.hash, digest.size));
    }

    let record_name = format!("{}/RECORD", dist_info);
    record.push_str(&format!("{},,\n", record_field(&record_name)));
    zip.start_file(record_name.as_str(), member_options(0o644))?;
    zip.write_all(record.as_bytes()).map_err(io_err(&wheel_path))?;
    zip.finish()?;
  }

  tmp.persist(&wheel_path).map_err(|e| WheelError::Io {
    path: wheel_path.clone(),
    source: e.error,
  })?;
  // Temp files are created owner-only.
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(&wheel_path, fs::Permissions::from_mode(0o644)).map_err(io_err(&wheel_path))?;
  }

  info!(path = ?wheel_path, files = members.len(), "wheel written");
  Ok(wheel_path)
}
