//! Project configuration.
//!
//! A [`ProjectConfig`] is built once per run from the project directory and
//! its optional `nativepack.toml`, then passed by reference to every stage.
//! All paths are resolved up front, so no stage depends on the process's
//! current directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{DEFAULT_BUILD_DIR, DEFAULT_JOBS_ENV, DEFAULT_SOURCE_DIR, INSTALL_SUBDIR, MANIFEST_FILE};
use crate::metadata::PackageMetadata;

/// Errors that can occur while loading the project configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("project directory {path} is not accessible: {source}")]
  ProjectDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("invalid import name {0:?}: must be a single path component")]
  InvalidImportName(String),
}

/// Settings for the external toolchain, as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BackendSettings {
  /// Directory with the external project's build description.
  pub source_dir: PathBuf,
  /// Out-of-tree build directory.
  pub build_dir: PathBuf,
  /// Meta-build configuration program.
  pub configure: String,
  /// Build tool; also run with the `install` target.
  pub build_tool: String,
  /// Feature flags handed to the configure program as a single argument.
  pub feature_flags: String,
  /// Environment variable holding the job count.
  pub jobs_env: String,
}

impl Default for BackendSettings {
  fn default() -> Self {
    Self {
      source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
      build_dir: PathBuf::from(DEFAULT_BUILD_DIR),
      configure: "cmake".to_string(),
      build_tool: "make".to_string(),
      feature_flags: "-Dminimal=ON -Dasimage=OFF".to_string(),
      jobs_env: DEFAULT_JOBS_ENV.to_string(),
    }
  }
}

/// Settings for installing into an interpreter's library directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct InstallSettings {
  /// Interpreter queried for its library directory.
  pub python: String,
  /// Library directory to use instead of asking the interpreter.
  pub lib_dir: Option<PathBuf>,
}

impl Default for InstallSettings {
  fn default() -> Self {
    Self {
      python: "python3".to_string(),
      lib_dir: None,
    }
  }
}

/// The `nativepack.toml` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Manifest {
  pub package: PackageMetadata,
  pub backend: BackendSettings,
  pub install: InstallSettings,
}

impl Manifest {
  pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(content)
  }
}

/// Fully resolved configuration for one packaging run.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
  pub top_dir: PathBuf,
  pub build_dir: PathBuf,
  pub source_dir: PathBuf,
  /// Where the build tool's `install` target places the clean tree:
  /// `<build_dir>/install/<import_name>`.
  pub install_prefix: PathBuf,
  pub configure_program: String,
  pub build_program: String,
  pub feature_flags: String,
  pub jobs_env: String,
  pub python: String,
  pub lib_dir: Option<PathBuf>,
  pub package: PackageMetadata,
}

impl ProjectConfig {
  /// Load the configuration for the project rooted at `top_dir`.
  ///
  /// A missing manifest is not an error; defaults apply.
  pub fn load(top_dir: &Path) -> Result<Self, ConfigError> {
    let top_dir = dunce::canonicalize(top_dir).map_err(|source| ConfigError::ProjectDir {
      path: top_dir.to_path_buf(),
      source,
    })?;

    let manifest_path = top_dir.join(MANIFEST_FILE);
    let manifest = if manifest_path.is_file() {
      debug!(path = ?manifest_path, "loading project manifest");
      let content = std::fs::read_to_string(&manifest_path).map_err(|source| ConfigError::Read {
        path: manifest_path.clone(),
        source,
      })?;
      Manifest::from_toml(&content).map_err(|source| ConfigError::Parse {
        path: manifest_path.clone(),
        source,
      })?
    } else {
      debug!(path = ?manifest_path, "no project manifest, using defaults");
      Manifest::default()
    };

    Self::from_manifest(top_dir, manifest)
  }

  /// Resolve a manifest against an (already absolute) project directory.
  pub fn from_manifest(top_dir: PathBuf, manifest: Manifest) -> Result<Self, ConfigError> {
    let Manifest {
      package,
      backend,
      install,
    } = manifest;

    let import_name = package.import_name.as_str();
    let mut components = Path::new(import_name).components();
    let single_component = matches!(
      (components.next(), components.next()),
      (Some(std::path::Component::Normal(_)), None)
    );
    if !single_component {
      return Err(ConfigError::InvalidImportName(package.import_name.clone()));
    }

    let build_dir = top_dir.join(&backend.build_dir);
    let source_dir = top_dir.join(&backend.source_dir);
    let install_prefix = build_dir.join(INSTALL_SUBDIR).join(import_name);

    Ok(Self {
      configure_program: resolve_program(&top_dir, &backend.configure),
      build_program: resolve_program(&top_dir, &backend.build_tool),
      feature_flags: backend.feature_flags,
      jobs_env: backend.jobs_env,
      python: resolve_program(&top_dir, &install.python),
      lib_dir: install.lib_dir.map(|dir| top_dir.join(dir)),
      top_dir,
      build_dir,
      source_dir,
      install_prefix,
      package,
    })
  }

  /// Parent of the install prefix; this whole tree is copied on install.
  pub fn install_root(&self) -> PathBuf {
    self.build_dir.join(INSTALL_SUBDIR)
  }

  /// The package's own Python sources, installed before the backend tree.
  pub fn package_source_dir(&self) -> PathBuf {
    self.source_dir.join(&self.package.import_name)
  }
}

/// Programs given as relative paths (`tools/cmake`) are anchored at the
/// project directory; bare names are left for `PATH` lookup.
fn resolve_program(top_dir: &Path, program: &str) -> String {
  let path = Path::new(program);
  if path.is_relative() && path.components().count() > 1 {
    top_dir.join(path).to_string_lossy().into_owned()
  } else {
    program.to_string()
  }
}
