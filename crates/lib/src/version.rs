//! Version derived from source-control state.
//!
//! Resolution order: the `NATIVEPACK_VERSION` override, then
//! `git describe`, then the manifest's `fallback-version`.
//!
//! `git describe --tags --long --dirty --always` output maps to versions as:
//! - `v1.2.3-0-gabc1234` → `1.2.3`
//! - `v1.2.3-4-gabc1234` → `1.2.4.dev4+gabc1234`
//! - `v1.2.3-0-gabc1234-dirty` → `1.2.4.dev0+gabc1234.dirty`
//! - `abc1234` (no tags) → `0.1.dev0+gabc1234`

use thiserror::Error;
use tracing::{debug, info};

use crate::config::ProjectConfig;
use crate::consts::VERSION_ENV;
use crate::execute::{ExecuteError, Invocation, capture_stdout};

#[derive(Debug, Error)]
pub enum VersionError {
  #[error("could not determine version from git ({source}) and no fallback-version is configured")]
  Unresolved {
    #[source]
    source: ExecuteError,
  },

  #[error("unrecognised git describe output: {0:?}")]
  Unparsable(String),
}

/// Parsed `git describe` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Describe {
  /// Nearest tag, `None` when the repository has no tags.
  pub tag: Option<String>,
  /// Commits since the tag.
  pub distance: u32,
  /// Abbreviated commit hash (without the `g` prefix).
  pub hash: String,
  pub dirty: bool,
}

impl Describe {
  /// Parse the output of `git describe --tags --long --dirty --always`.
  pub fn parse(output: &str) -> Option<Self> {
    let output = output.trim();
    let (rest, dirty) = match output.strip_suffix("-dirty") {
      Some(rest) => (rest, true),
      None => (output, false),
    };
    if rest.is_empty() {
      return None;
    }

    // Tag names may contain dashes, so split from the right.
    let mut parts = rest.rsplitn(3, '-');
    let last = parts.next()?;
    let middle = parts.next();
    let first = parts.next();

    match (first, middle) {
      (Some(tag), Some(distance)) if last.starts_with('g') && is_hex(&last[1..]) => Some(Self {
        tag: Some(tag.to_string()),
        distance: distance.parse().ok()?,
        hash: last[1..].to_string(),
        dirty,
      }),
      (None, None) if is_hex(last) => Some(Self {
        tag: None,
        distance: 0,
        hash: last.to_string(),
        dirty,
      }),
      _ => None,
    }
  }

  /// Format as a PEP 440 version.
  pub fn to_version(&self) -> String {
    let local = if self.dirty {
      format!("+g{}.dirty", self.hash)
    } else {
      format!("+g{}", self.hash)
    };

    match &self.tag {
      None => format!("0.1.dev0{}", local),
      Some(tag) => {
        let base = tag.strip_prefix('v').unwrap_or(tag);
        if self.distance == 0 && !self.dirty {
          return base.to_string();
        }
        match bump_last(base) {
          Some(next) => format!("{}.dev{}{}", next, self.distance, local),
          None => format!("{}.post{}{}", base, self.distance, local),
        }
      }
    }
  }
}

fn is_hex(s: &str) -> bool {
  !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// `1.2.3` → `1.2.4`; `None` when the last component is not a plain number.
fn bump_last(version: &str) -> Option<String> {
  let (head, last) = match version.rsplit_once('.') {
    Some((head, last)) => (Some(head), last),
    None => (None, version),
  };
  let next = last.parse::<u64>().ok()?.checked_add(1)?;
  Some(match head {
    Some(head) => format!("{}.{}", head, next),
    None => next.to_string(),
  })
}

/// Determine the version for the project.
pub async fn resolve_version(config: &ProjectConfig) -> Result<String, VersionError> {
  let version_override = std::env::var(VERSION_ENV).ok();
  resolve_version_with(config, version_override.as_deref()).await
}

/// Like [`resolve_version`], with the override passed explicitly.
pub async fn resolve_version_with(
  config: &ProjectConfig,
  version_override: Option<&str>,
) -> Result<String, VersionError> {
  if let Some(version) = version_override.map(str::trim).filter(|v| !v.is_empty()) {
    debug!(env = VERSION_ENV, version = %version, "version from environment");
    return Ok(version.to_string());
  }

  let invocation =
    Invocation::new("git", &config.top_dir).args(["describe", "--tags", "--long", "--dirty", "--always"]);

  match capture_stdout(&invocation).await {
    Ok(output) => {
      let describe = Describe::parse(&output).ok_or_else(|| VersionError::Unparsable(output.clone()))?;
      let version = describe.to_version();
      info!(version = %version, "version from git");
      Ok(version)
    }
    Err(source) => match &config.package.fallback_version {
      Some(version) => {
        debug!(error = %source, version = %version, "git unavailable, using fallback version");
        Ok(version.clone())
      }
      None => Err(VersionError::Unresolved { source }),
    },
  }
}
