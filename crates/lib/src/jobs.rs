//! Build job count resolution.
//!
//! The job count for the parallel build tool comes from an environment
//! variable (`MAKE_NPROCS` by default). Anything other than a positive
//! integer degrades to a serial build; a bad value never aborts packaging.

use std::fmt;
use std::num::NonZeroUsize;

use tracing::{debug, warn};

/// Number of parallel jobs requested from the build tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jobs(NonZeroUsize);

impl Jobs {
  pub const SERIAL: Jobs = Jobs(NonZeroUsize::MIN);

  pub fn new(count: NonZeroUsize) -> Self {
    Self(count)
  }

  pub fn get(self) -> usize {
    self.0.get()
  }

  /// Resolve the job count from the raw value of `var`.
  ///
  /// Unset or empty means serial without comment. A value that is not a
  /// positive integer is logged as a warning and also means serial.
  pub fn parse(raw: Option<&str>, var: &str) -> Self {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
      return Self::SERIAL;
    };

    match raw.parse::<usize>().ok().and_then(NonZeroUsize::new) {
      Some(count) => {
        debug!(var = %var, jobs = count.get(), "job count from environment");
        Self(count)
      }
      None => {
        warn!("Integer expected for {}, but got {} (ignored)", var, raw);
        Self::SERIAL
      }
    }
  }

  /// Resolve the job count from the environment variable `var`.
  pub fn from_env(var: &str) -> Self {
    let raw = std::env::var_os(var).map(|v| v.to_string_lossy().into_owned());
    Self::parse(raw.as_deref(), var)
  }

  /// The `-j` flag passed to the build tool.
  pub fn make_flag(self) -> String {
    format!("-j{}", self.0)
  }
}

impl Default for Jobs {
  fn default() -> Self {
    Self::SERIAL
  }
}

impl fmt::Display for Jobs {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
