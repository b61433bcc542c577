use std::fmt;

use serde::Serialize;

use crate::platform::host_wheel_tag;

/// Platform tag used by wheels that run anywhere.
pub const GENERIC_PLATFORM: &str = "any";

/// A compressed wheel tag triple, e.g. `py2.py3-none-linux_x86_64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WheelTag {
  pub python: String,
  pub abi: String,
  pub platform: String,
}

impl WheelTag {
  /// The tag a pure package would get: `py2.py3-none-any` when universal,
  /// `py3-none-any` otherwise.
  pub fn for_package(universal: bool) -> Self {
    Self {
      python: if universal { "py2.py3" } else { "py3" }.to_string(),
      abi: "none".to_string(),
      platform: GENERIC_PLATFORM.to_string(),
    }
  }

  pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
    self.platform = platform.into();
    self
  }

  /// Replace the platform with the build host's concrete platform tag,
  /// whatever it was before.
  pub fn with_build_platform(self) -> Self {
    self.with_platform(host_wheel_tag())
  }

  pub fn is_generic(&self) -> bool {
    self.platform == GENERIC_PLATFORM
  }

  /// Expand the compressed tag set into individual tags for the WHEEL file.
  pub fn expand(&self) -> Vec<String> {
    let mut tags = Vec::new();
    for python in self.python.split('.') {
      for abi in self.abi.split('.') {
        for platform in self.platform.split('.') {
          tags.push(format!("{}-{}-{}", python, abi, platform));
        }
      }
    }
    tags
  }
}

impl fmt::Display for WheelTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}-{}", self.python, self.abi, self.platform)
  }
}
