//! Host detection and wheel platform tags.
//!
//! Wheels built here contain native code, so they carry the concrete tag of
//! the machine that built them (`linux_x86_64`, `macosx_11_0_arm64`, `win_amd64`).

pub mod arch;
pub mod os;
pub mod paths;

use arch::Arch;
use os::Os;
use std::fmt;

/// Platform identifier combining architecture and OS (e.g., "aarch64-darwin")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// Returns the platform triple string (e.g., "aarch64-darwin")
  pub fn triple(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }

  /// Returns the wheel platform tag for this platform (e.g., "linux_x86_64").
  ///
  /// `macos_target` is the deployment target used on macOS ("10.15", "11");
  /// when absent the oldest target the architecture supports is assumed.
  pub fn wheel_tag(&self, macos_target: Option<&str>) -> String {
    match self.os {
      Os::Linux => format!("linux_{}", self.arch.linux_machine()),
      Os::MacOs => {
        let (machine, oldest) = self.arch.macos_machine();
        let target = macos_target.map(str::trim).filter(|t| !t.is_empty()).unwrap_or(oldest);
        let mut parts = target.split('.');
        let major = parts.next().map(tag_component).filter(|m| !m.is_empty());
        let minor = parts.next().map(tag_component).filter(|m| !m.is_empty());
        format!(
          "macosx_{}_{}_{}",
          major.as_deref().unwrap_or("10"),
          minor.as_deref().unwrap_or("0"),
          machine
        )
      }
      Os::Windows => self.arch.windows_tag().to_string(),
    }
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.triple())
  }
}

/// Returns the platform triple for the current system (e.g., "aarch64-darwin")
///
/// Returns `None` if the current platform is not supported
pub fn platform_triple() -> Option<String> {
  Platform::current().map(|p| p.triple())
}

/// Returns the wheel platform tag of the build host.
///
/// Hosts without dedicated handling still get a concrete `<os>_<arch>` tag,
/// so the result is never the generic `any`.
pub fn host_wheel_tag() -> String {
  let macos_target = std::env::var("MACOSX_DEPLOYMENT_TARGET").ok();
  match Platform::current() {
    Some(platform) => platform.wheel_tag(macos_target.as_deref()),
    None => generic_wheel_tag(std::env::consts::OS, std::env::consts::ARCH),
  }
}

/// Joins an OS and architecture name into a tag-safe identifier.
pub fn generic_wheel_tag(os: &str, arch: &str) -> String {
  tag_component(&format!("{}_{}", os, arch))
}

/// Lowercase ASCII alphanumerics; everything else becomes `_`.
fn tag_component(raw: &str) -> String {
  raw
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
    .collect()
}
