use std::fmt;
use std::str::FromStr;

/// CPU architectures with known wheel machine names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
  X86_64,
  Aarch64,
  X86,
}

impl Arch {
  pub fn current() -> Option<Self> {
    std::env::consts::ARCH.parse().ok()
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::Aarch64 => "aarch64",
      Self::X86 => "x86",
    }
  }

  /// Machine name as `uname -m` reports it on Linux.
  pub fn linux_machine(&self) -> &'static str {
    match self {
      Self::X86 => "i686",
      other => other.as_str(),
    }
  }

  /// Machine name used in macOS platform tags, with the oldest deployment
  /// target that machine can have.
  pub fn macos_machine(&self) -> (&'static str, &'static str) {
    match self {
      Self::Aarch64 => ("arm64", "11.0"),
      Self::X86_64 => ("x86_64", "10.9"),
      Self::X86 => ("i386", "10.9"),
    }
  }

  /// Full Windows platform tag; 32-bit x86 has no `win_` prefix.
  pub fn windows_tag(&self) -> &'static str {
    match self {
      Self::X86_64 => "win_amd64",
      Self::X86 => "win32",
      Self::Aarch64 => "win_arm64",
    }
  }
}

impl FromStr for Arch {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "x86_64" | "amd64" => Ok(Self::X86_64),
      "aarch64" | "arm64" => Ok(Self::Aarch64),
      "x86" | "i386" | "i686" => Ok(Self::X86),
      other => Err(format!("unsupported architecture: {}", other)),
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
