//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Records configure arguments and the install prefix.
const FAKE_CMAKE: &str = r#"#!/bin/sh
printf '%s\n' "$@" > configure-args.txt
for arg in "$@"; do
  case "$arg" in
    -DCMAKE_INSTALL_PREFIX=*) printf '%s' "${arg#-DCMAKE_INSTALL_PREFIX=}" > prefix.txt ;;
  esac
done
"#;

/// `install` populates the prefix; any other invocation records its arguments.
const FAKE_MAKE: &str = r#"#!/bin/sh
if [ "$1" = "install" ]; then
  prefix=$(cat prefix.txt)
  mkdir -p "$prefix/lib" "$prefix/etc"
  echo backend > "$prefix/lib/libcppyy_backend.so"
  echo 'setting = 1' > "$prefix/etc/system.rootrc"
else
  printf '%s\n' "$@" > build-args.txt
fi
"#;

const FAILING_TOOL: &str = "#!/bin/sh\necho 'boom' >&2\nexit 2\n";

const MANIFEST: &str = r#"
[package]
fallback-version = "6.2.0"

[backend]
configure = "tools/cmake"
build-tool = "tools/make"
"#;

/// Isolated project directory with a manifest pointing at fake tools.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// A project whose toolchain succeeds.
  pub fn new() -> Self {
    Self::with_tools(FAKE_CMAKE, FAKE_MAKE)
  }

  /// A project whose configure step exits non-zero.
  pub fn failing_configure() -> Self {
    Self::with_tools(FAILING_TOOL, FAKE_MAKE)
  }

  fn with_tools(cmake: &str, make: &str) -> Self {
    let env = Self {
      temp: TempDir::new().unwrap(),
    };
    env.write_file("nativepack.toml", MANIFEST);
    env.write_file("src/cppyy_backend/__init__.py", "");
    env.write_file("src/cppyy_backend/_genreflex.py", "def main():\n    pass\n");
    env.write_executable("tools/cmake", cmake);
    env.write_executable("tools/make", make);
    env
  }

  /// Write a file relative to the project root.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  fn write_executable(&self, relative_path: &str, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    self.write_file(relative_path, content);
    let path = self.temp.path().join(relative_path);
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  }

  /// Canonical project root.
  pub fn root(&self) -> PathBuf {
    dunce::canonicalize(self.temp.path()).unwrap()
  }

  pub fn build_dir(&self) -> PathBuf {
    self.root().join("builddir")
  }

  pub fn read(&self, path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
  }

  /// A `nativepack` command rooted at this project.
  ///
  /// Clears the variables that would otherwise leak host state into the run:
  /// `MAKE_NPROCS`, `NATIVEPACK_VERSION`, `RUST_LOG`.
  pub fn cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("nativepack");
    cmd.arg("--project-dir").arg(self.temp.path());
    cmd.env_remove("MAKE_NPROCS");
    cmd.env_remove("NATIVEPACK_VERSION");
    cmd.env_remove("RUST_LOG");
    cmd.env("GIT_CEILING_DIRECTORIES", self.temp.path().parent().unwrap_or(self.temp.path()));
    cmd
  }
}
