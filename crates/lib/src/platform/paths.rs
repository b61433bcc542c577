use std::path::{Path, PathBuf};

use crate::execute::{ExecuteError, Invocation, capture_stdout};

/// Script printing the interpreter's pure-library install directory.
const PURELIB_SCRIPT: &str = "import sysconfig; print(sysconfig.get_paths()['purelib'])";

/// Returns the staging directory used while assembling a wheel
/// (e.g. `<top>/build/bdist.linux_x86_64/wheel`).
pub fn staging_dir(top_dir: &Path, platform_tag: &str) -> PathBuf {
  top_dir
    .join("build")
    .join(format!("bdist.{}", platform_tag))
    .join("wheel")
}

/// Returns the default output directory for built wheels.
pub fn dist_dir(top_dir: &Path) -> PathBuf {
  top_dir.join("dist")
}

/// Asks `python` where it installs pure-Python packages.
pub async fn python_purelib(python: &str, cwd: &Path) -> Result<PathBuf, ExecuteError> {
  let invocation = Invocation::new(python, cwd).args(["-c", PURELIB_SCRIPT]);
  let stdout = capture_stdout(&invocation).await?;
  Ok(PathBuf::from(stdout))
}
