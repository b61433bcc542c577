//! Wheel command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

fn wheel_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
  std::fs::read_dir(dir)
    .unwrap()
    .map(|entry| entry.unwrap().path())
    .filter(|path| path.extension().is_some_and(|ext| ext == "whl"))
    .collect()
}

#[test]
fn wheel_is_written_to_dist() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("wheel")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built wheel"))
    .stdout(predicate::str::contains("py2.py3-none-"));

  let wheels = wheel_files(&env.root().join("dist"));
  assert_eq!(wheels.len(), 1);
  let name = wheels[0].file_name().unwrap().to_string_lossy().into_owned();
  assert!(name.starts_with("cppyy_backend-6.2.0-py2.py3-none-"), "unexpected wheel name {}", name);
  assert!(!name.ends_with("-any.whl"), "wheel must be platform tagged: {}", name);
}

#[test]
fn wheel_honours_version_override_and_dist_dir() {
  let env = TestEnv::new();
  let out = env.root().join("out");

  env
    .cmd()
    .arg("wheel")
    .arg("--dist-dir")
    .arg(&out)
    .env("NATIVEPACK_VERSION", "1.9.0")
    .assert()
    .success();

  let wheels = wheel_files(&out);
  assert_eq!(wheels.len(), 1);
  let name = wheels[0].file_name().unwrap().to_string_lossy().into_owned();
  assert!(name.starts_with("cppyy_backend-1.9.0-"));
}

#[test]
fn wheel_fails_when_configure_fails() {
  let env = TestEnv::failing_configure();

  env
    .cmd()
    .arg("wheel")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to configure cppyy_backend"));

  assert!(!env.root().join("dist").exists());
}
