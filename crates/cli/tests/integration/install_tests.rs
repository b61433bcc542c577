//! Install command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn install_overlays_backend_onto_lib_dir() {
  let env = TestEnv::new();
  let site = env.root().join("site-packages");

  env
    .cmd()
    .arg("install")
    .arg("--lib-dir")
    .arg(&site)
    .assert()
    .success()
    .stdout(predicate::str::contains("Installed cppyy_backend"))
    .stdout(predicate::str::contains("cppyy_backend/_genreflex.py"))
    .stdout(predicate::str::contains("Backend files: 2"));

  assert_eq!(env.read(&site.join("cppyy_backend/lib/libcppyy_backend.so")), "backend\n");
  assert!(site.join("cppyy_backend/etc/system.rootrc").is_file());
  assert!(site.join("cppyy_backend/_genreflex.py").is_file());
}

#[test]
fn install_skip_build_without_build_dir_fails() {
  let env = TestEnv::new();
  let site = env.root().join("site-packages");

  env
    .cmd()
    .arg("install")
    .arg("--lib-dir")
    .arg(&site)
    .arg("--skip-build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to find build dir!"));

  assert!(!site.join("cppyy_backend/lib").exists());
}

#[test]
fn install_skip_build_reuses_previous_build() {
  let env = TestEnv::new();
  let site = env.root().join("site-packages");

  env.cmd().arg("build").assert().success();
  std::fs::remove_file(env.build_dir().join("build-args.txt")).unwrap();

  env
    .cmd()
    .arg("install")
    .arg("--lib-dir")
    .arg(&site)
    .arg("--skip-build")
    .assert()
    .success();

  assert!(!env.build_dir().join("build-args.txt").exists());
  assert!(site.join("cppyy_backend/lib/libcppyy_backend.so").is_file());
}
