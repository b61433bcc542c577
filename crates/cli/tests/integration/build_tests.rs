//! Build command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn build_runs_configure_then_make() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built cppyy_backend"));

  let configure_args = env.read(&env.build_dir().join("configure-args.txt"));
  assert!(configure_args.contains("-Dminimal=ON -Dasimage=OFF\n"));
  assert!(configure_args.contains("-DCMAKE_INSTALL_PREFIX="));
  assert_eq!(env.read(&env.build_dir().join("build-args.txt")), "-j1\n");
}

#[test]
fn build_uses_make_nprocs() {
  let env = TestEnv::new();

  env.cmd().arg("build").env("MAKE_NPROCS", "4").assert().success();

  assert_eq!(env.read(&env.build_dir().join("build-args.txt")), "-j4\n");
}

#[test]
fn build_warns_on_bad_make_nprocs() {
  let env = TestEnv::new();

  env
    .cmd()
    .arg("build")
    .env("MAKE_NPROCS", "lots")
    .assert()
    .success()
    .stderr(predicate::str::contains("Integer expected for MAKE_NPROCS, but got lots (ignored)"));

  assert_eq!(env.read(&env.build_dir().join("build-args.txt")), "-j1\n");
}

#[test]
fn build_fails_when_configure_fails() {
  let env = TestEnv::failing_configure();

  env
    .cmd()
    .arg("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to configure cppyy_backend"));

  assert!(!env.build_dir().join("build-args.txt").exists());
}
