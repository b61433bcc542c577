//! Pipeline runs with real subprocesses.

use std::num::NonZeroUsize;

use nativepack_lib::execute::SystemRunner;
use nativepack_lib::jobs::Jobs;
use nativepack_lib::pipeline::{PackError, Pipeline};
use nativepack_lib::stage::{InstallDestination, Stage};

use super::common::TestProject;

#[tokio::test]
async fn full_pipeline_installs_backend_tree() {
  let project = TestProject::new();
  let config = project.config();
  let site = project.root().join("site");
  let cwd_before = std::env::current_dir().unwrap();

  let report = Pipeline::new(&config, &SystemRunner, Jobs::SERIAL)
    .install(InstallDestination::Library(site.clone()), false)
    .await
    .unwrap();

  assert_eq!(std::env::current_dir().unwrap(), cwd_before);
  assert_eq!(
    project.read(&site.join("cppyy_backend/lib/libcppyy_backend.so")),
    "backend\n"
  );
  assert!(site.join("cppyy_backend/include/backend.h").is_file());
  assert!(site.join("cppyy_backend/__init__.py").is_file());
  assert_eq!(report.outputs.last(), Some(&site.join("cppyy_backend")));
  assert_eq!(project.read(&config.build_dir.join("build-args.txt")), "-j1\n");
}

#[tokio::test]
async fn configure_receives_single_flag_argument() {
  let project = TestProject::new();
  let config = project.config();

  Pipeline::new(&config, &SystemRunner, Jobs::SERIAL).build().await.unwrap();

  let args = project.read(&config.build_dir.join("configure-args.txt"));
  let lines: Vec<&str> = args.lines().collect();
  assert_eq!(
    lines,
    vec![
      config.source_dir.to_string_lossy().as_ref(),
      "-Dminimal=ON -Dasimage=OFF",
      format!("-DCMAKE_INSTALL_PREFIX={}", config.install_prefix.display()).as_str(),
    ]
  );
}

#[tokio::test]
async fn job_count_reaches_build_tool() {
  let project = TestProject::new();
  let config = project.config();
  let jobs = Jobs::new(NonZeroUsize::new(8).unwrap());

  Pipeline::new(&config, &SystemRunner, jobs).build().await.unwrap();

  assert_eq!(project.read(&config.build_dir.join("build-args.txt")), "-j8\n");
}

#[tokio::test]
async fn failing_configure_aborts_with_setup_error() {
  let project = TestProject::with_scripts("#!/bin/sh\nexit 1\n", super::common::FAKE_MAKE);
  let config = project.config();
  let cwd_before = std::env::current_dir().unwrap();

  let err = Pipeline::new(&config, &SystemRunner, Jobs::SERIAL)
    .build()
    .await
    .unwrap_err();

  assert!(matches!(err, PackError::Setup(ref e) if e.stage == Stage::Configure));
  assert_eq!(err.to_string(), "Failed to configure cppyy_backend");
  assert_eq!(std::env::current_dir().unwrap(), cwd_before);
  assert!(!config.build_dir.join("build-args.txt").exists());
}

#[tokio::test]
async fn wheel_contains_backend_and_metadata() {
  let project = TestProject::new();
  project.write_file("README.rst", "cppyy-backend\n=============\n");
  let config = project.config();
  let dist = project.root().join("dist");

  let artifact = Pipeline::new(&config, &SystemRunner, Jobs::SERIAL)
    .wheel(&dist, "6.2.0", false)
    .await
    .unwrap();

  assert!(!artifact.tag.is_generic());
  let archive = zip::ZipArchive::new(std::fs::File::open(&artifact.path).unwrap()).unwrap();
  let names: Vec<&str> = archive.file_names().collect();
  assert!(names.contains(&"cppyy_backend/lib/libcppyy_backend.so"));
  assert!(names.contains(&"cppyy_backend/__init__.py"));
  assert!(names.contains(&"cppyy_backend-6.2.0.dist-info/METADATA"));
  assert!(names.contains(&"cppyy_backend-6.2.0.dist-info/WHEEL"));
  assert!(names.contains(&"cppyy_backend-6.2.0.dist-info/RECORD"));
}
