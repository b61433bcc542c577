//! Test utilities for nativepack-lib.
//!
//! [`RecordingRunner`] stands in for the external toolchain: it records every
//! invocation and answers with a scripted exit code.

use std::io;
use std::path::Path;
use std::sync::Mutex;

use crate::config::{Manifest, ProjectConfig};
use crate::execute::{CommandRunner, ExitOutcome, Invocation};

type ExitScript = Box<dyn Fn(&Invocation) -> i32 + Send + Sync>;

/// Runner that records invocations instead of spawning processes.
pub struct RecordingRunner {
  calls: Mutex<Vec<Invocation>>,
  script: ExitScript,
  on_run: Option<Box<dyn Fn(&Invocation) + Send + Sync>>,
}

impl RecordingRunner {
  /// Every command succeeds.
  pub fn new() -> Self {
    Self::scripted(|_| 0)
  }

  /// Exit codes are chosen by `script`.
  pub fn scripted(script: impl Fn(&Invocation) -> i32 + Send + Sync + 'static) -> Self {
    Self {
      calls: Mutex::new(Vec::new()),
      script: Box::new(script),
      on_run: None,
    }
  }

  /// Commands whose first argument is `arg` (e.g. "install") exit with `code`.
  pub fn failing_on_arg(arg: &'static str, code: i32) -> Self {
    Self::scripted(move |inv| if inv.args.first().map(String::as_str) == Some(arg) { code } else { 0 })
  }

  /// Commands run by `program` exit with `code`.
  pub fn failing_program(program: &'static str, code: i32) -> Self {
    Self::scripted(move |inv| if inv.program == program { code } else { 0 })
  }

  /// Run a side effect for each invocation, e.g. to fake an install tree.
  pub fn with_effect(mut self, effect: impl Fn(&Invocation) + Send + Sync + 'static) -> Self {
    self.on_run = Some(Box::new(effect));
    self
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().clone()
  }
}

impl CommandRunner for RecordingRunner {
  async fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome> {
    self.calls.lock().unwrap().push(invocation.clone());
    if let Some(effect) = &self.on_run {
      effect(invocation);
    }
    Ok(ExitOutcome {
      code: Some((self.script)(invocation)),
    })
  }
}

/// A default configuration rooted at `top_dir`.
pub fn test_config(top_dir: &Path) -> ProjectConfig {
  ProjectConfig::from_manifest(top_dir.to_path_buf(), Manifest::default()).unwrap()
}

/// Effect that materializes a small backend install tree under `prefix`
/// whenever the `install` target runs.
pub fn fake_install(prefix: &Path) -> impl Fn(&Invocation) + Send + Sync + 'static {
  let prefix = prefix.to_path_buf();
  move |inv| {
    if inv.args.first().map(String::as_str) == Some("install") {
      std::fs::create_dir_all(prefix.join("lib")).unwrap();
      std::fs::write(prefix.join("lib/libcppyy_backend.so"), b"elf").unwrap();
      std::fs::create_dir_all(prefix.join("include")).unwrap();
      std::fs::write(prefix.join("include/backend.h"), b"#pragma once\n").unwrap();
    }
  }
}
