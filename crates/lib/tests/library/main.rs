//! Library integration tests: full pipeline runs against a fake toolchain.
#![cfg(unix)]

mod pipeline_tests;
