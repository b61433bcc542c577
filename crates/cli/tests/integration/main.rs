//! CLI integration tests driving the `nativepack` binary against a fake toolchain.
#![cfg(unix)]

mod common;

mod build_tests;
mod install_tests;
mod wheel_tests;
