//! nativepack-lib: packaging logic for native backends
//!
//! This crate drives an external CMake/Make toolchain and turns its install
//! tree into a Python distribution:
//! - `config`: the project configuration, loaded once from `nativepack.toml`
//! - `stage`: configure/build, package install, and backend install steps
//! - `wheel`: platform tag resolution and wheel archive assembly
//! - `pipeline`: the flows the CLI commands run

pub mod config;
pub mod consts;
pub mod execute;
pub mod jobs;
pub mod metadata;
pub mod pipeline;
pub mod platform;
pub mod stage;
pub mod util;
pub mod version;
pub mod wheel;
