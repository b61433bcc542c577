//! External command execution.
//!
//! The build stages talk to the toolchain only through [`CommandRunner`], so
//! tests can swap in a recording runner while the CLI uses [`SystemRunner`].

pub mod cmd;
pub mod types;

pub use cmd::{SystemRunner, capture_stdout};
pub use types::{CommandRunner, ExecuteError, ExitOutcome, Invocation};
