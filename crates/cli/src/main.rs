mod cmd;
mod output;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

/// nativepack - build a native backend with cmake/make and package it as a wheel
#[derive(Parser)]
#[command(name = "nativepack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Project root containing nativepack.toml (default: current directory)
  #[arg(short = 'C', long, global = true, default_value = ".")]
  project_dir: PathBuf,

  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Configure and build the backend
  Build,

  /// Build and install the package into a library directory
  Install {
    /// Library directory to install into (default: the interpreter's purelib)
    #[arg(long)]
    lib_dir: Option<PathBuf>,

    /// Reuse an existing build directory instead of building first
    #[arg(long)]
    skip_build: bool,
  },

  /// Build a platform-tagged wheel
  Wheel {
    /// Directory the wheel is written to (default: <project>/dist)
    #[arg(long)]
    dist_dir: Option<PathBuf>,

    /// Reuse an existing build directory instead of building first
    #[arg(long)]
    skip_build: bool,
  },

  /// Show resolved project information
  Info {
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_ansi(std::io::stderr().is_terminal())
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build => cmd::cmd_build(&cli.project_dir),
    Commands::Install { lib_dir, skip_build } => cmd::cmd_install(&cli.project_dir, lib_dir, skip_build),
    Commands::Wheel { dist_dir, skip_build } => cmd::cmd_wheel(&cli.project_dir, dist_dir, skip_build),
    Commands::Info { format } => cmd::cmd_info(&cli.project_dir, format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
