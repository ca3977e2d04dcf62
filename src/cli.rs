// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `rf`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "rf",
    version,
    about = "Run the pending nodes of a computation tree in dependency order.",
    long_about = None
)]
pub struct CliArgs {
    /// Root node of the tree to run.
    #[arg(value_name = "NODE")]
    pub node: PathBuf,

    /// Scan the whole subtree under NODE, not just NODE itself.
    #[arg(short, long)]
    pub recursive: bool,

    /// Verbose logging (same as `--log-level debug`).
    #[arg(short, long)]
    pub verbose: bool,

    /// Accepted for compatibility; has no effect.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the build script to stdout instead of running it.
    #[arg(long)]
    pub print: bool,

    /// Fail before running anything if node dependencies form a cycle.
    #[arg(long)]
    pub check_cycles: bool,

    /// Path to a config file (TOML). Default: `rf.toml` in the current
    /// directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `-v`, `RF_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

impl CliArgs {
    /// Level requested on the command line, if any. `--log-level` wins over `-v`.
    pub fn requested_log_level(&self) -> Option<LogLevel> {
        self.log_level
            .or_else(|| self.verbose.then_some(LogLevel::Debug))
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
