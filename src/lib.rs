// src/lib.rs

pub mod cli;
pub mod config;
pub mod discover;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod node;
pub mod script;

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, resolve_config};
use crate::discover::{DiscoveryOptions, discover};
use crate::exec::{BuildExecutor, ExitCode, MakeExecutor};
use crate::fs::{FileSystem, RealFileSystem};
use crate::script::{Script, check_acyclic, synthesize};

/// Options for turning a tree into a script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanOptions {
    pub discovery: DiscoveryOptions,
    /// Reject prerequisite cycles here instead of leaving it to the executor.
    pub check_cycles: bool,
}

/// Discover the ready nodes under `root` and synthesize their build script.
///
/// Read-only: nothing on disk changes until an executor runs the script.
pub fn plan<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    options: PlanOptions,
) -> errors::Result<Script> {
    let discovery = discover(fs, root, options.discovery)?;
    let script = synthesize(discovery)?;

    if options.check_cycles {
        check_acyclic(&script)?;
    }
    Ok(script)
}

/// Plan `root` and run the result with `executor`, returning its exit code.
pub async fn run_pipeline<F, E>(
    fs: &F,
    root: &Path,
    options: PlanOptions,
    executor: &mut E,
) -> errors::Result<ExitCode>
where
    F: FileSystem + ?Sized,
    E: BuildExecutor + ?Sized,
{
    let script = plan(fs, root, options)?;
    info!(
        root = %root.display(),
        rules = script.rules().len(),
        "build script ready"
    );
    executor.execute(&script).await
}

/// Plan `root` and write the script to `out` instead of executing it.
pub fn write_plan<F, W>(
    fs: &F,
    root: &Path,
    options: PlanOptions,
    out: &mut W,
) -> errors::Result<()>
where
    F: FileSystem + ?Sized,
    W: Write + ?Sized,
{
    let script = plan(fs, root, options)?;
    write!(out, "{script}")?;
    out.flush()?;
    Ok(())
}

/// Command-line switches turn features on; they never turn off what the
/// config file enabled.
pub fn effective_options(args: &CliArgs, cfg: &ConfigFile) -> PlanOptions {
    PlanOptions {
        discovery: DiscoveryOptions {
            recursive: args.recursive || cfg.discovery.recursive,
        },
        check_cycles: args.check_cycles || cfg.discovery.check_cycles,
    }
}

/// High-level entry point used by `main.rs`.
///
/// This wires together config loading, discovery, synthesis and the build
/// executor. The returned code is the executor's exit code.
pub async fn run(args: CliArgs) -> Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let cfg = resolve_config(args.config.as_deref(), &cwd)?;

    let options = effective_options(&args, &cfg);
    debug!(?options, dry_run = args.dry_run, "effective options");

    let fs = RealFileSystem;

    if args.print {
        write_plan(&fs, &args.node, options, &mut std::io::stdout())?;
        return Ok(0);
    }

    let mut executor = MakeExecutor::from_config(&cfg.executor);
    let code = run_pipeline(&fs, &args.node, options, &mut executor).await?;
    Ok(code)
}
