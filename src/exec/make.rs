// src/exec/make.rs

//! Process-backed executor that feeds the script on standard input.

use std::future::Future;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::ExecutorSection;
use crate::errors::{Result, RfError};
use crate::script::Script;

use super::backend::{BuildExecutor, ExitCode};

/// Conventional exit code for a run interrupted by Ctrl-C.
pub const INTERRUPTED_EXIT_CODE: ExitCode = 130;

/// Runs the script with an external program reading its build description
/// from stdin, `make -f -` by default.
#[derive(Debug, Clone)]
pub struct MakeExecutor {
    program: String,
    args: Vec<String>,
}

impl Default for MakeExecutor {
    fn default() -> Self {
        Self::from_config(&ExecutorSection::default())
    }
}

impl MakeExecutor {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(cfg: &ExecutorSection) -> Self {
        Self::new(cfg.program.clone(), cfg.args.clone())
    }

    async fn run(&self, script: &Script) -> Result<ExitCode> {
        let text = script.to_string();
        info!(
            program = %self.program,
            args = ?self.args,
            rules = script.rules().len(),
            "handing script to build executor"
        );

        let executor_error = |source| RfError::ExecutorError {
            program: self.program.clone(),
            source,
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(executor_error)?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(text.as_bytes()).await {
                Ok(()) => {}
                // The executor quit without reading everything; its exit
                // status below says why.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    warn!(program = %self.program, "build executor closed stdin early");
                }
                Err(e) => return Err(executor_error(e)),
            }
            // Dropping stdin closes the pipe so the executor sees EOF.
        }

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(executor_error)?;
                let code = exit_code(status);
                info!(
                    program = %self.program,
                    exit_code = code,
                    success = status.success(),
                    "build executor exited"
                );
                Ok(code)
            }

            interrupted = tokio::signal::ctrl_c() => {
                if let Err(e) = interrupted {
                    debug!(error = %e, "ctrl-c listener failed; waiting for executor");
                    let status = child.wait().await.map_err(executor_error)?;
                    return Ok(exit_code(status));
                }
                warn!(program = %self.program, "interrupted; stopping build executor");
                if let Err(e) = child.kill().await {
                    warn!(error = %e, "failed to kill build executor");
                }
                Ok(INTERRUPTED_EXIT_CODE)
            }
        }
    }
}

impl BuildExecutor for MakeExecutor {
    fn execute<'a>(
        &'a mut self,
        script: &'a Script,
    ) -> Pin<Box<dyn Future<Output = Result<ExitCode>> + Send + 'a>> {
        Box::pin(self.run(script))
    }
}

/// Exit code of a finished process; signals map to `128 + signo` on unix.
fn exit_code(status: ExitStatus) -> ExitCode {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
