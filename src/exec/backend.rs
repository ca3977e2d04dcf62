// src/exec/backend.rs

//! Pluggable executor abstraction.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;
use crate::script::Script;

/// Exit status of the build executor, passed through unchanged.
pub type ExitCode = i32;

/// Trait abstracting who runs a synthesized script.
///
/// Production code uses [`super::MakeExecutor`]; tests can provide an
/// implementation that records the script instead of spawning a process.
pub trait BuildExecutor: Send {
    /// Run `script` to completion and return the executor's exit code.
    ///
    /// A non-zero code is not an error at this level; it is reported to the
    /// caller as-is.
    fn execute<'a>(
        &'a mut self,
        script: &'a Script,
    ) -> Pin<Box<dyn Future<Output = Result<ExitCode>> + Send + 'a>>;
}
