// src/exec/mod.rs

//! Hand-off of a synthesized script to the external build executor.
//!
//! - [`backend`] provides the `BuildExecutor` trait the pipeline talks to,
//!   so tests can substitute a fake.
//! - [`make`] is the production implementation: it pipes the script into
//!   `make -f -` (or a configured replacement) and reports its exit code.

pub mod backend;
pub mod make;

pub use backend::{BuildExecutor, ExitCode};
pub use make::MakeExecutor;
