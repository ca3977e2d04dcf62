// src/node/classify.rs

//! Readiness predicate for a single node.

use std::path::Path;

use tracing::trace;

use crate::errors::Result;
use crate::fs::FileSystem;

use super::{declaration_dir, driver_path, results_dir};

/// Whether `node` is ready to run.
///
/// True iff `node` is a directory with a `__/` declaration directory, no `_`
/// results entry, and an executable regular file at `__/driver`. The path
/// should already be canonical.
///
/// A path that disappears mid-check just counts as not ready; any other
/// filesystem error is returned.
pub fn is_ready<F: FileSystem + ?Sized>(fs: &F, node: &Path) -> Result<bool> {
    if !fs.probe(node)?.is_some_and(|m| m.is_dir()) {
        trace!(node = %node.display(), "not a directory");
        return Ok(false);
    }

    if !fs.probe(&declaration_dir(node))?.is_some_and(|m| m.is_dir()) {
        trace!(node = %node.display(), "no declaration directory");
        return Ok(false);
    }

    if fs.probe(&results_dir(node))?.is_some() {
        trace!(node = %node.display(), "results directory present");
        return Ok(false);
    }

    let driver = fs.probe(&driver_path(node))?;
    let ready = driver.is_some_and(|m| m.is_file() && m.executable);
    if !ready {
        trace!(node = %node.display(), "no executable driver");
    }
    Ok(ready)
}
