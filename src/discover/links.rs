// src/discover/links.rs

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::errors::{Result, RfError};
use crate::fs::{FileSystem, absent_as_none};
use crate::node::dependency_dir;

/// Explicit dependencies declared by `node`, as canonical paths.
///
/// Only entries of `node/__/dep` that are symbolic links resolving to a
/// directory count. Entries are visited in file-name order. Links that cannot
/// be resolved (dangling, looping) are skipped; a permission failure while
/// resolving one is an error.
pub fn dependency_links<F: FileSystem + ?Sized>(fs: &F, node: &Path) -> Result<Vec<PathBuf>> {
    let dep_dir = dependency_dir(node);
    if !fs.probe(&dep_dir)?.is_some_and(|m| m.is_dir()) {
        return Ok(Vec::new());
    }

    let Some(mut entries) = absent_as_none(&dep_dir, fs.read_dir(&dep_dir))? else {
        return Ok(Vec::new());
    };
    entries.sort();

    let mut links = Vec::new();
    for entry in entries {
        if !fs.probe_link(&entry)?.is_some_and(|m| m.is_symlink()) {
            trace!(entry = %entry.display(), "ignoring non-link dependency entry");
            continue;
        }
        let resolved = match fs.metadata(&entry) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
                return Err(RfError::fs(&entry, e));
            }
            Err(e) => {
                debug!(
                    entry = %entry.display(),
                    error = %e,
                    "skipping unresolvable dependency link"
                );
                continue;
            }
        };
        if !resolved.is_dir() {
            trace!(entry = %entry.display(), "ignoring link that does not resolve to a directory");
            continue;
        }
        if let Some(target) = absent_as_none(&entry, fs.canonicalize(&entry))? {
            links.push(target);
        }
    }

    Ok(links)
}
