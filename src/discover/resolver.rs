// src/discover/resolver.rs

//! Breadth-first discovery of ready nodes and their dependencies.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::errors::{Result, RfError};
use crate::fs::{FileSystem, absent_as_none};
use crate::node::{is_ready, is_reserved};

use super::links::dependency_links;
use super::tree::belongs_to_tree;

/// Options controlling a discovery pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Walk the whole subtree instead of only the root node.
    pub recursive: bool,
}

/// A ready node together with the ready, in-tree nodes it depends on.
///
/// All paths are canonical. `deps` holds the traversal parent first (if it
/// qualifies), then explicit links in file-name order, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDeps {
    pub node: PathBuf,
    pub deps: Vec<PathBuf>,
}

/// Start discovery at `root`.
///
/// The root must exist and be a directory; anything else is reported here,
/// before traversal begins. The returned iterator reads the filesystem as it
/// goes, so nothing is materialized up front.
pub fn discover<'a, F: FileSystem + ?Sized>(
    fs: &'a F,
    root: &Path,
    options: DiscoveryOptions,
) -> Result<Discovery<'a, F>> {
    let invalid = |reason: &str| RfError::InvalidRoot {
        path: root.to_path_buf(),
        reason: reason.to_string(),
    };

    match fs.probe(root)? {
        Some(meta) if meta.is_dir() => {}
        Some(_) => return Err(invalid("not a directory")),
        None => return Err(invalid("does not exist")),
    }

    let canonical = absent_as_none(root, fs.canonicalize(root))?
        .ok_or_else(|| invalid("does not exist"))?;

    debug!(root = %canonical.display(), recursive = options.recursive, "starting discovery");
    Ok(Discovery::new(fs, canonical, options))
}

/// Lazy, single-use sequence of [`NodeDeps`] in breadth-first order.
///
/// After the first error the sequence ends.
pub struct Discovery<'a, F: FileSystem + ?Sized> {
    fs: &'a F,
    root: PathBuf,
    recursive: bool,
    /// Pending `(traversal parent, directory)` visits.
    queue: VecDeque<(Option<PathBuf>, PathBuf)>,
    /// Readiness of canonical paths already examined during this pass.
    ready: HashMap<PathBuf, bool>,
    finished: bool,
}

impl<F: FileSystem + ?Sized> fmt::Debug for Discovery<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Discovery")
            .field("root", &self.root)
            .field("recursive", &self.recursive)
            .field("queued", &self.queue.len())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<'a, F: FileSystem + ?Sized> Discovery<'a, F> {
    fn new(fs: &'a F, root: PathBuf, options: DiscoveryOptions) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((None, root.clone()));

        Self {
            fs,
            root,
            recursive: options.recursive,
            queue,
            ready: HashMap::new(),
            finished: false,
        }
    }

    /// Canonical root of this pass.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn visit(&mut self, parent: Option<PathBuf>, dir: PathBuf) -> Result<Option<NodeDeps>> {
        let Some(node) = absent_as_none(&dir, self.fs.canonicalize(&dir))? else {
            debug!(dir = %dir.display(), "directory vanished before visit; skipping");
            return Ok(None);
        };
        trace!(node = %node.display(), "visiting");

        let mut candidates: Vec<PathBuf> = parent.into_iter().collect();
        candidates.extend(dependency_links(self.fs, &node)?);

        let mut deps: Vec<PathBuf> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if deps.contains(&candidate) {
                continue;
            }
            if self.qualifies(&candidate)? {
                deps.push(candidate);
            }
        }

        let emitted = if self.qualifies(&node)? {
            debug!(node = %node.display(), ?deps, "ready node");
            Some(NodeDeps {
                node: node.clone(),
                deps,
            })
        } else {
            None
        };

        if self.recursive {
            self.enqueue_children(&node)?;
        }

        Ok(emitted)
    }

    /// In the scanned tree and ready to run.
    fn qualifies(&mut self, path: &Path) -> Result<bool> {
        if !belongs_to_tree(path, &self.root) {
            debug!(path = %path.display(), "dropping dependency outside the scanned tree");
            return Ok(false);
        }

        if let Some(&ready) = self.ready.get(path) {
            return Ok(ready);
        }
        let ready = is_ready(self.fs, path)?;
        if !ready {
            trace!(path = %path.display(), "not ready");
        }
        self.ready.insert(path.to_path_buf(), ready);
        Ok(ready)
    }

    /// Queue the real subdirectories of `node`, skipping `__` and `_`.
    fn enqueue_children(&mut self, node: &Path) -> Result<()> {
        let Some(mut entries) = absent_as_none(node, self.fs.read_dir(node))? else {
            return Ok(());
        };
        entries.sort();

        for entry in entries {
            if entry.file_name().is_some_and(is_reserved) {
                continue;
            }
            if self.fs.probe_link(&entry)?.is_some_and(|m| m.is_dir()) {
                self.queue.push_back((Some(node.to_path_buf()), entry));
            }
        }
        Ok(())
    }
}

impl<F: FileSystem + ?Sized> Iterator for Discovery<'_, F> {
    type Item = Result<NodeDeps>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while let Some((parent, dir)) = self.queue.pop_front() {
            match self.visit(parent, dir) {
                Ok(Some(pair)) => return Some(Ok(pair)),
                Ok(None) => continue,
                Err(err) => {
                    self.finished = true;
                    self.queue.clear();
                    return Some(Err(err));
                }
            }
        }

        self.finished = true;
        None
    }
}

impl<F: FileSystem + ?Sized> std::iter::FusedIterator for Discovery<'_, F> {}
