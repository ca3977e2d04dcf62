#![cfg(unix)]

use std::fs;
use std::os::unix::fs::{symlink, PermissionsExt};
use std::path::{Path, PathBuf};

use rf::node::{DECLARATION_DIR, DEPENDENCY_DIR, DRIVER, RESULTS_DIR};
use tempfile::TempDir;

const DEFAULT_DRIVER: &str = "#!/bin/sh\necho done\n";

/// Builds node trees inside a temporary directory.
///
/// Paths are given relative to the tree root; `""` is the root itself.
/// All methods panic on IO failure since they only run in tests.
pub struct TreeBuilder {
    _dir: TempDir,
    root: PathBuf,
}

impl TreeBuilder {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("creating temp dir");
        // The temp location itself may sit behind a symlink (e.g. /tmp on macOS).
        let root = dir.path().canonicalize().expect("canonicalizing temp dir");
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        if rel.is_empty() {
            self.root.clone()
        } else {
            self.root.join(rel)
        }
    }

    /// Plain directory (a pass-through grouping directory unless made a node).
    pub fn dir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.path(rel)).expect("creating dir");
        self
    }

    /// Ready node with a default driver.
    pub fn node(&self, rel: &str) -> &Self {
        self.driver(rel, DEFAULT_DRIVER)
    }

    /// Ready node whose driver runs `body` (a full script, shebang included).
    pub fn driver(&self, rel: &str, body: &str) -> &Self {
        let driver = self.write_driver(rel, body);
        fs::set_permissions(&driver, fs::Permissions::from_mode(0o755)).expect("chmod driver");
        self
    }

    /// Node whose driver exists but is not executable.
    pub fn inert_node(&self, rel: &str) -> &Self {
        let driver = self.write_driver(rel, DEFAULT_DRIVER);
        fs::set_permissions(&driver, fs::Permissions::from_mode(0o644)).expect("chmod driver");
        self
    }

    /// Mark a node as started by creating its results directory.
    pub fn started(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.path(rel).join(RESULTS_DIR)).expect("creating results dir");
        self
    }

    /// Declare that `from` depends on the node at `to` (both tree-relative).
    pub fn link(&self, from: &str, name: &str, to: &str) -> &Self {
        self.link_to(from, name, &self.path(to))
    }

    /// Declare a dependency link from `from` to an arbitrary path.
    pub fn link_to(&self, from: &str, name: &str, target: &Path) -> &Self {
        let dep_dir = self.path(from).join(DECLARATION_DIR).join(DEPENDENCY_DIR);
        fs::create_dir_all(&dep_dir).expect("creating dep dir");
        symlink(target, dep_dir.join(name)).expect("creating dependency link");
        self
    }

    fn write_driver(&self, rel: &str, body: &str) -> PathBuf {
        let decl = self.path(rel).join(DECLARATION_DIR);
        fs::create_dir_all(&decl).expect("creating declaration dir");
        let driver = decl.join(DRIVER);
        fs::write(&driver, body).expect("writing driver");
        driver
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
