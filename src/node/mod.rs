// src/node/mod.rs

//! On-disk convention for computation nodes.
//!
//! A node `N` is a directory laid out as:
//!
//! ```text
//! N/__/          declaration directory
//! N/__/driver    executable run by the build executor
//! N/__/dep/*     symbolic links to the nodes N depends on
//! N/_/           results directory, created when N starts
//! N/_/nohup.out  completion marker and captured log
//! ```
//!
//! - [`classify`] decides whether a directory is ready to run.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub mod classify;

pub use classify::is_ready;

pub const DECLARATION_DIR: &str = "__";
pub const RESULTS_DIR: &str = "_";
pub const DRIVER: &str = "driver";
pub const DEPENDENCY_DIR: &str = "dep";
pub const MARKER_FILE: &str = "nohup.out";

pub fn declaration_dir(node: &Path) -> PathBuf {
    node.join(DECLARATION_DIR)
}

pub fn results_dir(node: &Path) -> PathBuf {
    node.join(RESULTS_DIR)
}

pub fn driver_path(node: &Path) -> PathBuf {
    declaration_dir(node).join(DRIVER)
}

pub fn dependency_dir(node: &Path) -> PathBuf {
    declaration_dir(node).join(DEPENDENCY_DIR)
}

/// Completion marker of a node; doubles as its build target.
pub fn marker(node: &Path) -> PathBuf {
    results_dir(node).join(MARKER_FILE)
}

/// Names traversal never descends into.
pub fn is_reserved(name: &OsStr) -> bool {
    name == DECLARATION_DIR || name == RESULTS_DIR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_paths() {
        let node = Path::new("/work/align");
        assert_eq!(driver_path(node), PathBuf::from("/work/align/__/driver"));
        assert_eq!(dependency_dir(node), PathBuf::from("/work/align/__/dep"));
        assert_eq!(marker(node), PathBuf::from("/work/align/_/nohup.out"));
    }

    #[test]
    fn reserved_names() {
        assert!(is_reserved(OsStr::new("__")));
        assert!(is_reserved(OsStr::new("_")));
        assert!(!is_reserved(OsStr::new("___")));
        assert!(!is_reserved(OsStr::new("dep")));
    }
}
