// src/discover/tree.rs

use std::path::Path;

/// Return true if `path` lies inside the tree rooted at `root`.
///
/// Both paths must be canonical. The comparison is per component, so
/// `/data/run10` is not inside `/data/run1`.
pub fn belongs_to_tree(path: &Path, root: &Path) -> bool {
    path.starts_with(root)
}
