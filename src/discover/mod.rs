// src/discover/mod.rs

//! Discovery of the dependency graph encoded in a node tree.
//!
//! - [`resolver`] walks a root node breadth-first and lazily yields each
//!   ready node together with its ready, in-tree dependencies.
//! - [`links`] reads the explicit `__/dep/*` links of a node.
//! - [`tree`] holds the subtree containment test.

pub mod links;
pub mod resolver;
pub mod tree;

pub use links::dependency_links;
pub use resolver::{Discovery, DiscoveryOptions, NodeDeps, discover};
pub use tree::belongs_to_tree;
