#![allow(dead_code)]

pub use rf_test_utils::builders::TreeBuilder;
pub use rf_test_utils::fake_executor::FakeExecutor;
pub use rf_test_utils::init_tracing;

use rf::discover::DiscoveryOptions;
use rf::fs::RealFileSystem;
use rf::script::Script;
use rf::{PlanOptions, plan};

/// Plan the subtree at `rel` (tree-relative) on the real filesystem.
pub fn plan_tree(tree: &TreeBuilder, rel: &str, recursive: bool) -> Script {
    let options = PlanOptions {
        discovery: DiscoveryOptions { recursive },
        check_cycles: false,
    };
    plan(&RealFileSystem, &tree.path(rel), options).expect("planning tree")
}

/// Nodes that got a rule, in emission order.
pub fn targets(script: &Script) -> Vec<std::path::PathBuf> {
    script.rules().iter().map(|r| r.node().to_path_buf()).collect()
}
