// src/script/cycles.rs

use std::path::Path;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::errors::{Result, RfError};

use super::Script;

/// Reject a script whose rules form a prerequisite cycle.
///
/// The build executor would refuse such a script anyway; checking here
/// reports the offending node before anything is launched.
pub fn check_acyclic(script: &Script) -> Result<()> {
    // Edge direction: dependency -> dependent.
    let mut graph: DiGraphMap<&Path, ()> = DiGraphMap::new();

    for rule in script.rules() {
        graph.add_node(rule.node());
        for dep in rule.dependencies() {
            graph.add_edge(dep.as_path(), rule.node(), ());
        }
    }

    match toposort(&graph, None) {
        Ok(order) => {
            debug!(nodes = order.len(), "dependency graph is acyclic");
            Ok(())
        }
        Err(cycle) => Err(RfError::DependencyCycle(cycle.node_id().to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::NodeDeps;
    use crate::script::synthesize;
    use std::path::PathBuf;

    fn script(pairs: Vec<(&str, Vec<&str>)>) -> Script {
        synthesize(pairs.into_iter().map(|(node, deps)| {
            Ok(NodeDeps {
                node: PathBuf::from(node),
                deps: deps.iter().map(PathBuf::from).collect(),
            })
        }))
        .unwrap()
    }

    #[test]
    fn chain_is_acyclic() {
        let s = script(vec![
            ("/t/a", vec![]),
            ("/t/b", vec!["/t/a"]),
            ("/t/c", vec!["/t/b", "/t/a"]),
        ]);
        assert!(check_acyclic(&s).is_ok());
    }

    #[test]
    fn mutual_links_are_a_cycle() {
        let s = script(vec![("/t/a", vec!["/t/b"]), ("/t/b", vec!["/t/a"])]);
        match check_acyclic(&s) {
            Err(RfError::DependencyCycle(node)) => {
                assert!(node == Path::new("/t/a") || node == Path::new("/t/b"));
            }
            other => panic!("expected DependencyCycle, got {other:?}"),
        }
    }

    #[test]
    fn self_link_is_a_cycle() {
        let s = script(vec![("/t/a", vec!["/t/a"])]);
        assert!(matches!(check_acyclic(&s), Err(RfError::DependencyCycle(_))));
    }
}
