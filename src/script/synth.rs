// src/script/synth.rs

use std::collections::HashSet;
use std::path::PathBuf;

use tracing::debug;

use crate::discover::NodeDeps;
use crate::errors::Result;

use super::escape::check_representable;
use super::{Rule, Script};

/// Single-pass accumulator turning discovered pairs into a [`Script`].
///
/// Besides the rules themselves it only tracks which paths were seen as
/// targets and which as dependencies, so every dependency that was never a
/// target still gets a (prerequisite-free) rule in [`ScriptBuilder::finish`].
#[derive(Debug, Default)]
pub struct ScriptBuilder {
    rules: Vec<Rule>,
    targets: HashSet<PathBuf>,
    dependencies: Vec<PathBuf>,
    seen_dependencies: HashSet<PathBuf>,
    goal: Vec<PathBuf>,
    in_goal: HashSet<PathBuf>,
}

impl ScriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: NodeDeps) {
        let NodeDeps { node, deps } = pair;

        self.add_to_goal(&node);
        self.targets.insert(node.clone());

        for dep in &deps {
            self.add_to_goal(dep);
            if self.seen_dependencies.insert(dep.clone()) {
                self.dependencies.push(dep.clone());
            }
        }

        self.rules.push(Rule::new(node, deps));
    }

    pub fn finish(self) -> Script {
        let Self {
            mut rules,
            targets,
            dependencies,
            goal,
            ..
        } = self;

        let discovered = rules.len();
        for dep in dependencies {
            if !targets.contains(&dep) {
                rules.push(Rule::new(dep, Vec::new()));
            }
        }

        debug!(
            discovered,
            dependency_only = rules.len() - discovered,
            "script synthesized"
        );
        Script::new(goal, rules)
    }

    fn add_to_goal(&mut self, node: &PathBuf) {
        if self.in_goal.insert(node.clone()) {
            self.goal.push(node.clone());
        }
    }
}

/// Consume a discovery stream and build the script.
///
/// Stops at the first error in the stream, or at the first path that cannot
/// be written into a make rule.
pub fn synthesize<I>(pairs: I) -> Result<Script>
where
    I: IntoIterator<Item = Result<NodeDeps>>,
{
    let mut builder = ScriptBuilder::new();
    for pair in pairs {
        let pair = pair?;
        check_representable(&pair.node)?;
        for dep in &pair.deps {
            check_representable(dep)?;
        }
        builder.push(pair);
    }
    Ok(builder.finish())
}
