// src/script/mod.rs

//! Build script synthesis.
//!
//! - [`rule`] defines one make rule per node and renders it.
//! - [`synth`] folds the discovery stream into a [`Script`].
//! - [`escape`] quotes paths for make and for the recipe shell.
//! - [`cycles`] optionally rejects cyclic scripts before they reach the executor.

use std::fmt;
use std::path::PathBuf;

pub mod cycles;
pub mod escape;
pub mod rule;
pub mod synth;

pub use cycles::check_acyclic;
pub use rule::Rule;
pub use synth::{ScriptBuilder, synthesize};

use crate::node::marker;

use self::escape::{EQUALS_VAR, Position, needs_equals_var};

/// Name of the umbrella target that depends on every marker.
pub const GOAL: &str = "all";

/// A complete build description: an umbrella goal plus one rule per node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    goal: Vec<PathBuf>,
    rules: Vec<Rule>,
}

impl Script {
    pub(crate) fn new(goal: Vec<PathBuf>, rules: Vec<Rule>) -> Self {
        Self { goal, rules }
    }

    /// Rules in emission order: discovered nodes first, then dependency-only nodes.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Nodes whose markers the umbrella goal depends on, in first-seen order.
    pub fn goal_nodes(&self) -> &[PathBuf] {
        &self.goal
    }

    /// Markers the umbrella goal depends on, in first-seen order.
    pub fn goal_markers(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.goal.iter().map(|node| marker(node))
    }

    /// Marker of every rule, in emission order.
    pub fn targets(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.rules.iter().map(Rule::target)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Every rule's node is also in the goal, and rule lines expand
        // variables as they are read.
        if self.goal.iter().any(|node| needs_equals_var(node)) {
            writeln!(f, "{EQUALS_VAR} := =")?;
        }

        let markers: Vec<String> = self
            .goal_markers()
            .map(|m| escape::make_word(&m, Position::Prerequisite))
            .collect();
        writeln!(f, "{GOAL}: {}", markers.join(" "))?;

        if self.rules.is_empty() {
            return Ok(());
        }

        // Recipe lines `cd` and then launch the driver, so they need one shell.
        write!(f, "\n.ONESHELL:\n")?;
        for rule in &self.rules {
            write!(f, "\n{rule}")?;
        }
        Ok(())
    }
}
