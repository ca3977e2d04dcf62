// src/script/rule.rs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::node::{DECLARATION_DIR, DRIVER, marker, results_dir};

use super::escape::{Position, make_word, shell_word};

/// Build rule for one node: its marker depends on the markers of `deps`.
///
/// The recipe is the same for every node: stamp the time, create the
/// results directory, enter it and start the driver under `nohup`, whose
/// output file is the marker itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    node: PathBuf,
    deps: Vec<PathBuf>,
}

impl Rule {
    pub fn new(node: PathBuf, deps: Vec<PathBuf>) -> Self {
        Self { node, deps }
    }

    pub fn node(&self) -> &Path {
        &self.node
    }

    pub fn dependencies(&self) -> &[PathBuf] {
        &self.deps
    }

    pub fn target(&self) -> PathBuf {
        marker(&self.node)
    }

    pub fn prerequisites(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.deps.iter().map(|dep| marker(dep))
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prereqs: Vec<String> = self
            .prerequisites()
            .map(|p| make_word(&p, Position::Prerequisite))
            .collect();
        let results = shell_word(&results_dir(&self.node));

        writeln!(
            f,
            "{}: {}",
            make_word(&self.target(), Position::Target),
            prereqs.join(" ")
        )?;
        writeln!(f, "\tdate")?;
        writeln!(f, "\tmkdir {results}")?;
        writeln!(f, "\tcd {results}")?;
        writeln!(f, "\tnohup ../{DECLARATION_DIR}/{DRIVER}")
    }
}
