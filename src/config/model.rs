// src/config/model.rs

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [executor]
/// program = "make"
/// args = ["-f", "-"]
///
/// [discovery]
/// recursive = true
/// check_cycles = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub executor: ExecutorSection,

    #[serde(default)]
    pub discovery: DiscoverySection,
}

/// `[executor]` section: the program that consumes the script on stdin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutorSection {
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments that make `program` read its build description from stdin.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

fn default_program() -> String {
    "make".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-f".to_string(), "-".to_string()]
}

impl Default for ExecutorSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
        }
    }
}

/// `[discovery]` section. Each flag is OR-ed with its command-line switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiscoverySection {
    #[serde(default)]
    pub recursive: bool,

    /// Reject prerequisite cycles before launching the executor.
    #[serde(default)]
    pub check_cycles: bool,
}

/// Validated configuration. Only constructed via `TryFrom<RawConfigFile>`
/// or `Default`.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    pub executor: ExecutorSection,
    pub discovery: DiscoverySection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(executor: ExecutorSection, discovery: DiscoverySection) -> Self {
        Self {
            executor,
            discovery,
        }
    }
}
