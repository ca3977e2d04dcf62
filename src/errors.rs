// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RfError {
    #[error("Invalid root node {path:?}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    /// A filesystem probe failed for a reason other than the path being absent.
    #[error("Filesystem error at {path:?}: {source}")]
    FsError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A node path contains a character the build executor cannot spell.
    #[error("Path {path:?} contains {ch:?}, which cannot appear in a make rule")]
    UnrepresentablePath { path: PathBuf, ch: char },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Dependency cycle detected involving node {0:?}")]
    DependencyCycle(PathBuf),

    #[error("Build executor '{program}' failed: {source}")]
    ExecutorError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RfError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RfError::FsError {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RfError>;
