// src/config/mod.rs

//! Configuration loading and validation for rf.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to defaults (`loader.rs`).
//! - Validate basic invariants (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{DEFAULT_CONFIG_FILE, load_and_validate, load_from_path, resolve_config};
pub use model::{ConfigFile, DiscoverySection, ExecutorSection, RawConfigFile};
