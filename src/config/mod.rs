//! Configuration management for ContextForge
//!
//! Settings are layered with figment: embedded defaults, then a TOML file, then
//! `CONTEXTFORGE_` environment variables. Command-line flags are applied on top
//! by the CLI.

pub mod core;

use crate::reports::Format;
use serde::{Deserialize, Serialize};

pub use self::core::{ENV_PREFIX, REPO_CONFIG_FILE};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// File selection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extensions to include, without the leading dot
    pub extensions: Vec<String>,
    /// Glob patterns matched against entry names
    pub ignore: Vec<String>,
    pub include_hidden: bool,
    pub ignore_gitignore: bool,
    pub ignore_files_only: bool,
    pub regex: Option<String>,
    pub min_size: Option<u64>,
    pub max_size: Option<u64>,
}

/// Rendering settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: Format,
    pub line_numbers: bool,
    pub dataset_mode: bool,
}
