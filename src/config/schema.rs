//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::meta::Value;

/// Root configuration for a logger.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Header flag names (e.g. `["date", "time", "short_file"]`).
    pub flags: Vec<String>,

    /// Where lines are written.
    pub output: OutputConfig,

    /// Append to an existing output file instead of truncating it.
    pub append: bool,

    /// Base annotations, applied in order.
    pub annotations: Vec<AnnotationConfig>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            flags: vec!["std".to_string()],
            output: OutputConfig::Stdout,
            append: true,
            annotations: Vec::new(),
        }
    }
}

/// Output target.
///
/// In TOML: `output = "stdout"`, `output = "stderr"` or
/// `output = { file = "/var/log/app.log" }`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputConfig {
    #[default]
    Stdout,
    Stderr,
    File(PathBuf),
}

/// A single base annotation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct AnnotationConfig {
    pub key: String,
    pub value: Value,
}
