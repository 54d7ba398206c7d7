//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check annotation keys render cleanly in a `key=value` prefix
//! - Resolve flag names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{LoggerConfig, OutputConfig};
use crate::logger::Flags;

/// A semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("annotation #{index} has an empty key")]
    EmptyKey { index: usize },

    #[error("annotation key {key:?} contains whitespace or '='")]
    InvalidKey { key: String },

    #[error("annotation key {key:?} is defined more than once")]
    DuplicateKey { key: String },

    #[error("unknown flag {0:?}")]
    UnknownFlag(String),

    #[error("output file path is empty")]
    EmptyOutputPath,
}

pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for name in &config.flags {
        if Flags::from_name(name).is_none() {
            errors.push(ValidationError::UnknownFlag(name.clone()));
        }
    }

    if let OutputConfig::File(path) = &config.output {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyOutputPath);
        }
    }

    let mut seen = HashSet::new();
    for (index, annotation) in config.annotations.iter().enumerate() {
        let key = &annotation.key;
        if key.is_empty() {
            errors.push(ValidationError::EmptyKey { index });
        } else if key.contains(|c: char| c.is_whitespace() || c == '=') {
            errors.push(ValidationError::InvalidKey { key: key.clone() });
        } else if !seen.insert(key.as_str()) {
            errors.push(ValidationError::DuplicateKey { key: key.clone() });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
