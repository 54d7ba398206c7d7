//! Configuration loading from disk and logger construction.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{LoggerConfig, OutputConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::logger::{Flags, Logger};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("cannot open log file {}: {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LoggerConfig, ConfigError> {
    let config: LoggerConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

impl LoggerConfig {
    /// The combined header flags.
    pub fn header_flags(&self) -> Result<Flags, ConfigError> {
        Flags::from_names(&self.flags)
            .map_err(|e| ConfigError::Validation(vec![ValidationError::UnknownFlag(e.0)]))
    }

    /// Open the output and build a logger carrying the base annotations.
    pub fn build(&self) -> Result<Logger, ConfigError> {
        let flags = self.header_flags()?;
        let logger = match &self.output {
            OutputConfig::Stdout => Logger::with_flags(io::stdout(), flags),
            OutputConfig::Stderr => Logger::with_flags(io::stderr(), flags),
            OutputConfig::File(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .write(true)
                    .append(self.append)
                    .truncate(!self.append)
                    .open(path)
                    .map_err(|source| ConfigError::Output {
                        path: path.clone(),
                        source,
                    })?;
                Logger::with_flags(file, flags)
            }
        };

        for annotation in &self.annotations {
            logger.set(annotation.key.clone(), annotation.value.clone());
        }
        tracing::debug!(
            flags = flags.bits(),
            annotations = self.annotations.len(),
            "logger built from configuration"
        );
        Ok(logger)
    }
}
