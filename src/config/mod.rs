//! Logger configuration.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggerConfig (validated)
//!     → LoggerConfig::build() → Logger with base annotations
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so an empty file is a valid config
//! - Annotations are an array of tables to keep their order
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{AnnotationConfig, LoggerConfig, OutputConfig};
pub use validation::ValidationError;
