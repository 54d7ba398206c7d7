//! Line logger with ordered key/value annotations.
//!
//! Annotations set on a [`Logger`] are rendered as a bracketed prefix after
//! the timestamp on every line. Child loggers made with [`Logger::with`] copy
//! the annotations, so they can add or override keys without touching the
//! parent.
//!
//! ```text
//! 2009/01/23 01:23:23 [req=42 user=ann] served 512 bytes
//! ```

mod macros;

pub mod config;
pub mod logger;
pub mod meta;

pub use config::{load_config, ConfigError, LoggerConfig};
pub use logger::{Flags, Logger, MaybeLogger};
pub use meta::{Meta, MetaEntry, Value};
