//! Annotated logger.
//!
//! # Data Flow
//! ```text
//! caller: set / with / with_error
//!     → Meta (owned, deep-copied per child)
//!
//! caller: print("msg")
//!     → Meta::format(" ", "[%s]")         e.g. "[req=42 user=ann]"
//!     → prefix + " " + message
//!     → Sink: header (timestamp, caller) + line + "\n"
//! ```
//!
//! # Design Decisions
//! - Children share the parent's sink but never its metadata
//! - The prefix goes after the timestamp header, not before it
//! - `panic*` carry the undecorated message; only the emitted line has the prefix
//! - An absent logger (`Option<&Logger>::None`) is usable through [`MaybeLogger`]

pub mod header;
pub mod maybe;
mod sink;

pub use header::{Flags, UnknownFlag};
pub use maybe::MaybeLogger;

use std::fmt::{self, Display};
use std::io::{self, Write};
use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::meta::{Meta, Value};
use sink::Sink;

/// A line logger that prefixes every line with its annotations.
#[derive(Debug)]
pub struct Logger {
    sink: Arc<Sink>,
    meta: Meta,
    flags: AtomicU8,
}

impl Logger {
    /// Logger with the standard date and time header.
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self::with_flags(out, Flags::STD)
    }

    pub fn with_flags<W: Write + Send + 'static>(out: W, flags: Flags) -> Self {
        Self {
            sink: Arc::new(Sink::new(Box::new(out))),
            meta: Meta::new(),
            flags: AtomicU8::new(flags.bits()),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }

    pub fn flags(&self) -> Flags {
        Flags::from_bits_truncate(self.flags.load(Ordering::Relaxed))
    }

    pub fn set_flags(&self, flags: Flags) {
        self.flags.store(flags.bits(), Ordering::Relaxed);
    }

    /// New logger on the same sink with a deep copy of the annotations.
    pub fn copy(&self) -> Logger {
        Logger {
            sink: Arc::clone(&self.sink),
            meta: self.meta.copy(),
            flags: AtomicU8::new(self.flags.load(Ordering::Relaxed)),
        }
    }

    /// Sets a key-value for inclusion in the line prefix.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.meta.set(key, value);
        self
    }

    /// Drops a key from the line prefix.
    pub fn unset(&self, key: &str) -> &Self {
        self.meta.delete(key);
        self
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.meta.get(key)
    }

    /// Sets `error` to the error's message in single quotes.
    pub fn set_error<E: Display + ?Sized>(&self, err: &E) -> &Self {
        self.set("error", format!("'{err}'"))
    }

    /// Shorthand for `.copy().set(k, v)`. Use for temporary values.
    pub fn with(&self, key: impl Into<String>, value: impl Into<Value>) -> Logger {
        let child = self.copy();
        child.set(key, value);
        child
    }

    /// Shorthand for `.copy().set_error(err)`.
    pub fn with_error<E: Display + ?Sized>(&self, err: &E) -> Logger {
        let child = self.copy();
        child.set_error(err);
        child
    }

    /// The rendered prefix, e.g. `[foo=bar key=7]`, or `""` with no annotations.
    pub fn prefix(&self) -> String {
        self.meta.format(" ", "[%s]")
    }

    /// Prefix followed by the arguments concatenated without separators.
    pub fn sprint(&self, args: &[&dyn Display]) -> String {
        self.decorate(&concat(args))
    }

    /// Prefix followed by the formatted message.
    pub fn sprintf(&self, args: fmt::Arguments<'_>) -> String {
        self.decorate(&fmt::format(args))
    }

    /// Prefix followed by the arguments separated by spaces, plus a newline.
    pub fn sprintln(&self, args: &[&dyn Display]) -> String {
        self.decorate(&spaced(args))
    }

    #[track_caller]
    pub fn print(&self, args: &[&dyn Display]) {
        self.emit(&self.sprint(args));
    }

    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.emit(&self.sprintf(args));
    }

    #[track_caller]
    pub fn println(&self, args: &[&dyn Display]) {
        self.emit(&self.sprintln(args));
    }

    /// `print` followed by `process::exit(1)`.
    #[track_caller]
    pub fn fatal(&self, args: &[&dyn Display]) -> ! {
        self.print(args);
        std::process::exit(1)
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.printf(args);
        std::process::exit(1)
    }

    #[track_caller]
    pub fn fatalln(&self, args: &[&dyn Display]) -> ! {
        self.println(args);
        std::process::exit(1)
    }

    /// Emits the prefixed line, then panics with the plain message.
    #[track_caller]
    pub fn panic(&self, args: &[&dyn Display]) -> ! {
        let msg = concat(args);
        self.emit(&self.decorate(&msg));
        panic!("{msg}")
    }

    #[track_caller]
    pub fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        let msg = fmt::format(args);
        self.emit(&self.decorate(&msg));
        panic!("{msg}")
    }

    #[track_caller]
    pub fn panicln(&self, args: &[&dyn Display]) -> ! {
        let msg = spaced(args);
        self.emit(&self.decorate(&msg));
        panic!("{msg}")
    }

    /// Write one line through the sink and report any writer error.
    ///
    /// `msg` is written as given, after the header; no prefix is added.
    #[track_caller]
    pub fn output(&self, msg: &str) -> io::Result<()> {
        self.sink.write_line(self.flags(), Location::caller(), msg)
    }

    #[track_caller]
    fn emit(&self, line: &str) {
        if let Err(e) = self.output(line) {
            tracing::debug!(error = %e, "log line dropped, sink write failed");
        }
    }

    fn decorate(&self, msg: &str) -> String {
        let prefix = self.prefix();
        if prefix.is_empty() {
            msg.to_string()
        } else {
            format!("{prefix} {msg}")
        }
    }
}

impl Clone for Logger {
    fn clone(&self) -> Self {
        self.copy()
    }
}

pub(crate) fn concat(args: &[&dyn Display]) -> String {
    args.iter().map(|a| a.to_string()).collect()
}

pub(crate) fn spaced(args: &[&dyn Display]) -> String {
    let mut s = args
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    s.push('\n');
    s
}
