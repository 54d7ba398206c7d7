//! The shared line writer behind a logger and its copies.

use std::fmt;
use std::io::{self, Write};
use std::panic::Location;

use chrono::Local;
use parking_lot::Mutex;

use crate::logger::header::{write_header, Flags};

/// Serializes whole lines onto a single writer.
pub(crate) struct Sink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Sink {
    pub(crate) fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Write `header + msg`, adding a newline if `msg` lacks one.
    ///
    /// The line goes out in a single `write_all` while the lock is held.
    pub(crate) fn write_line(
        &self,
        flags: Flags,
        caller: &Location<'_>,
        msg: &str,
    ) -> io::Result<()> {
        let now = Local::now();
        let mut line = String::with_capacity(msg.len() + 32);
        write_header(&mut line, flags, now, caller);
        line.push_str(msg);
        if !msg.ends_with('\n') {
            line.push('\n');
        }

        let mut out = self.out.lock();
        out.write_all(line.as_bytes())?;
        out.flush()
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sink").finish_non_exhaustive()
    }
}
