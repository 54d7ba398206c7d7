//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

/// A writer that keeps every write as a separate string.
#[derive(Clone, Default)]
pub struct Capture {
    writes: Arc<Mutex<Vec<String>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent write, or `""` if nothing was written.
    pub fn last(&self) -> String {
        self.writes.lock().unwrap().last().cloned().unwrap_or_default()
    }

    #[allow(dead_code)]
    pub fn all(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(buf).into_owned());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A writer that always fails.
#[allow(dead_code)]
pub struct Broken;

impl Write for Broken {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f`, which must panic, and return the panic message.
#[allow(dead_code)]
pub fn panic_message<F: FnOnce()>(f: F) -> String {
    let payload = panic::catch_unwind(AssertUnwindSafe(f)).expect_err("expected a panic");
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        panic!("panic payload is not a string")
    }
}
