//! Logging through an optional logger.
//!
//! Code that holds an `Option<&Logger>` can call the full logger API on it
//! without checking for `None` first. A missing logger behaves like one with
//! no annotations: mutators return `None`, string builders format plainly,
//! and emitters write to a process-wide stdout logger.

use std::fmt::{self, Display};
use std::sync::LazyLock;

use crate::logger::{concat, spaced, Flags, Logger};
use crate::meta::Value;

/// Used when the logger is `None`. Nothing ever annotates it.
static FALLBACK: LazyLock<Logger> =
    LazyLock::new(|| Logger::with_flags(std::io::stdout(), Flags::STD));

/// The [`Logger`] API for a logger that may be absent.
pub trait MaybeLogger<'a>: Copy {
    fn copy(self) -> Option<Logger>;
    fn set(self, key: impl Into<String>, value: impl Into<Value>) -> Option<&'a Logger>;
    fn set_error<E: Display + ?Sized>(self, err: &E) -> Option<&'a Logger>;
    fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Option<Logger>;
    fn with_error<E: Display + ?Sized>(self, err: &E) -> Option<Logger>;

    fn sprint(self, args: &[&dyn Display]) -> String;
    fn sprintf(self, args: fmt::Arguments<'_>) -> String;
    fn sprintln(self, args: &[&dyn Display]) -> String;

    fn print(self, args: &[&dyn Display]);
    fn printf(self, args: fmt::Arguments<'_>);
    fn println(self, args: &[&dyn Display]);

    fn fatal(self, args: &[&dyn Display]) -> !;
    fn fatalf(self, args: fmt::Arguments<'_>) -> !;
    fn fatalln(self, args: &[&dyn Display]) -> !;

    fn panic(self, args: &[&dyn Display]) -> !;
    fn panicf(self, args: fmt::Arguments<'_>) -> !;
    fn panicln(self, args: &[&dyn Display]) -> !;
}

impl<'a> MaybeLogger<'a> for Option<&'a Logger> {
    fn copy(self) -> Option<Logger> {
        self.map(Logger::copy)
    }

    fn set(self, key: impl Into<String>, value: impl Into<Value>) -> Option<&'a Logger> {
        self.map(|log| log.set(key, value))
    }

    fn set_error<E: Display + ?Sized>(self, err: &E) -> Option<&'a Logger> {
        self.map(|log| log.set_error(err))
    }

    fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Option<Logger> {
        self.map(|log| log.with(key, value))
    }

    fn with_error<E: Display + ?Sized>(self, err: &E) -> Option<Logger> {
        self.map(|log| log.with_error(err))
    }

    fn sprint(self, args: &[&dyn Display]) -> String {
        match self {
            Some(log) => log.sprint(args),
            None => concat(args),
        }
    }

    fn sprintf(self, args: fmt::Arguments<'_>) -> String {
        match self {
            Some(log) => log.sprintf(args),
            None => fmt::format(args),
        }
    }

    fn sprintln(self, args: &[&dyn Display]) -> String {
        match self {
            Some(log) => log.sprintln(args),
            None => spaced(args),
        }
    }

    #[track_caller]
    fn print(self, args: &[&dyn Display]) {
        or_fallback(self).print(args)
    }

    #[track_caller]
    fn printf(self, args: fmt::Arguments<'_>) {
        or_fallback(self).printf(args)
    }

    #[track_caller]
    fn println(self, args: &[&dyn Display]) {
        or_fallback(self).println(args)
    }

    #[track_caller]
    fn fatal(self, args: &[&dyn Display]) -> ! {
        or_fallback(self).fatal(args)
    }

    #[track_caller]
    fn fatalf(self, args: fmt::Arguments<'_>) -> ! {
        or_fallback(self).fatalf(args)
    }

    #[track_caller]
    fn fatalln(self, args: &[&dyn Display]) -> ! {
        or_fallback(self).fatalln(args)
    }

    #[track_caller]
    fn panic(self, args: &[&dyn Display]) -> ! {
        or_fallback(self).panic(args)
    }

    #[track_caller]
    fn panicf(self, args: fmt::Arguments<'_>) -> ! {
        or_fallback(self).panicf(args)
    }

    #[track_caller]
    fn panicln(self, args: &[&dyn Display]) -> ! {
        or_fallback(self).panicln(args)
    }
}

fn or_fallback(log: Option<&Logger>) -> &Logger {
    match log {
        Some(log) => log,
        None => &FALLBACK,
    }
}
