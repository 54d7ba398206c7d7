//! Formatting macros for the `*f` logger methods.
//!
//! Each takes a `Logger`, `&Logger` or `Option<&Logger>` followed by
//! `format!`-style arguments:
//!
//! ```no_run
//! use annotated_log::{printf, Logger};
//!
//! let log = Logger::stdout();
//! log.set("req", 42);
//! printf!(log, "served {} bytes", 512);
//! ```

#[macro_export]
macro_rules! sprintf {
    ($log:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::MaybeLogger as _;
        ($log).sprintf(::std::format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! printf {
    ($log:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::MaybeLogger as _;
        ($log).printf(::std::format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! fatalf {
    ($log:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::MaybeLogger as _;
        ($log).fatalf(::std::format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! panicf {
    ($log:expr, $($arg:tt)+) => {{
        #[allow(unused_imports)]
        use $crate::MaybeLogger as _;
        ($log).panicf(::std::format_args!($($arg)+))
    }};
}
