//! End-to-end tests of line output through a captured writer.

use std::io;

use annotated_log::{panicf, printf, Flags, Logger, MaybeLogger};
use regex::Regex;

mod common;
use common::{panic_message, Broken, Capture};

fn check_last(out: &Capture, expected: &str) {
    assert_eq!(out.last(), format!("{expected}\n"));
}

#[test]
fn test_log() {
    let out = Capture::new();
    let log = Logger::new(out.clone());

    // Disable timestamps
    log.set_flags(Flags::NONE);

    log.print(&[&"foo"]);
    check_last(&out, "foo");

    log.set("foo", "bar");
    log.set("key", 7);
    log.print(&[&"test"]);
    check_last(&out, "[foo=bar key=7] test");

    // Child with an overridden value
    let log2 = log.with("foo", "baz");
    log2.print(&[&"test"]);
    check_last(&out, "[foo=baz key=7] test");
    // Original is unchanged
    log.print(&[&"test"]);
    check_last(&out, "[foo=bar key=7] test");

    // Errors are quoted
    log.set_error(&io::Error::other("bad"));
    log.print(&[&"test"]);
    check_last(&out, "[foo=bar key=7 error='bad'] test");

    let log2 = log.with_error(&io::Error::other("good"));
    log2.print(&[&"test"]);
    check_last(&out, "[foo=bar key=7 error='good'] test");
    log.print(&[&"test"]);
    check_last(&out, "[foo=bar key=7 error='bad'] test");
}

#[test]
fn test_print_variants() {
    let out = Capture::new();
    let log = Logger::with_flags(out.clone(), Flags::NONE);
    log.set("req", 42);

    log.print(&[&"a", &1, &"b"]);
    check_last(&out, "[req=42] a1b");

    printf!(log, "{}-{}", "x", 9);
    check_last(&out, "[req=42] x-9");

    // Already newline-terminated: no second newline
    log.println(&[&"a", &1, &"b"]);
    check_last(&out, "[req=42] a 1 b");

    log.output("raw line").unwrap();
    check_last(&out, "raw line");
}

#[test]
fn test_panic_carries_plain_message() {
    let out = Capture::new();
    let log = Logger::with_flags(out.clone(), Flags::NONE);
    log.set("foo", "bar");

    assert_eq!(panic_message(|| log.panic(&[&"xxx"])), "xxx");
    check_last(&out, "[foo=bar] xxx");

    assert_eq!(panic_message(|| panicf!(log, "n={}", 3)), "n=3");
    check_last(&out, "[foo=bar] n=3");

    assert_eq!(panic_message(|| log.panicln(&[&"a", &"b"])), "a b\n");
    assert_eq!(out.last(), "[foo=bar] a b\n");
}

#[test]
fn test_timestamp_header() {
    let out = Capture::new();
    let log = Logger::new(out.clone());
    assert_eq!(log.flags(), Flags::STD);

    log.print(&[&"foo"]);
    let re = Regex::new(r"^\d{4}/\d\d/\d\d \d\d:\d\d:\d\d foo\n$").unwrap();
    assert!(re.is_match(&out.last()), "{:?}", out.last());

    // The prefix goes after the timestamp
    log.set("k", "v");
    log.print(&[&"foo"]);
    let re = Regex::new(r"^\d{4}/\d\d/\d\d \d\d:\d\d:\d\d \[k=v\] foo\n$").unwrap();
    assert!(re.is_match(&out.last()), "{:?}", out.last());

    log.set_flags(Flags::TIME | Flags::MICROSECONDS | Flags::UTC);
    log.print(&[&"foo"]);
    let re = Regex::new(r"^\d\d:\d\d:\d\d\.\d{6} \[k=v\] foo\n$").unwrap();
    assert!(re.is_match(&out.last()), "{:?}", out.last());
}

#[test]
fn test_caller_attribution() {
    let out = Capture::new();
    let log = Logger::with_flags(out.clone(), Flags::SHORT_FILE);

    log.print(&[&"direct"]);
    let line = line!() - 1;
    check_last(&out, &format!("logger.rs:{line}: direct"));

    Some(&log).print(&[&"optional"]);
    let line = line!() - 1;
    check_last(&out, &format!("logger.rs:{line}: optional"));

    printf!(log, "{}", "macro");
    let line = line!() - 1;
    check_last(&out, &format!("logger.rs:{line}: macro"));
}

#[test]
fn test_copies_share_the_writer() {
    let out = Capture::new();
    let log = Logger::with_flags(out.clone(), Flags::NONE);
    let child = log.with("child", true);

    log.print(&[&"one"]);
    child.print(&[&"two"]);
    assert_eq!(out.all(), vec!["one\n", "[child=true] two\n"]);
}

#[test]
fn test_writer_failure() {
    let log = Logger::with_flags(Broken, Flags::NONE);

    // Emitters drop the error
    log.print(&[&"lost"]);

    let err = log.output("lost").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn test_concurrent_children() {
    let out = Capture::new();
    let log = Logger::with_flags(out.clone(), Flags::NONE);
    log.set("svc", "api");

    std::thread::scope(|s| {
        for i in 0..4 {
            let log = &log;
            s.spawn(move || {
                let child = log.with("worker", i);
                for _ in 0..25 {
                    child.print(&[&"tick"]);
                }
            });
        }
    });

    let lines = out.all();
    assert_eq!(lines.len(), 100);
    let re = Regex::new(r"^\[svc=api worker=[0-3]\] tick\n$").unwrap();
    assert!(lines.iter().all(|l| re.is_match(l)));
    assert_eq!(log.prefix(), "[svc=api]");
}
