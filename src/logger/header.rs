//! Line header flags and rendering.
//!
//! The header is everything written before the annotation prefix: the
//! timestamp and, optionally, the caller's file and line.

use std::ops::{BitOr, BitOrAssign};
use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Local};
use thiserror::Error;

/// Header flags. Combine with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Flags(u8);

impl Flags {
    /// No header at all.
    pub const NONE: Flags = Flags(0);
    /// Date in the local time zone: `2009/01/23`.
    pub const DATE: Flags = Flags(1);
    /// Time in the local time zone: `01:23:23`.
    pub const TIME: Flags = Flags(1 << 1);
    /// Microsecond resolution: `01:23:23.123123`. Implies `TIME`.
    pub const MICROSECONDS: Flags = Flags(1 << 2);
    /// Full file path and line number of the caller.
    pub const LONG_FILE: Flags = Flags(1 << 3);
    /// Final file name element and line number. Overrides `LONG_FILE`.
    pub const SHORT_FILE: Flags = Flags(1 << 4);
    /// Use UTC rather than the local time zone.
    pub const UTC: Flags = Flags(1 << 5);
    /// Initial values for the standard logger.
    pub const STD: Flags = Flags(Self::DATE.0 | Self::TIME.0);

    const ALL: u8 = 0b11_1111;

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, dropping any that are not defined.
    pub const fn from_bits_truncate(bits: u8) -> Flags {
        Flags(bits & Self::ALL)
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Flags) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Look up a single flag by its configuration name.
    pub fn from_name(name: &str) -> Option<Flags> {
        let flag = match name.trim().to_ascii_lowercase().as_str() {
            "none" => Flags::NONE,
            "date" => Flags::DATE,
            "time" => Flags::TIME,
            "microseconds" | "micros" => Flags::MICROSECONDS,
            "long_file" | "longfile" => Flags::LONG_FILE,
            "short_file" | "shortfile" => Flags::SHORT_FILE,
            "utc" => Flags::UTC,
            "std" | "standard" => Flags::STD,
            _ => return None,
        };
        Some(flag)
    }

    /// Combine a list of flag names.
    pub fn from_names<I, S>(names: I) -> Result<Flags, UnknownFlag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names.into_iter().try_fold(Flags::NONE, |acc, name| {
            let name = name.as_ref();
            Flags::from_name(name)
                .map(|f| acc | f)
                .ok_or_else(|| UnknownFlag(name.to_string()))
        })
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

/// A flag name that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown flag {0:?}")]
pub struct UnknownFlag(pub String);

/// Parses `date,time`, `date|time` or `std`. An empty string means no header.
impl FromStr for Flags {
    type Err = UnknownFlag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flags::from_names(
            s.split([',', '|'])
                .map(str::trim)
                .filter(|part| !part.is_empty()),
        )
    }
}

/// Append the header for `flags` to `buf`.
pub(crate) fn write_header(
    buf: &mut String,
    flags: Flags,
    now: DateTime<Local>,
    caller: &Location<'_>,
) {
    if flags.intersects(Flags::DATE | Flags::TIME | Flags::MICROSECONDS) {
        let t = if flags.contains(Flags::UTC) {
            now.naive_utc()
        } else {
            now.naive_local()
        };
        if flags.contains(Flags::DATE) {
            buf.push_str(&t.format("%Y/%m/%d ").to_string());
        }
        if flags.intersects(Flags::TIME | Flags::MICROSECONDS) {
            buf.push_str(&t.format("%H:%M:%S").to_string());
            if flags.contains(Flags::MICROSECONDS) {
                buf.push_str(&t.format("%.6f").to_string());
            }
            buf.push(' ');
        }
    }

    if flags.intersects(Flags::SHORT_FILE | Flags::LONG_FILE) {
        let mut file = caller.file();
        if flags.contains(Flags::SHORT_FILE) {
            file = file.rsplit(['/', '\\']).next().unwrap_or(file);
        }
        buf.push_str(&format!("{}:{}: ", file, caller.line()));
    }
}
