#![allow(clippy::module_inception)]

use std::{fmt::Display, fs, io, path::Path};

use crate::errors::errors::{Status, StatusCode};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A `(line, offset)` position in the source text. Both components are
/// 0-based; `Location::unknown()` is the sentinel used when no position is
/// available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    line: usize,
    offset: usize,
}

impl Location {
    pub const UNREACHABLE: usize = usize::MAX;

    pub fn new(line: usize, offset: usize) -> Self {
        Location { line, offset }
    }

    pub fn unknown() -> Self {
        Location {
            line: Self::UNREACHABLE,
            offset: Self::UNREACHABLE,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_unknown(&self) -> bool {
        self.line == Self::UNREACHABLE || self.offset == Self::UNREACHABLE
    }

    pub fn swap(&mut self, other: &mut Location) {
        std::mem::swap(self, other);
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::unknown()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            write!(f, "?:?")
        } else {
            write!(f, "{}:{}", self.line, self.offset)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Location,
    pub finish: Location,
}

impl Span {
    pub fn new(start: Location, finish: Location) -> Self {
        Span { start, finish }
    }

    /// A span covering a single position.
    pub fn at(location: Location) -> Self {
        Span {
            start: location,
            finish: location,
        }
    }
}

/// Reads a whole source file into memory. The front end never performs I/O
/// itself; drivers call this and hand the text to the parser.
pub fn read_source(path: impl AsRef<Path>) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Formats a diagnostic as `ERROR(<line>:<offset>): <message>`.
pub fn format_status(status: &Status) -> String {
    let label = match status.code() {
        StatusCode::Error => "ERROR",
        StatusCode::Success => "SUCCESS",
        StatusCode::Note => "NOTE",
        StatusCode::Warning => "WARNING",
    };

    let location = status.location();
    if location.is_unknown() {
        format!("{}: {}", label, status.message())
    } else {
        format!(
            "{}({}:{}): {}",
            label,
            location.line(),
            location.offset(),
            status.message()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{format_status, Location};
    use crate::errors::errors::{Status, StatusCode};

    #[test]
    fn test_location_default_is_unknown() {
        let location = Location::default();
        assert!(location.is_unknown());
        assert_eq!(location.line(), Location::UNREACHABLE);
        assert_eq!(location.to_string(), "?:?");
    }

    #[test]
    fn test_location_swap() {
        let mut a = Location::new(1, 2);
        let mut b = Location::new(3, 4);
        a.swap(&mut b);
        assert_eq!(a, Location::new(3, 4));
        assert_eq!(b, Location::new(1, 2));
    }

    #[test]
    fn test_format_status() {
        let status = Status::new(StatusCode::Error, "undefined token", Location::new(2, 7));
        assert_eq!(format_status(&status), "ERROR(2:7): undefined token");

        let status = Status::new(StatusCode::Error, "no position", Location::unknown());
        assert_eq!(format_status(&status), "ERROR: no position");
    }
}
