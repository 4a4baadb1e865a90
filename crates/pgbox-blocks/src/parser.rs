//! Anchored-region parsing for generated files.
//!
//! Generated artifacts carry one machine-owned region delimited by
//! marker lines:
//!
//! ```text
//! # pgbox:begin
//! generated content
//! # pgbox:end
//! ```
//!
//! Everything outside the markers is user-owned and survives
//! regeneration byte-for-byte. The comment leader varies by file type
//! (`#` for Dockerfile/compose/conf, `--` for SQL).

use std::path::Path;

use crate::error::Result;
use crate::io::read_text_if_exists;

/// Marker pair delimiting the machine-owned region of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    /// Full text of the opening marker line.
    pub start: String,
    /// Full text of the closing marker line.
    pub end: String,
}

impl Markers {
    /// Markers using the given line-comment leader.
    pub fn with_leader(leader: &str) -> Self {
        Self {
            start: format!("{} pgbox:begin", leader),
            end: format!("{} pgbox:end", leader),
        }
    }

    /// Markers for `#`-commented files (Dockerfile, YAML, conf).
    pub fn hash() -> Self {
        Self::with_leader("#")
    }

    /// Markers for SQL files.
    pub fn sql() -> Self {
        Self::with_leader("--")
    }
}

/// A file split into the three regions around the anchor.
///
/// If no anchor was found, the whole file is `before` and both other
/// regions are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    /// Lines before the opening marker (or the entire file).
    pub before: Vec<String>,
    /// Lines between the markers; discarded on regeneration.
    pub inside: Vec<String>,
    /// Lines after the closing marker.
    pub after: Vec<String>,
    /// Whether a marker pair was found.
    pub has_anchor: bool,
}

/// Parse content into the three regions around the anchor.
///
/// Marker lines are matched ignoring surrounding whitespace and are
/// not part of any region. An opening marker without a closing one
/// treats the rest of the file as anchored content.
pub fn parse(content: &str, markers: &Markers) -> ParsedFile {
    enum State {
        Before,
        Inside,
        After,
    }

    let mut parsed = ParsedFile::default();
    let mut state = State::Before;

    for line in content.lines() {
        match state {
            State::Before => {
                if line.trim() == markers.start {
                    parsed.has_anchor = true;
                    state = State::Inside;
                } else {
                    parsed.before.push(line.to_string());
                }
            }
            State::Inside => {
                if line.trim() == markers.end {
                    state = State::After;
                } else {
                    parsed.inside.push(line.to_string());
                }
            }
            State::After => parsed.after.push(line.to_string()),
        }
    }

    parsed
}

/// Parse a file on disk.
///
/// A missing file parses as empty with no anchor; any other read
/// failure propagates.
pub fn parse_file(path: &Path, markers: &Markers) -> Result<ParsedFile> {
    match read_text_if_exists(path)? {
        Some(content) => Ok(parse(&content, markers)),
        None => Ok(ParsedFile::default()),
    }
}
