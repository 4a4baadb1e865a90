//! Splicing new generated content into parsed files and writing the
//! result back to disk.

use std::path::Path;

use crate::error::Result;
use crate::io::write_atomic;
use crate::parser::{Markers, ParsedFile, parse_file};

/// Recombine a parsed file with fresh anchored content.
///
/// `before` and `after` pass through unchanged. The anchor block is
/// emitted when the file already had one (keeps the region
/// discoverable even if the new content is empty) or when there is new
/// content to place; a file with neither stays clean of markers.
pub fn splice(parsed: &ParsedFile, markers: &Markers, new_lines: &[String]) -> Vec<String> {
    let mut out = parsed.before.clone();
    if parsed.has_anchor || !new_lines.is_empty() {
        out.push(markers.start.clone());
        out.extend(new_lines.iter().cloned());
        out.push(markers.end.clone());
    }
    out.extend(parsed.after.iter().cloned());
    out
}

/// Write lines to a file, joined with newlines and ending in exactly
/// one trailing newline. The write is atomic.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut content = lines.join("\n");
    while content.ends_with('\n') {
        content.pop();
    }
    content.push('\n');
    write_atomic(path, content.as_bytes())
}

/// Merge new anchored content into the file at `path`.
///
/// Parses the existing file (if any), replaces only the anchored
/// region, and writes the result atomically. When the file does not
/// exist and `header` is given, the header lines are synthesized above
/// the anchor.
pub fn merge_into_file(
    path: &Path,
    markers: &Markers,
    header: &[String],
    new_lines: &[String],
) -> Result<()> {
    let mut parsed = parse_file(path, markers)?;
    if parsed.before.is_empty() && parsed.after.is_empty() && !parsed.has_anchor {
        parsed.before = header.to_vec();
    }
    let lines = splice(&parsed, markers, new_lines);
    write_lines(path, &lines)
}
