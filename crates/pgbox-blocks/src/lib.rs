//! Anchored-region file surgery for pgbox.
//!
//! Generated artifact files (Dockerfile, compose file, conf snippet,
//! init script) carry one machine-owned region between marker lines;
//! this crate parses files into before/inside/after regions, splices
//! fresh generated content into the anchored region only, and writes
//! results atomically. Content outside the markers is user-owned and
//! preserved byte-for-byte across regenerations.

pub mod checksum;
pub mod error;
pub mod io;
pub mod parser;
pub mod writer;

pub use checksum::{SHORT_HASH_LEN, ShortHasher, content_checksum};
pub use error::{Error, Result};
pub use io::{read_text_if_exists, write_atomic};
pub use parser::{Markers, ParsedFile, parse, parse_file};
pub use writer::{merge_into_file, splice, write_lines};
