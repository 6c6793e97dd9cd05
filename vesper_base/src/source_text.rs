//! Contains the code related to the in-memory source text input.

use std::{
    cmp::Ordering,
    fmt::Debug,
    ops::Range,
    path::{Path, PathBuf},
    sync::Arc,
};

use derive_new::new;
use getset::{CopyGetters, Getters};

/// Is an unsigned integer that represents a byte index in the source text.
pub type ByteIndex = usize;

/// Represents a fully materialized source text input for the reader.
///
/// The text is immutable for the lifetime of the value; an optional file name tags the input for
/// location metadata only (no file is ever opened by this crate).
#[derive(Getters)]
pub struct SourceText {
    /// Gets the optional file name tag of the source text.
    #[get = "pub"]
    filename: Option<PathBuf>,

    content: String,
    lines: Vec<Range<usize>>,
}

impl Debug for SourceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceText")
            .field("filename", &self.filename)
            .field("lines", &self.lines)
            .finish()
    }
}

impl SourceText {
    /// Creates a new source text from the given content and optional file name tag.
    #[must_use]
    pub fn new(content: impl Into<String>, filename: Option<PathBuf>) -> Arc<Self> {
        let content = content.into();
        let lines = get_line_byte_positions(&content);

        Arc::new(Self {
            filename,
            content,
            lines,
        })
    }

    /// Creates a new source text with no file name tag.
    #[must_use]
    pub fn anonymous(content: impl Into<String>) -> Arc<Self> { Self::new(content, None) }

    /// Gets the content of the source text.
    #[must_use]
    pub fn content(&self) -> &str { &self.content }

    /// Gets the line of the source text at the given line number.
    ///
    /// The line number starts at 0. The returned slice includes the terminator sequence that ends
    /// the line, if any.
    #[must_use]
    pub fn get_line(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(|range| &self.content[range.clone()])
    }

    /// Gets the number of lines in the source text.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Gets the [`Location`] of the given byte index.
    ///
    /// Returns [`None`] if the byte index doesn't land on a character boundary of the text.
    #[must_use]
    pub fn get_location(&self, byte_index: ByteIndex) -> Option<Location> {
        if !self.content.is_char_boundary(byte_index) {
            return None;
        }

        // gets the line number by binary searching the line ranges
        let line = self
            .lines
            .binary_search_by(|range| {
                if range.contains(&byte_index) {
                    Ordering::Equal
                } else if byte_index < range.start {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()?;

        let line_starting_byte_index = self.lines[line].start;
        let line_str = self.get_line(line)?;

        // gets the column number by counting the characters before the byte index (starts at 0)
        let column = line_str
            .char_indices()
            .take_while(|(i, _)| *i + line_starting_byte_index < byte_index)
            .count();

        Some(Location { line, column })
    }
}

/// Is a struct pointing to a particular line/column pair in a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 0).
    pub line: usize,

    /// The column number of the location (starts at 0, counted in characters).
    pub column: usize,
}

/// Represents the place in a source text where a token or an error begins.
///
/// Carries the full addressing contract of the reader: the source (with its file name tag), the
/// absolute byte offset, and the 0-based line/column pair.
#[derive(Clone, Getters, CopyGetters, new)]
pub struct LocationInfo {
    /// Gets the source text the location points into.
    #[get = "pub"]
    source: Arc<SourceText>,

    /// Gets the absolute byte offset of the location.
    #[get_copy = "pub"]
    position: ByteIndex,

    /// Gets the line number of the location (starts at 0).
    #[get_copy = "pub"]
    line: usize,

    /// Gets the column number of the location (starts at 0).
    #[get_copy = "pub"]
    column: usize,
}

impl LocationInfo {
    /// Gets the file name tag of the source text, if any.
    #[must_use]
    pub fn filename(&self) -> Option<&Path> { self.source.filename().as_deref() }
}

impl Debug for LocationInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocationInfo")
            .field("filename", &self.filename())
            .field("position", &self.position)
            .field("line", &self.line)
            .field("column", &self.column)
            .finish()
    }
}

impl PartialEq for LocationInfo {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source, &other.source)
            && self.position == other.position
            && self.line == other.line
            && self.column == other.column
    }
}

impl Eq for LocationInfo {}

impl std::hash::Hash for LocationInfo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.source).hash(state);
        self.position.hash(state);
        self.line.hash(state);
        self.column.hash(state);
    }
}

fn get_line_byte_positions(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();

    let mut skip = false;

    for (byte, char) in text.char_indices() {
        if skip {
            skip = false;
            continue;
        }

        match char {
            '\n' | '\u{2028}' | '\u{2029}' => {
                let end = byte + char.len_utf8();
                results.push(current_position..end);
                current_position = end;
            }
            '\r' => {
                // crlf counts as a single terminator
                if text.as_bytes().get(byte + 1) == Some(&b'\n') {
                    results.push(current_position..byte + 2);
                    current_position = byte + 2;

                    skip = true;
                } else {
                    #[allow(clippy::range_plus_one)]
                    results.push(current_position..byte + 1);

                    current_position = byte + 1;
                }
            }
            _ => {}
        }
    }

    results.push(current_position..text.len());

    results
}
