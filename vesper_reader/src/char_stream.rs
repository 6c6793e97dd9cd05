//! Contains the [`CharStream`] cursor that readtable actions consume characters from.

use std::{iter::Peekable, str::CharIndices, sync::Arc};

use vesper_base::source_text::{ByteIndex, LocationInfo, SourceText};

/// Is a peekable cursor over the characters of a [`SourceText`].
///
/// The stream yields one Unicode scalar value per step and tracks the absolute byte offset and
/// the 0-based line/column pair of the next unconsumed character. A line terminator (LF, CR, the
/// CR+LF pair counted once, U+2028, or U+2029) advances `line` and resets `column`; any other
/// character advances `column` by one.
///
/// End of stream is represented by [`None`] from [`CharStream::peek`] and the [`Iterator`]
/// implementation; there is no in-band sentinel character.
#[derive(Debug, Clone)]
pub struct CharStream<'a> {
    source: &'a Arc<SourceText>,
    iterator: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    pending_line_feed: bool,
}

impl<'a> CharStream<'a> {
    /// Creates a new stream positioned at the start of the given source text.
    #[must_use]
    pub fn new(source: &'a Arc<SourceText>) -> Self {
        Self {
            source,
            iterator: source.content().char_indices().peekable(),
            line: 0,
            column: 0,
            pending_line_feed: false,
        }
    }

    /// Gets the source text the stream reads from.
    #[must_use]
    pub fn source(&self) -> &Arc<SourceText> { self.source }

    /// Peeks at the next character without consuming it.
    ///
    /// Returns [`None`] at the end of the stream.
    pub fn peek(&mut self) -> Option<char> { self.iterator.peek().map(|&(_, character)| character) }

    /// Checks whether the stream is exhausted.
    pub fn is_eos(&mut self) -> bool { self.iterator.peek().is_none() }

    /// Gets the absolute byte offset of the next unconsumed character.
    ///
    /// At the end of the stream this is the length of the source text.
    pub fn position(&mut self) -> ByteIndex {
        let length = self.source.content().len();
        self.iterator.peek().map_or(length, |&(index, _)| index)
    }

    /// Gets the line number of the next unconsumed character (starts at 0).
    #[must_use]
    pub fn line(&self) -> usize { self.line }

    /// Gets the column number of the next unconsumed character (starts at 0).
    #[must_use]
    pub fn column(&self) -> usize { self.column }

    /// Captures the [`LocationInfo`] of the next unconsumed character.
    pub fn location_info(&mut self) -> LocationInfo {
        let position = self.position();
        LocationInfo::new(self.source.clone(), position, self.line, self.column)
    }
}

impl std::iter::Iterator for CharStream<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let (_, character) = self.iterator.next()?;

        match character {
            // the line feed of a crlf pair; the carriage return already advanced the line
            '\n' if self.pending_line_feed => self.pending_line_feed = false,
            '\n' | '\u{2028}' | '\u{2029}' => {
                self.line += 1;
                self.column = 0;
            }
            '\r' => {
                self.line += 1;
                self.column = 0;
                self.pending_line_feed = matches!(self.iterator.peek(), Some((_, '\n')));
            }
            _ => self.column += 1,
        }

        Some(character)
    }
}
