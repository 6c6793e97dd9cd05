//! Contains all kinds of errors that can occur while reading source text.
//!
//! Every error aborts the current read; the reader never returns a partial token sequence.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use vesper_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_text::LocationInfo,
};

/// The dispatch character has no registered entry and the readtable has no default entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NoReadtableEntry {
    /// The location of the character that failed dispatch.
    pub location: LocationInfo,

    /// The dispatch character itself.
    pub character: char,
}

impl Display for NoReadtableEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format_args!(
                    "no readtable entry matches the character `{}`",
                    self.character
                )
            ),
            SourceCodeDisplay::new(&self.location, Option::<i32>::None)
        )
    }
}

/// A literal reached the end of the stream before its closing delimiter.
#[derive(Debug, Clone, PartialEq)]
pub struct UnterminatedLiteral {
    /// The location of the opening delimiter.
    pub location: LocationInfo,
}

impl Display for UnterminatedLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unterminated literal"),
            SourceCodeDisplay::new(
                &self.location,
                Some("this delimiter is never closed before the end of the input")
            )
        )
    }
}

/// A `\u`/`\u{...}` escape sequence is malformed, out of range, or decodes to an unusable
/// character.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidEscape {
    /// The location of the escape sequence.
    pub location: LocationInfo,

    /// Describes what is wrong with the escape sequence.
    pub reason: &'static str,
}

impl Display for InvalidEscape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an invalid escape sequence"),
            SourceCodeDisplay::new(&self.location, Some(self.reason))
        )
    }
}

/// The fallback entry was dispatched on a character that cannot start any token.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedCharacter {
    /// The location of the offending character.
    pub location: LocationInfo,

    /// The offending character itself.
    pub character: char,
}

impl Display for UnexpectedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format_args!("unexpected character `{}`", self.character)
            ),
            SourceCodeDisplay::new(
                &self.location,
                Some("this character cannot start any token")
            )
        )
    }
}

/// A numeric literal carries a radix prefix or an exponent marker with no digits after it.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidNumericLiteral {
    /// The location where the numeric literal starts.
    pub location: LocationInfo,
}

impl Display for InvalidNumericLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an invalid numeric literal"),
            SourceCodeDisplay::new(
                &self.location,
                Some("expected digits after the radix prefix or exponent marker")
            )
        )
    }
}

/// A produced token violates the structural contract checked at the macro-expander boundary.
///
/// This signals a programming error in a readtable entry's action, not a recoverable user input
/// error.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeViolation {
    /// Describes the violated constraint.
    pub description: String,
}

impl Display for ShapeViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            Message::new(
                Severity::Error,
                format_args!("token violates the syntax contract: {}", self.description)
            ),
        )
    }
}

/// Is an enumeration containing all kinds of errors that can occur while reading source text.
#[derive(Debug, Clone, PartialEq, EnumAsInner, From, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("{0}")]
    NoReadtableEntry(NoReadtableEntry),

    #[error("{0}")]
    UnterminatedLiteral(UnterminatedLiteral),

    #[error("{0}")]
    InvalidEscape(InvalidEscape),

    #[error("{0}")]
    UnexpectedCharacter(UnexpectedCharacter),

    #[error("{0}")]
    InvalidNumericLiteral(InvalidNumericLiteral),

    #[error("{0}")]
    ShapeViolation(ShapeViolation),
}
