//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, str::FromStr};

use derive_more::From;
use derive_new::new;
use enum_as_inner::EnumAsInner;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use vesper_base::source_text::LocationInfo;

/// Is an enumeration representing the punctuator strings the default readtable recognizes.
///
/// Every multi-character member has all of its proper prefixes in the table as well, which is what
/// makes greedy longest-match scanning possible with single-character lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum PunctuatorKind {
    OpenBrace,
    CloseBrace,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Dot,
    Semicolon,
    Comma,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    Equal,
    NotEqual,
    StrictEqual,
    StrictNotEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Increment,
    Decrement,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Ampersand,
    Pipe,
    Caret,
    Not,
    Tilde,
    LogicalAnd,
    LogicalOr,
    Question,
    Colon,
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
    LeftShiftAssign,
    RightShiftAssign,
    UnsignedRightShiftAssign,
    AmpersandAssign,
    PipeAssign,
    CaretAssign,
    Arrow,
}

impl ToString for PunctuatorKind {
    fn to_string(&self) -> String { self.as_str().to_string() }
}

/// Is an error that is returned when a string cannot be parsed into a [`PunctuatorKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of punctuator.")]
pub struct PunctuatorParseError;

impl FromStr for PunctuatorKind {
    type Err = PunctuatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_PUNCTUATOR_MAP: HashMap<&'static str, PunctuatorKind> = {
                let mut map = HashMap::new();

                for punctuator in PunctuatorKind::iter() {
                    map.insert(punctuator.as_str(), punctuator);
                }

                map
            };
        }
        STRING_PUNCTUATOR_MAP
            .get(s)
            .copied()
            .ok_or(PunctuatorParseError)
    }
}

impl PunctuatorKind {
    /// Gets the string representation of the punctuator as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenBrace => "{",
            Self::CloseBrace => "}",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::OpenBracket => "[",
            Self::CloseBracket => "]",
            Self::Dot => ".",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::LessThan => "<",
            Self::GreaterThan => ">",
            Self::LessThanEqual => "<=",
            Self::GreaterThanEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::StrictEqual => "===",
            Self::StrictNotEqual => "!==",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::UnsignedRightShift => ">>>",
            Self::Ampersand => "&",
            Self::Pipe => "|",
            Self::Caret => "^",
            Self::Not => "!",
            Self::Tilde => "~",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::Question => "?",
            Self::Colon => ":",
            Self::Assign => "=",
            Self::PlusAssign => "+=",
            Self::MinusAssign => "-=",
            Self::StarAssign => "*=",
            Self::SlashAssign => "/=",
            Self::PercentAssign => "%=",
            Self::LeftShiftAssign => "<<=",
            Self::RightShiftAssign => ">>=",
            Self::UnsignedRightShiftAssign => ">>>=",
            Self::AmpersandAssign => "&=",
            Self::PipeAssign => "|=",
            Self::CaretAssign => "^=",
            Self::Arrow => "=>",
        }
    }
}

/// Is an enumeration containing all categories of tokens the reader can produce.
///
/// A scalar value and a nested token sequence are mutually exclusive by construction: only the
/// [`Delimited`] variant carries nested tokens and it carries no scalar value.
#[derive(Debug, Clone, PartialEq, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Token {
    Identifier(Identifier),
    Punctuator(Punctuator),
    Numeric(Numeric),
    StringLiteral(StringLiteral),
    Delimited(Delimited),
}

/// Represents a fully decoded identifier.
///
/// Escape sequences in the source form are resolved to their actual code points in `value`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    /// The decoded identifier string.
    pub value: String,
}

/// Represents a single punctuator, matched greedily against the punctuator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Punctuator {
    /// The kind of punctuator that the token represents.
    pub kind: PunctuatorKind,
}

impl Punctuator {
    /// Gets the matched punctuator string.
    #[must_use]
    pub fn as_str(self) -> &'static str { self.kind.as_str() }
}

/// Represents a numeric literal value.
///
/// All radix forms collapse to a double-precision value, following the numeric model of the
/// source grammar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Numeric {
    /// The decoded numeric value.
    pub value: f64,
}

/// Represents a fully decoded string literal, without its delimiters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringLiteral {
    /// The decoded string value.
    pub value: String,
}

/// Represents a grouped form holding a nested, ordered sequence of tokens.
///
/// The default readtable produces no grouped forms (brackets scan as punctuators); registered
/// entries build them, typically by re-entering [`crate::reader::Reader::read`] on the bracketed
/// region.
#[derive(Debug, Clone, PartialEq)]
pub struct Delimited {
    /// The nested token sequence.
    pub inner: Vec<Token>,

    /// The line number where the grouped form opens, for multi-line forms.
    pub line_number: Option<usize>,

    /// The position where the opening line starts, for multi-line forms.
    pub line_start: Option<usize>,
}

/// Is a token paired with the location where it begins.
///
/// One element of the reader's output sequence.
#[derive(Debug, Clone, PartialEq, new)]
pub struct TokenNode {
    /// The token itself.
    pub token: Token,

    /// The location captured before the token's entry consumed any character.
    pub location: LocationInfo,
}
