//! Contains the pre-populated [`Readtable`] implementing the standard lexical grammar:
//! whitespace/BOM skipping, line terminators, identifiers (with escape decoding), punctuators
//! (longest match), numeric literals (four radix forms), and string literals (full escape
//! decoding).
//!
//! Identifier scanning doubles as the table's fallback entry, since the set of identifier-start
//! characters is not enumerable as dispatch keys.

use std::{str::FromStr, sync::Arc};

use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use vesper_base::source_text::LocationInfo;

use crate::{
    char_stream::CharStream,
    error::{
        Error, InvalidEscape, InvalidNumericLiteral, UnexpectedCharacter, UnterminatedLiteral,
    },
    readtable::{Action, Entry, Readtable},
    reader::Reader,
    token::{Identifier, Numeric, Punctuator, PunctuatorKind, StringLiteral, Token},
};

/// The whitespace characters the default readtable skips, including the byte order mark.
const WHITESPACE: &[char] = &[
    '\t', '\u{000B}', '\u{000C}', ' ', '\u{00A0}', '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}',
    '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}',
    '\u{202F}', '\u{205F}', '\u{3000}', '\u{FEFF}',
];

const LINE_TERMINATORS: &[char] = &['\n', '\r', '\u{2028}', '\u{2029}'];

lazy_static! {
    static ref DEFAULT_READTABLE: Readtable = build_default_readtable();
}

/// Gets the shared readtable pre-populated with the standard lexical grammar.
///
/// The table is immutable; macro authors extend it by layering overrides with
/// [`Readtable::with_entry`] on a clone.
#[must_use]
pub fn default_readtable() -> &'static Readtable { &DEFAULT_READTABLE }

fn build_default_readtable() -> Readtable {
    let whitespace = Entry::new(Arc::new(WhitespaceEntry));
    let line_terminator = Entry::new(Arc::new(LineTerminatorEntry));
    let identifier = Entry::new(Arc::new(IdentifierEntry));
    let punctuator = Entry::new(Arc::new(PunctuatorEntry));
    let numeric = Entry::new(Arc::new(NumericEntry));
    let string_literal = Entry::new(Arc::new(StringLiteralEntry));

    let mut table = Readtable::new().with_default_entry(identifier.clone());

    for &key in WHITESPACE {
        table = table.with_entry(key, whitespace.clone());
    }

    for &key in LINE_TERMINATORS {
        table = table.with_entry(key, line_terminator.clone());
    }

    for key in '0'..='9' {
        table = table.with_entry(key, numeric.clone());
    }

    for key in ['"', '\''] {
        table = table.with_entry(key, string_literal.clone());
    }

    // every multi-character punctuator starts with a single-character one, so keying the table by
    // the one-character members covers the whole set
    for kind in PunctuatorKind::iter() {
        let mut characters = kind.as_str().chars();

        if let (Some(key), None) = (characters.next(), characters.next()) {
            table = table.with_entry(key, punctuator.clone());
        }
    }

    // escape-initial identifiers dispatch on the backslash
    table.with_entry('\\', identifier)
}

struct WhitespaceEntry;

impl Action for WhitespaceEntry {
    fn invoke(
        &self,
        _reader: &mut Reader,
        stream: &mut CharStream,
    ) -> Result<Option<Token>, Error> {
        stream.next();
        Ok(None)
    }
}

struct LineTerminatorEntry;

impl Action for LineTerminatorEntry {
    fn invoke(&self, reader: &mut Reader, stream: &mut CharStream) -> Result<Option<Token>, Error> {
        // crlf is one terminator
        if stream.next() == Some('\r') && stream.peek() == Some('\n') {
            stream.next();
        }

        // the cursor must be on the fresh line before the next dispatch
        reader.update_location(stream.location_info());

        Ok(None)
    }
}

struct IdentifierEntry;

impl Action for IdentifierEntry {
    fn invoke(
        &self,
        _reader: &mut Reader,
        stream: &mut CharStream,
    ) -> Result<Option<Token>, Error> {
        scan_identifier(stream)
    }
}

struct PunctuatorEntry;

impl Action for PunctuatorEntry {
    fn invoke(
        &self,
        _reader: &mut Reader,
        stream: &mut CharStream,
    ) -> Result<Option<Token>, Error> {
        scan_punctuator(stream)
    }
}

struct NumericEntry;

impl Action for NumericEntry {
    fn invoke(
        &self,
        _reader: &mut Reader,
        stream: &mut CharStream,
    ) -> Result<Option<Token>, Error> {
        scan_numeric_literal(stream)
    }
}

struct StringLiteralEntry;

impl Action for StringLiteralEntry {
    fn invoke(
        &self,
        _reader: &mut Reader,
        stream: &mut CharStream,
    ) -> Result<Option<Token>, Error> {
        scan_string_literal(stream)
    }
}

/// Checks if the given character can start an identifier.
fn is_id_start(character: char) -> bool {
    character == '$' || character == '_' || character.is_alphabetic()
}

/// Checks if the given character can continue an identifier.
///
/// The zero-width joiner and non-joiner are valid continuations.
fn is_id_continue(character: char) -> bool {
    character == '$'
        || character == '_'
        || character == '\u{200C}'
        || character == '\u{200D}'
        || character.is_alphanumeric()
}

fn scan_identifier(stream: &mut CharStream) -> Result<Option<Token>, Error> {
    let mut value = String::new();

    match stream.peek() {
        Some('\\') => value.push(read_identifier_escape(stream, true)?),
        Some(character) if is_id_start(character) => {
            stream.next();
            value.push(character);
        }
        Some(character) => {
            return Err(UnexpectedCharacter {
                location: stream.location_info(),
                character,
            }
            .into())
        }
        None => return Ok(None),
    }

    loop {
        match stream.peek() {
            Some('\\') => value.push(read_identifier_escape(stream, false)?),
            Some(character) if is_id_continue(character) => {
                stream.next();
                value.push(character);
            }
            _ => break,
        }
    }

    Ok(Some(Identifier { value }.into()))
}

/// Reads a `\uXXXX`/`\u{...}` escape inside an identifier, starting at the backslash, and checks
/// that the decoded character is valid at the current identifier position.
fn read_identifier_escape(stream: &mut CharStream, at_start: bool) -> Result<char, Error> {
    let location = stream.location_info();

    stream.next();
    if stream.next() != Some('u') {
        return Err(invalid_escape(
            &location,
            "expected `u` after `\\` in an identifier",
        ));
    }

    let decoded = read_unicode_escape(stream, &location)?;

    let valid = if at_start {
        is_id_start(decoded)
    } else {
        is_id_continue(decoded)
    };

    if valid {
        Ok(decoded)
    } else {
        Err(invalid_escape(
            &location,
            "escape does not decode to an identifier character",
        ))
    }
}

fn scan_punctuator(stream: &mut CharStream) -> Result<Option<Token>, Error> {
    let location = stream.location_info();
    let Some(first) = stream.next() else {
        return Ok(None);
    };

    let mut value = first.to_string();
    let Ok(mut kind) = PunctuatorKind::from_str(&value) else {
        return Err(UnexpectedCharacter {
            location,
            character: first,
        }
        .into());
    };

    // longest match: extend while the extended string is still a known punctuator
    while let Some(next) = stream.peek() {
        let mut candidate = value.clone();
        candidate.push(next);

        let Ok(extended) = PunctuatorKind::from_str(&candidate) else {
            break;
        };

        stream.next();
        value = candidate;
        kind = extended;
    }

    Ok(Some(Punctuator { kind }.into()))
}

fn scan_numeric_literal(stream: &mut CharStream) -> Result<Option<Token>, Error> {
    let location = stream.location_info();
    let Some(first) = stream.next() else {
        return Ok(None);
    };

    let value = if first == '0' {
        match stream.peek() {
            Some('x' | 'X') => {
                stream.next();
                scan_radix_digits(stream, &location, 16)?
            }
            Some('o' | 'O') => {
                stream.next();
                scan_radix_digits(stream, &location, 8)?
            }
            Some('b' | 'B') => {
                stream.next();
                scan_radix_digits(stream, &location, 2)?
            }
            Some(character) if character.is_ascii_digit() => scan_leading_zero_digits(stream),
            _ => scan_decimal_tail(stream, &location, String::from("0"))?,
        }
    } else {
        scan_decimal_tail(stream, &location, String::from(first))?
    };

    Ok(Some(Numeric { value }.into()))
}

fn scan_radix_digits(
    stream: &mut CharStream,
    location: &LocationInfo,
    radix: u32,
) -> Result<f64, Error> {
    let mut value = 0f64;
    let mut any_digits = false;

    while let Some(digit) = stream.peek().and_then(|character| character.to_digit(radix)) {
        stream.next();
        value = value * f64::from(radix) + f64::from(digit);
        any_digits = true;
    }

    if any_digits {
        Ok(value)
    } else {
        Err(InvalidNumericLiteral {
            location: location.clone(),
        }
        .into())
    }
}

/// Scans the digits directly following a leading zero: all octal makes a legacy octal literal, an
/// `8` or `9` anywhere makes the whole literal plain decimal.
fn scan_leading_zero_digits(stream: &mut CharStream) -> f64 {
    let mut digits = String::new();

    while let Some(character) = stream.peek() {
        if character.is_ascii_digit() {
            stream.next();
            digits.push(character);
        } else {
            break;
        }
    }

    let radix = if digits.bytes().all(|byte| byte <= b'7') {
        8
    } else {
        10
    };

    digits.chars().fold(0f64, |value, character| {
        value * f64::from(radix) + f64::from(character.to_digit(10).unwrap_or(0))
    })
}

fn scan_decimal_tail(
    stream: &mut CharStream,
    location: &LocationInfo,
    mut literal: String,
) -> Result<f64, Error> {
    while let Some(character) = stream.peek() {
        if character.is_ascii_digit() {
            stream.next();
            literal.push(character);
        } else {
            break;
        }
    }

    if stream.peek() == Some('.') {
        stream.next();
        literal.push('.');

        while let Some(character) = stream.peek() {
            if character.is_ascii_digit() {
                stream.next();
                literal.push(character);
            } else {
                break;
            }
        }
    }

    if let Some(marker @ ('e' | 'E')) = stream.peek() {
        stream.next();
        literal.push(marker);

        if let Some(sign @ ('+' | '-')) = stream.peek() {
            stream.next();
            literal.push(sign);
        }

        let mut any_digits = false;

        while let Some(character) = stream.peek() {
            if character.is_ascii_digit() {
                stream.next();
                literal.push(character);
                any_digits = true;
            } else {
                break;
            }
        }

        if !any_digits {
            return Err(InvalidNumericLiteral {
                location: location.clone(),
            }
            .into());
        }
    }

    literal.parse().map_err(|_| {
        Error::from(InvalidNumericLiteral {
            location: location.clone(),
        })
    })
}

fn scan_string_literal(stream: &mut CharStream) -> Result<Option<Token>, Error> {
    let start = stream.location_info();
    let Some(delimiter) = stream.next() else {
        return Ok(None);
    };

    let mut value = String::new();

    loop {
        let escape_location = stream.location_info();
        let Some(character) = stream.next() else {
            return Err(UnterminatedLiteral { location: start }.into());
        };

        if character == delimiter {
            break;
        }

        if character == '\\' {
            read_string_escape(stream, &mut value, &escape_location)?;
        } else {
            // an unescaped line terminator is reproduced literally and does not end the scan
            value.push(character);
        }
    }

    Ok(Some(StringLiteral { value }.into()))
}

/// Decodes one escape sequence inside a string literal, with the backslash already consumed.
fn read_string_escape(
    stream: &mut CharStream,
    value: &mut String,
    location: &LocationInfo,
) -> Result<(), Error> {
    let Some(escaped) = stream.next() else {
        return Err(UnterminatedLiteral {
            location: location.clone(),
        }
        .into());
    };

    match escaped {
        // an escaped line terminator reproduces its full terminator sequence in the value
        '\r' => {
            value.push('\r');
            if stream.peek() == Some('\n') {
                stream.next();
                value.push('\n');
            }
        }
        '\n' | '\u{2028}' | '\u{2029}' => value.push(escaped),
        'u' => value.push(read_unicode_escape(stream, location)?),
        '0'..='3' => read_octal_escape(stream, value, escaped, 2),
        '4'..='7' => read_octal_escape(stream, value, escaped, 1),
        // any other character is emitted literally, dropping the backslash
        _ => value.push(escaped),
    }

    Ok(())
}

/// Decodes an octal escape from its first digit plus at most `max_extra_digits` following octal
/// digits; anything past the consumed digits stays literal in the scan.
fn read_octal_escape(
    stream: &mut CharStream,
    value: &mut String,
    first: char,
    max_extra_digits: usize,
) {
    let mut byte = octal_digit_value(first);

    for _ in 0..max_extra_digits {
        match stream.peek() {
            Some(digit @ '0'..='7') => {
                stream.next();
                byte = byte * 8 + octal_digit_value(digit);
            }
            _ => break,
        }
    }

    value.push(char::from(byte));
}

fn octal_digit_value(digit: char) -> u8 {
    digit
        .to_digit(8)
        .and_then(|value| u8::try_from(value).ok())
        .unwrap_or(0)
}

/// Decodes a unicode escape with the `\u` already consumed: either `{H..H}` with a code point up
/// to U+10FFFF, or exactly four hexadecimal digits, where a high/low surrogate escape pair
/// combines into one code point.
fn read_unicode_escape(stream: &mut CharStream, location: &LocationInfo) -> Result<char, Error> {
    if stream.peek() == Some('{') {
        stream.next();

        let mut value: u32 = 0;
        let mut any_digits = false;

        loop {
            match stream.next() {
                Some('}') if any_digits => break,
                Some(character) => {
                    let Some(digit) = character.to_digit(16) else {
                        return Err(invalid_escape(
                            location,
                            "expected hexadecimal digits in `\\u{...}`",
                        ));
                    };

                    any_digits = true;
                    value = value * 16 + digit;

                    if value > 0x0010_FFFF {
                        return Err(invalid_escape(location, "code point is beyond U+10FFFF"));
                    }
                }
                None => return Err(invalid_escape(location, "unclosed `\\u{...}` escape")),
            }
        }

        char::from_u32(value)
            .ok_or_else(|| invalid_escape(location, "code point is a lone surrogate"))
    } else {
        let first = read_hex4(stream, location)?;

        match first {
            0xD800..=0xDBFF => {
                if stream.peek() == Some('\\') {
                    stream.next();
                } else {
                    return Err(invalid_escape(location, "lone high surrogate escape"));
                }

                if stream.next() != Some('u') {
                    return Err(invalid_escape(
                        location,
                        "expected a low surrogate escape after a high surrogate",
                    ));
                }

                let low = read_hex4(stream, location)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(invalid_escape(
                        location,
                        "expected a low surrogate escape after a high surrogate",
                    ));
                }

                let combined = 0x0001_0000 + ((first - 0xD800) << 10) + (low - 0xDC00);
                char::from_u32(combined)
                    .ok_or_else(|| invalid_escape(location, "code point is a lone surrogate"))
            }
            0xDC00..=0xDFFF => Err(invalid_escape(location, "lone low surrogate escape")),
            _ => char::from_u32(first)
                .ok_or_else(|| invalid_escape(location, "code point is a lone surrogate")),
        }
    }
}

fn read_hex4(stream: &mut CharStream, location: &LocationInfo) -> Result<u32, Error> {
    let mut value = 0u32;

    for _ in 0..4 {
        let Some(digit) = stream.next().and_then(|character| character.to_digit(16)) else {
            return Err(invalid_escape(
                location,
                "expected four hexadecimal digits after `\\u`",
            ));
        };

        value = value * 16 + digit;
    }

    Ok(value)
}

fn invalid_escape(location: &LocationInfo, reason: &'static str) -> Error {
    InvalidEscape {
        location: location.clone(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests;
