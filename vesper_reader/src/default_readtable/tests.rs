use vesper_base::source_text::SourceText;

use crate::{
    char_stream::CharStream,
    error::Error,
    reader::Reader,
    token::{PunctuatorKind, TokenNode},
};

fn read(source: &str) -> Result<Vec<TokenNode>, Error> {
    let source = SourceText::anonymous(source);
    let mut stream = CharStream::new(&source);

    Reader::with_default_readtable().read(&mut stream)
}

fn read_first(source: &str) -> TokenNode {
    read(source)
        .unwrap()
        .into_iter()
        .next()
        .expect("expected at least one token")
}

fn assert_identifier(source: &str, expected: &str) {
    let node = read_first(source);
    let identifier = node.token.as_identifier().unwrap();

    assert_eq!(identifier.value, expected, "source: {source:?}");
    assert_eq!(node.location.position(), 0);
    assert_eq!(node.location.line(), 0);
    assert_eq!(node.location.column(), 0);
}

#[test]
fn test_unicode_identifiers() {
    assert_identifier("abcd ", "abcd");
    assert_identifier("$foo ", "$foo");
    assert_identifier("_bar ", "_bar");
    assert_identifier("日本語 ", "日本語");
    assert_identifier("\u{2163}\u{2161} ", "\u{2163}\u{2161}");
    assert_identifier("\\u2163\\u2161 ", "\u{2163}\u{2161}");
    assert_identifier("\u{102A7} ", "\u{102A7}");
    assert_identifier("\\u{102A7} ", "\u{102A7}");

    // a surrogate-pair escape combines into the single astral code point
    assert_identifier("\\uD800\\uDC00 ", "\u{10000}");

    // a thin space ends the identifier without being part of it
    assert_identifier("\u{2163}\u{2161}\u{200A}", "\u{2163}\u{2161}");

    // zero-width joiners are valid continuations
    assert_identifier("ab\u{200D}cd ", "ab\u{200D}cd");
    assert_identifier("\\u0024dollar ", "$dollar");
}

#[test]
fn test_invalid_identifier_escapes() {
    // `1` cannot start an identifier even when escaped
    assert!(matches!(
        read("\\u0031abc"),
        Err(Error::InvalidEscape(_))
    ));
    assert!(matches!(read("\\u004 "), Err(Error::InvalidEscape(_))));
    assert!(matches!(read("\\x0041 "), Err(Error::InvalidEscape(_))));
    assert!(matches!(read("ab\\u{}cd"), Err(Error::InvalidEscape(_))));
    assert!(matches!(read("\\uD800 "), Err(Error::InvalidEscape(_))));
}

#[test]
fn test_unexpected_character() {
    assert!(matches!(
        read("#"),
        Err(Error::UnexpectedCharacter(error)) if error.character == '#'
    ));
    assert!(matches!(read("a #"), Err(Error::UnexpectedCharacter(_))));
}

fn assert_punctuator(source: &str, expected: PunctuatorKind) {
    let node = read_first(source);
    let punctuator = node.token.as_punctuator().unwrap();

    assert_eq!(punctuator.kind, expected, "source: {source:?}");
}

#[test]
fn test_punctuators() {
    assert_punctuator("; ", PunctuatorKind::Semicolon);
    assert_punctuator(">>> ", PunctuatorKind::UnsignedRightShift);
    assert_punctuator(">>>= ", PunctuatorKind::UnsignedRightShiftAssign);
    assert_punctuator("=== ", PunctuatorKind::StrictEqual);
    assert_punctuator("=> ", PunctuatorKind::Arrow);
    assert_punctuator("{", PunctuatorKind::OpenBrace);
}

#[test]
fn test_punctuator_longest_match() {
    let nodes = read(">>>>").unwrap();

    assert_eq!(nodes.len(), 2);
    assert_eq!(
        nodes[0].token.as_punctuator().unwrap().kind,
        PunctuatorKind::UnsignedRightShift
    );
    assert_eq!(
        nodes[1].token.as_punctuator().unwrap().kind,
        PunctuatorKind::GreaterThan
    );
}

#[test]
fn test_whitespace_produces_no_tokens() {
    assert!(read(" ").unwrap().is_empty());
    assert!(read("\t").unwrap().is_empty());
    assert!(read("\u{FEFF}").unwrap().is_empty());
    assert!(read(" \t \u{00A0} \u{3000} ").unwrap().is_empty());
}

#[test]
fn test_line_terminators() {
    for source_text in ["\n", "\r\n", "\u{2028}", "\u{2029}"] {
        let source = SourceText::anonymous(source_text);
        let mut stream = CharStream::new(&source);
        let mut reader = Reader::with_default_readtable();

        let nodes = reader.read(&mut stream).unwrap();
        assert!(nodes.is_empty());

        let location = reader.location_info().unwrap();
        assert_eq!(location.line(), 1, "source: {source_text:?}");
        assert_eq!(location.column(), 0);
        assert_eq!(location.position(), source_text.len());
    }
}

fn assert_numeric(source: &str, expected: f64) {
    let node = read_first(source);
    let numeric = node.token.as_numeric().unwrap();

    assert_eq!(numeric.value, expected, "source: {source:?}");
}

#[test]
fn test_numeric_literals() {
    assert_numeric("0xFFFF ", 65535.0);
    assert_numeric("0xFF ", 255.0);
    assert_numeric("0o0756 ", 494.0);
    assert_numeric("0o76 ", 62.0);
    assert_numeric("0b1010 ", 10.0);
    assert_numeric("0b10 ", 2.0);
    assert_numeric("042 ", 34.0);
    assert_numeric("42 ", 42.0);
    assert_numeric("0 ", 0.0);

    // a leading zero followed by an 8 or 9 makes the literal plain decimal
    assert_numeric("089 ", 89.0);
}

#[test]
fn test_decimal_fractions_and_exponents() {
    assert_numeric("42.5 ", 42.5);
    assert_numeric("42. ", 42.0);
    assert_numeric("0.25 ", 0.25);
    assert_numeric("1e3 ", 1000.0);
    assert_numeric("2E-2 ", 0.02);
    assert_numeric("7e+2 ", 700.0);
}

#[test]
fn test_invalid_numeric_literals() {
    assert!(matches!(
        read("0x "),
        Err(Error::InvalidNumericLiteral(_))
    ));
    assert!(matches!(
        read("0o8"),
        Err(Error::InvalidNumericLiteral(_))
    ));
    assert!(matches!(
        read("0b"),
        Err(Error::InvalidNumericLiteral(_))
    ));
    assert!(matches!(read("1e"), Err(Error::InvalidNumericLiteral(_))));
    assert!(matches!(
        read("1e+"),
        Err(Error::InvalidNumericLiteral(_))
    ));
}

fn assert_string(source: &str, expected: &str) {
    let node = read_first(source);
    let literal = node.token.as_string_literal().unwrap();

    assert_eq!(literal.value, expected, "source: {source:?}");
}

#[test]
fn test_string_literals() {
    assert_string("\"\"", "");
    assert_string("'x'", "x");
    assert_string("\"x\"", "x");
    assert_string("'\\\\\\''", "\\'");
    assert_string("\"\\\\\\\"\"", "\\\"");
}

#[test]
fn test_string_line_continuations() {
    // an escaped line terminator reproduces its terminator sequence in the value
    assert_string("'\\\r'", "\r");
    assert_string("\"\\\r\n\"", "\r\n");
    assert_string("\"\\\n\"", "\n");
    assert_string("\"\\\u{2028}\"", "\u{2028}");
    assert_string("\"\\\u{2029}\"", "\u{2029}");

    // an unescaped terminator does not end the scan
    assert_string("\"a\nb\"", "a\nb");
    assert_string("\"\u{202A}\"", "\u{202A}");
}

#[test]
fn test_string_octal_escapes() {
    assert_string("\"\\0\"", "\0");
    assert_string("\"\\0x\"", "\0x");
    assert_string("\"\\01\"", "\u{1}");
    assert_string("\"\\1\"", "\u{1}");
    assert_string("\"\\11\"", "\t");
    assert_string("\"\\111\"", "I");

    // three digits at most for a 0-3 start, the rest stays literal
    assert_string("\"\\1111\"", "I1");
    assert_string("\"\\2111\"", "\u{89}1");

    // two digits at most for a 4-7 start
    assert_string("\"\\5111\"", ")11");
    assert_string("\"\\5a\"", "\u{5}a");
    assert_string("\"\\7a\"", "\u{7}a");
}

#[test]
fn test_string_fallback_escapes() {
    // the backslash is dropped and the character kept
    assert_string("\"\\a\"", "a");
    assert_string("\"\\8\"", "8");
    assert_string("\"\\n\"", "n");
}

#[test]
fn test_string_unicode_escapes() {
    assert_string("\"\\u0041\"", "A");
    assert_string("\"\\u{00F8}\"", "\u{F8}");
    assert_string("\"\\u{0}\"", "\0");
    assert_string("\"\\u{10FFFF}\"", "\u{10FFFF}");

    // leading zeros are ignored
    assert_string("\"\\u{0000000000F8}\"", "\u{F8}");

    // a surrogate escape pair combines into one code point
    assert_string("\"\\uD83D\\uDE00\"", "\u{1F600}");
}

#[test]
fn test_invalid_string_escapes() {
    assert!(matches!(
        read("\"\\u{110000}\""),
        Err(Error::InvalidEscape(_))
    ));
    assert!(matches!(
        read("\"\\u{D800}\""),
        Err(Error::InvalidEscape(_))
    ));
    assert!(matches!(
        read("\"\\uD800x\""),
        Err(Error::InvalidEscape(_))
    ));
    assert!(matches!(
        read("\"\\uZZZZ\""),
        Err(Error::InvalidEscape(_))
    ));
}

#[test]
fn test_unterminated_string_literals() {
    assert!(matches!(
        read("\"abc"),
        Err(Error::UnterminatedLiteral(error)) if error.location.position() == 0
    ));
    assert!(matches!(read("'"), Err(Error::UnterminatedLiteral(_))));
    assert!(matches!(read("\"\\"), Err(Error::UnterminatedLiteral(_))));
}

#[test]
fn test_mixed_sequence() {
    let nodes = read("let x = 0x10;\n'done'").unwrap();

    assert_eq!(nodes.len(), 6);
    assert_eq!(nodes[0].token.as_identifier().unwrap().value, "let");
    assert_eq!(nodes[1].token.as_identifier().unwrap().value, "x");
    assert_eq!(
        nodes[2].token.as_punctuator().unwrap().kind,
        PunctuatorKind::Assign
    );
    assert_eq!(nodes[3].token.as_numeric().unwrap().value, 16.0);
    assert_eq!(
        nodes[4].token.as_punctuator().unwrap().kind,
        PunctuatorKind::Semicolon
    );
    assert_eq!(nodes[5].token.as_string_literal().unwrap().value, "done");
}
