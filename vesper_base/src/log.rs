//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Styled};

use crate::source_text::LocationInfo;

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = match self.severity {
            Severity::Error => Color::Red.paint("[error]:").bold(),
            Severity::Info => Color::Green.paint("[info]:").bold(),
            Severity::Warning => Color::Yellow.paint("[warning]:").bold(),
        };

        let message_part = Styled::new(&self.display).bold();

        write!(f, "{log_header} {message_part}")
    }
}

fn get_digit(mut number: usize) -> usize {
    let mut digit = 0;

    while number > 0 {
        number /= 10;
        digit += 1;
    }

    digit.max(1)
}

fn is_line_terminator(character: char) -> bool {
    matches!(character, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Structure implementing [`Display`] that prints the line of source text a location points at,
/// with a caret under the offending column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The location of the source text to be printed.
    pub location: &'a LocationInfo,

    /// The help message to be displayed under the caret.
    pub help_display: Option<T>,
}

impl<'a, T: Display> SourceCodeDisplay<'a, T> {
    fn write_numbered_line(
        f: &mut std::fmt::Formatter<'_>,
        line_number: usize,
        width: usize,
        line: &str,
    ) -> std::fmt::Result {
        write!(
            f,
            "{}{}{} ",
            Color::Cyan.paint(line_number + 1).bold(),
            format_args!("{:pad$}", "", pad = width - get_digit(line_number + 1) + 1),
            Color::Cyan.paint("┃").bold(),
        )?;

        for char in line.chars() {
            // if the char is tab, print 4 spaces
            if char == '\t' {
                write!(f, "    ")?;
            } else if !is_line_terminator(char) {
                write!(f, "{char}")?;
            }
        }

        writeln!(f)
    }

    fn write_empty_pipe(f: &mut std::fmt::Formatter<'_>, width: usize) -> std::fmt::Result {
        for _ in 0..=width {
            write!(f, " ")?;
        }
        writeln!(f, "{}", Color::Cyan.paint("┃").bold())
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = self.location.source();
        let line_number = self.location.line();
        let column = self.location.column();

        // line numbers are displayed 1-based even though the location contract is 0-based
        let largest_line_number_digits = get_digit(line_number + 2);

        // prints the source location
        for _ in 0..largest_line_number_digits {
            write!(f, " ")?;
        }

        writeln!(
            f,
            "{} {}",
            Color::Cyan.paint("-->").bold(),
            format_args!(
                "{}:{}:{}",
                self.location
                    .filename()
                    .map_or_else(|| "<input>".to_string(), |path| path.display().to_string()),
                line_number + 1,
                column + 1
            )
        )?;

        Self::write_empty_pipe(f, largest_line_number_digits)?;

        // prints the line before the location
        if let Some(line) = line_number
            .checked_sub(1)
            .and_then(|previous| source.get_line(previous))
        {
            Self::write_numbered_line(f, line_number - 1, largest_line_number_digits, line)?;
        }

        let Some(line) = source.get_line(line_number) else {
            return Self::write_empty_pipe(f, largest_line_number_digits);
        };

        Self::write_numbered_line(f, line_number, largest_line_number_digits, line)?;

        // prints the caret under the offending column
        {
            for _ in 0..=largest_line_number_digits {
                write!(f, " ")?;
            }
            write!(f, "{} ", Color::Cyan.paint("┃").bold())?;

            for char in line.chars().take(column) {
                write!(f, "{}", if char == '\t' { "    " } else { " " })?;
            }

            write!(f, "{}", Color::Red.paint("^").bold())?;

            if let Some(help_display) = &self.help_display {
                write!(f, " {}: {help_display}", Styled::new("help").bold())?;
            }

            writeln!(f)?;
        }

        // prints the line after the location
        if let Some(line) = source.get_line(line_number + 1) {
            Self::write_numbered_line(f, line_number + 1, largest_line_number_digits, line)?;
        }

        Self::write_empty_pipe(f, largest_line_number_digits)
    }
}
