//! Contains various kinds of definition for formatting ASCII color/style codes.

use std::fmt::Display;

/// Represents a color that can be applied to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Applies the color to the given displayable object.
    pub fn paint<T>(self, display: T) -> Styled<T> {
        Styled {
            display,
            color: Some(self),
            bold: false,
            underline: false,
        }
    }

    fn code(self) -> &'static str {
        match self {
            Self::Black => "\x1B[30m",
            Self::Red => "\x1B[31m",
            Self::Green => "\x1B[32m",
            Self::Yellow => "\x1B[33m",
            Self::Blue => "\x1B[34m",
            Self::Magenta => "\x1B[35m",
            Self::Cyan => "\x1B[36m",
            Self::White => "\x1B[37m",
        }
    }
}

/// Is a struct implementing [`Display`] that represents a displayable object with a color and
/// styles applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Styled<T> {
    display: T,
    color: Option<Color>,
    bold: bool,
    underline: bool,
}

impl<T> Styled<T> {
    /// Creates a new styled object with no color and no styles applied.
    pub fn new(display: T) -> Self {
        Self {
            display,
            color: None,
            bold: false,
            underline: false,
        }
    }

    /// Applies the bold style to the object.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Applies the underline style to the object.
    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.bold {
            write!(f, "\x1B[1m")?;
        }
        if self.underline {
            write!(f, "\x1B[4m")?;
        }
        if let Some(color) = self.color {
            write!(f, "{}", color.code())?;
        }

        write!(f, "{}\x1B[0m", self.display)
    }
}
