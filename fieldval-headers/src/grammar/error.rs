use smol_str::SmolStr;
use std::fmt;

/// Error produced by the header grammar.
///
/// Every variant that points into the input carries a byte offset,
/// which is never larger than the length of the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that is not allowed at this position.
    InvalidCharacter { character: char, offset: usize },
    /// A value (element, token, number, ...) was expected but absent.
    MissingValue { offset: usize },
    /// A parameter name without its `=value` part.
    MissingParameterValue { name: SmolStr, offset: usize },
    /// A quoted-string whose closing quote is missing,
    /// the offset points to the opening quote.
    UnterminatedQuotedString { offset: usize },
    /// The grammar requires at least some text.
    EmptyText,
    /// Text that has the shape of a number but isn't a valid one.
    InvalidNumber { text: SmolStr, reason: SmolStr },
    /// A number (or count) outside of its allowed range.
    OutOfRange { value: SmolStr, min: u64, max: u64 },
    /// A value of one kind was given where another kind was expected.
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },
}

/// The kind of a [`ParseError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    InvalidCharacter,
    MissingValue,
    MissingParameterValue,
    UnterminatedQuotedString,
    EmptyText,
    InvalidNumber,
    OutOfRange,
    WrongType,
}

impl ParseError {
    pub(crate) fn invalid_character(character: char, offset: usize) -> Self {
        Self::InvalidCharacter { character, offset }
    }

    pub(crate) fn missing_value(offset: usize) -> Self {
        Self::MissingValue { offset }
    }

    pub(crate) fn invalid_number(text: &str, reason: impl fmt::Display) -> Self {
        Self::InvalidNumber {
            text: SmolStr::new(text),
            reason: smol_str::format_smolstr!("{reason}"),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        match self {
            Self::InvalidCharacter { .. } => ParseErrorKind::InvalidCharacter,
            Self::MissingValue { .. } => ParseErrorKind::MissingValue,
            Self::MissingParameterValue { .. } => ParseErrorKind::MissingParameterValue,
            Self::UnterminatedQuotedString { .. } => ParseErrorKind::UnterminatedQuotedString,
            Self::EmptyText => ParseErrorKind::EmptyText,
            Self::InvalidNumber { .. } => ParseErrorKind::InvalidNumber,
            Self::OutOfRange { .. } => ParseErrorKind::OutOfRange,
            Self::WrongType { .. } => ParseErrorKind::WrongType,
        }
    }

    /// Byte offset into the parsed text, for the kinds that have one.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::InvalidCharacter { offset, .. }
            | Self::MissingValue { offset }
            | Self::MissingParameterValue { offset, .. }
            | Self::UnterminatedQuotedString { offset } => Some(*offset),
            Self::EmptyText
            | Self::InvalidNumber { .. }
            | Self::OutOfRange { .. }
            | Self::WrongType { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, offset } => {
                write!(f, "invalid character {character:?} at offset {offset}")
            }
            Self::MissingValue { offset } => write!(f, "missing value at offset {offset}"),
            Self::MissingParameterValue { name, offset } => {
                write!(f, "missing value for parameter {name:?} at offset {offset}")
            }
            Self::UnterminatedQuotedString { offset } => {
                write!(f, "unterminated quoted string starting at offset {offset}")
            }
            Self::EmptyText => f.write_str("empty text"),
            Self::InvalidNumber { text, reason } => {
                write!(f, "invalid number {text:?}: {reason}")
            }
            Self::OutOfRange { value, min, max } => {
                write!(f, "value {value} out of range [{min}, {max}]")
            }
            Self::WrongType { expected, actual } => {
                write!(f, "wrong type: expected {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_per_kind() {
        for (err, kind, offset) in [
            (
                ParseError::invalid_character('x', 3),
                ParseErrorKind::InvalidCharacter,
                Some(3),
            ),
            (
                ParseError::missing_value(7),
                ParseErrorKind::MissingValue,
                Some(7),
            ),
            (
                ParseError::UnterminatedQuotedString { offset: 0 },
                ParseErrorKind::UnterminatedQuotedString,
                Some(0),
            ),
            (ParseError::EmptyText, ParseErrorKind::EmptyText, None),
            (
                ParseError::invalid_number("ABC", "invalid float literal"),
                ParseErrorKind::InvalidNumber,
                None,
            ),
        ] {
            assert_eq!(err.kind(), kind, "{err}");
            assert_eq!(err.offset(), offset, "{err}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ParseError::invalid_character(';', 4).to_string(),
            "invalid character ';' at offset 4"
        );
        assert_eq!(
            ParseError::MissingParameterValue {
                name: SmolStr::new_static("q"),
                offset: 6
            }
            .to_string(),
            "missing value for parameter \"q\" at offset 6"
        );
    }
}
