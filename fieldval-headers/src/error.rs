use smol_str::SmolStr;
use std::fmt;

use crate::grammar::ParseError;

/// Which bound of the quality range was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBound {
    Lower,
    Upper,
}

/// Error produced when constructing or validating a typed value.
///
/// Syntax errors of the underlying grammar are wrapped as
/// [`ValueError::Syntax`], everything else is a domain error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The text does not follow the grammar.
    Syntax(ParseError),
    /// An identity field (type, coding, name, tag, ...) is invalid.
    InvalidIdentity {
        field: &'static str,
        value: SmolStr,
        source: ParseError,
    },
    /// A parameter value does not satisfy the parameter contract.
    InvalidParameter {
        name: SmolStr,
        value: SmolStr,
        source: Box<ValueError>,
    },
    /// A quality value outside of `[0, 1]`.
    QualityOutOfRange { value: SmolStr, bound: QualityBound },
    /// A list that needs at least one element was empty.
    EmptyList,
    /// A value of another kind was given than the one expected.
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },
    /// A wildcard was used where only concrete values are allowed.
    WildcardNotAllowed { context: &'static str },
    /// A concrete value was matched against a wildcard.
    WildcardComparison,
    InvalidUri { value: SmolStr, reason: SmolStr },
    InvalidDate { value: SmolStr },
    /// A value that cannot be represented in (or decoded from) a charset.
    Unrepresentable {
        charset: SmolStr,
        reason: &'static str,
    },
    /// Fields that are valid on their own but contradict each other.
    Inconsistent { reason: &'static str },
}

impl ValueError {
    /// The underlying [`ParseError`], if this is a syntax error
    /// (directly or through an invalid parameter or identity).
    #[must_use]
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Syntax(err) | Self::InvalidIdentity { source: err, .. } => Some(err),
            Self::InvalidParameter { source, .. } => source.parse_error(),
            _ => None,
        }
    }

    pub(crate) fn invalid_parameter(name: &str, value: &str, source: impl Into<Self>) -> Self {
        Self::InvalidParameter {
            name: SmolStr::new(name),
            value: SmolStr::new(value),
            source: Box::new(source.into()),
        }
    }

    pub(crate) fn invalid_identity(field: &'static str, value: &str, source: ParseError) -> Self {
        Self::InvalidIdentity {
            field,
            value: SmolStr::new(value),
            source,
        }
    }
}

impl From<ParseError> for ValueError {
    fn from(err: ParseError) -> Self {
        Self::Syntax(err)
    }
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(err) => err.fmt(f),
            Self::InvalidIdentity {
                field,
                value,
                source,
            } => write!(f, "invalid {field} {value:?}: {source}"),
            Self::InvalidParameter {
                name,
                value,
                source,
            } => write!(f, "invalid parameter {name:?} with value {value:?}: {source}"),
            Self::QualityOutOfRange { value, bound } => match bound {
                QualityBound::Lower => {
                    write!(f, "quality value {value} is below the lower bound 0")
                }
                QualityBound::Upper => {
                    write!(f, "quality value {value} is above the upper bound 1")
                }
            },
            Self::EmptyList => f.write_str("list requires at least one element"),
            Self::WrongType { expected, actual } => {
                write!(f, "wrong type: expected {expected}, got {actual}")
            }
            Self::WildcardNotAllowed { context } => {
                write!(f, "wildcard not allowed in {context}")
            }
            Self::WildcardComparison => f.write_str("cannot match against a wildcard"),
            Self::InvalidUri { value, reason } => write!(f, "invalid uri {value:?}: {reason}"),
            Self::InvalidDate { value } => write!(f, "invalid http date {value:?}"),
            Self::Unrepresentable { charset, reason } => {
                write!(f, "unrepresentable in charset {charset}: {reason}")
            }
            Self::Inconsistent { reason } => write!(f, "inconsistent value: {reason}"),
        }
    }
}

impl std::error::Error for ValueError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidIdentity { source, .. } => Some(source),
            Self::InvalidParameter { source, .. } => match source.as_ref() {
                Self::Syntax(err) => Some(err),
                other => Some(other),
            },
            _ => None,
        }
    }
}

/// Error returned at the header boundary: decoding a header field value
/// (or encoding one) failed.
///
/// Carries the header (or parameter) name and the raw text that failed,
/// next to the [`ValueError`] cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    name: SmolStr,
    raw: String,
    source: ValueError,
}

impl Error {
    pub fn new(name: impl Into<SmolStr>, raw: impl Into<String>, source: ValueError) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
            source,
        }
    }

    /// Name of the header (or parameter) that failed.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw text that failed to convert.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn value_error(&self) -> &ValueError {
        &self.source
    }

    #[must_use]
    pub fn parse_error(&self) -> Option<&ParseError> {
        self.source.parse_error()
    }

    #[must_use]
    pub fn into_value_error(self) -> ValueError {
        self.source
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failed to convert \"{}\" value \"{}\", message: {}",
            self.name, self.raw, self.source
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            ValueError::Syntax(err) => Some(err),
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldval_core::error::ErrorExt;

    #[test]
    fn test_error_display() {
        let err = Error::new(
            "accept-encoding",
            "*; q=ABC",
            ValueError::invalid_parameter(
                "q",
                "ABC",
                ParseError::invalid_number("ABC", "invalid float literal"),
            ),
        );
        assert_eq!(
            err.to_string(),
            "Failed to convert \"accept-encoding\" value \"*; q=ABC\", message: \
             invalid parameter \"q\" with value \"ABC\": invalid number \"ABC\": invalid float literal"
        );
    }

    #[test]
    fn test_error_chain_reaches_parse_error() {
        let err = Error::new(
            "accept",
            "text/html;q",
            ValueError::invalid_parameter(
                "q",
                "",
                ParseError::MissingParameterValue {
                    name: SmolStr::new_static("q"),
                    offset: 11,
                },
            ),
        );
        let root = err.root_cause();
        assert!(root.downcast_ref::<ParseError>().is_some());
        assert_eq!(
            err.parse_error(),
            Some(&ParseError::MissingParameterValue {
                name: SmolStr::new_static("q"),
                offset: 11,
            })
        );
    }

    #[test]
    fn test_quality_bound_display() {
        assert_eq!(
            ValueError::QualityOutOfRange {
                value: SmolStr::new_static("-0.1"),
                bound: QualityBound::Lower
            }
            .to_string(),
            "quality value -0.1 is below the lower bound 0"
        );
        assert_eq!(
            ValueError::QualityOutOfRange {
                value: SmolStr::new_static("1.01"),
                bound: QualityBound::Upper
            }
            .to_string(),
            "quality value 1.01 is above the upper bound 1"
        );
    }
}
