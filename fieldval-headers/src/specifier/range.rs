use std::{fmt, str::FromStr};

use fieldval_utils::macros::enums::enum_builder;

use crate::ValueError;
use crate::grammar::{Cursor, ParseError, read_number};

enum_builder! {
    /// The unit of a `Range` or `Content-Range`.
    @Token
    pub enum RangeUnit {
        Bytes => "bytes",
    }
}

impl RangeUnit {
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        cursor.read_token().map(Self::from_token)
    }
}

impl FromStr for RangeUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        cursor.skip_whitespace();
        Self::parse(&mut cursor)
            .and_then(|unit| cursor.finish().map(|()| unit))
            .map_err(|err| ValueError::invalid_identity("range unit", s, err))
    }
}

/// A single range of a `Range` header.
///
/// # ABNF
///
/// ```text
/// int-range    = first-pos "-" [ last-pos ]
/// suffix-range = "-" suffix-length
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeSpec {
    /// `first-last`, both inclusive.
    FromTo { first: u64, last: u64 },
    /// `first-`, up to the end.
    AllFrom { first: u64 },
    /// `-suffix`, the last `suffix` units.
    Last { suffix: u64 },
}

impl RangeSpec {
    pub fn from_to(first: u64, last: u64) -> Result<Self, ValueError> {
        if first > last {
            return Err(ValueError::Inconsistent {
                reason: "first position is after the last position",
            });
        }
        Ok(Self::FromTo { first, last })
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ValueError> {
        if cursor.try_consume('-') {
            let suffix = read_number(cursor)?;
            return Ok(Self::Last { suffix });
        }
        let first = read_number(cursor)?;
        cursor.expect('-')?;
        if cursor.peek_byte().is_some_and(|b| b.is_ascii_digit()) {
            let last = read_number(cursor)?;
            Self::from_to(first, last)
        } else {
            Ok(Self::AllFrom { first })
        }
    }

    /// Resolve into inclusive bounds for a representation of `len` units,
    /// `None` when the range cannot be satisfied.
    #[must_use]
    pub fn to_bounds(&self, len: u64) -> Option<(u64, u64)> {
        match *self {
            Self::FromTo { first, last } if first < len => Some((first, last.min(len - 1))),
            Self::AllFrom { first } if first < len => Some((first, len - 1)),
            Self::Last { suffix } if suffix > 0 && len > 0 => {
                Some((len.saturating_sub(suffix), len - 1))
            }
            _ => None,
        }
    }
}

impl FromStr for RangeSpec {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        cursor.skip_whitespace();
        let spec = Self::parse(&mut cursor)?;
        cursor.finish()?;
        Ok(spec)
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromTo { first, last } => write!(f, "{first}-{last}"),
            Self::AllFrom { first } => write!(f, "{first}-"),
            Self::Last { suffix } => write!(f, "-{suffix}"),
        }
    }
}
