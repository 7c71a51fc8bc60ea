use std::fmt;
use std::ops::RangeInclusive;

use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, read_number};
use crate::specifier::RangeUnit;

/// Content-Range, described in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-14.4)
///
/// # ABNF
///
/// ```text
/// Content-Range       = range-unit SP
///                       ( range-resp / unsatisfied-range )
///
/// range-resp          = incl-range "/" ( complete-length / "*" )
/// incl-range          = first-pos "-" last-pos
/// unsatisfied-range   = "*/" complete-length
///
/// complete-length     = 1*DIGIT
/// ```
///
/// # Example values
///
/// * `bytes 0-499/1234`
/// * `bytes 1200-1233/*`
/// * `bytes */1234`
///
/// # Examples
///
/// ```
/// use fieldval_headers::ContentRange;
///
/// // 100 bytes (included byte 199), with a full length of 3,400
/// let cr = ContentRange::bytes(100..=199, 3400).unwrap();
/// assert_eq!(cr.to_string(), "bytes 100-199/3400");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRange {
    unit: RangeUnit,
    range: Option<(u64, u64)>,
    complete_length: Option<u64>,
}

derive_header!(ContentRange, name: ::http::header::CONTENT_RANGE);

impl ContentRange {
    /// Construct a new `Content-Range: bytes first-last/complete_length` header.
    pub fn bytes(
        range: RangeInclusive<u64>,
        complete_length: impl Into<Option<u64>>,
    ) -> Result<Self, ValueError> {
        Self::new(
            RangeUnit::Bytes,
            Some((*range.start(), *range.end())),
            complete_length.into(),
        )
    }

    /// Create a new `ContentRange` stating the range could not be satisfied.
    ///
    /// The passed argument is the complete length of the entity.
    #[must_use]
    pub fn unsatisfied_bytes(complete_length: u64) -> Self {
        Self {
            unit: RangeUnit::Bytes,
            range: None,
            complete_length: Some(complete_length),
        }
    }

    /// Validate and build a `Content-Range` in any unit.
    pub fn new(
        unit: RangeUnit,
        range: Option<(u64, u64)>,
        complete_length: Option<u64>,
    ) -> Result<Self, ValueError> {
        match (range, complete_length) {
            (None, None) => Err(ValueError::Inconsistent {
                reason: "an unsatisfied range needs a complete length",
            }),
            (Some((first, last)), _) if first > last => Err(ValueError::Inconsistent {
                reason: "first position is after the last position",
            }),
            (Some((_, last)), Some(len)) if last >= len => Err(ValueError::Inconsistent {
                reason: "last position is not below the complete length",
            }),
            _ => Ok(Self {
                unit,
                range,
                complete_length,
            }),
        }
    }

    #[must_use]
    pub fn unit(&self) -> &RangeUnit {
        &self.unit
    }

    /// Get the byte range if satisified.
    ///
    /// Note that these byte ranges are inclusive on both ends.
    #[must_use]
    pub fn bytes_range(&self) -> Option<(u64, u64)> {
        self.range
    }

    /// Get the bytes complete length if available.
    #[must_use]
    pub fn bytes_len(&self) -> Option<u64> {
        self.complete_length
    }

    fn parse_text(text: &str, config: &DecodeConfig) -> Result<Self, ValueError> {
        let mut cursor = Cursor::with_config(text, config);
        cursor.skip_whitespace();
        let unit = RangeUnit::parse(&mut cursor)?;
        let before = cursor.position();
        cursor.skip_whitespace();
        if cursor.position() == before {
            return Err(cursor.unexpected().into());
        }

        if cursor.try_consume('*') {
            cursor.expect('/')?;
            let complete_length = read_number(&mut cursor)?;
            cursor.finish()?;
            return Ok(Self::unsatisfied_bytes(complete_length).with_unit(unit));
        }

        let first = read_number(&mut cursor)?;
        cursor.expect('-')?;
        let last = read_number(&mut cursor)?;
        cursor.expect('/')?;
        let complete_length = if cursor.try_consume('*') {
            None
        } else {
            Some(read_number(&mut cursor)?)
        };
        cursor.finish()?;
        Self::new(unit, Some((first, last)), complete_length)
    }

    fn with_unit(self, unit: RangeUnit) -> Self {
        Self { unit, ..self }
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.unit)?;
        match self.range {
            Some((first, last)) => write!(f, "{first}-{last}")?,
            None => f.write_str("*")?,
        }
        f.write_str("/")?;
        match self.complete_length {
            Some(len) => write!(f, "{len}"),
            None => f.write_str("*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use crate::grammar::ParseError;

    #[test]
    fn test_round_trip() {
        for input in [
            "bytes 123-456/789",
            "bytes 0-499/1234",
            "bytes 1200-1233/*",
            "bytes */1234",
            "pages 1-2/10",
        ] {
            let range: ContentRange = test_decode(&[input]).unwrap();
            assert_eq!(range.to_string(), input);
            assert_eq!(test_encode(range)["content-range"], input);
        }
    }

    #[test]
    fn test_accessors() {
        let range: ContentRange = "bytes 123-456/789".parse().unwrap();
        assert_eq!(range.unit(), &RangeUnit::Bytes);
        assert_eq!(range.bytes_range(), Some((123, 456)));
        assert_eq!(range.bytes_len(), Some(789));

        let range = ContentRange::unsatisfied_bytes(10);
        assert_eq!(range.bytes_range(), None);
        assert_eq!(range.to_string(), "bytes */10");
    }

    #[test]
    fn test_decode_invalid() {
        for (input, expected) in [
            ("bytes", ParseError::missing_value(5)),
            ("bytes1-2/3", ParseError::invalid_character('/', 8)),
            ("bytes */*", ParseError::invalid_character('*', 8)),
            ("bytes 1-/3", ParseError::invalid_character('/', 8)),
            ("bytes 1-2", ParseError::missing_value(9)),
            ("bytes 1-2/3 x", ParseError::invalid_character('x', 12)),
        ] {
            assert_eq!(
                input.parse::<ContentRange>(),
                Err(ValueError::Syntax(expected)),
                "{input:?}"
            );
        }
        for input in ["bytes 5-1/10", "bytes 0-10/10"] {
            assert!(
                matches!(
                    input.parse::<ContentRange>(),
                    Err(ValueError::Inconsistent { .. })
                ),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_bytes_constructor() {
        assert!(ContentRange::bytes(0..=9, 10).is_ok());
        assert!(ContentRange::bytes(0..=9, None).is_ok());
        assert!(ContentRange::bytes(0..=10, 10).is_err());
    }
}
