use fieldval_utils::collections::NonEmptyVec;
use std::fmt;

use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, parse_list};
use crate::specifier::{RangeSpec, RangeUnit};

/// `Range` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-14.2)
///
/// The "Range" header field on a GET request modifies the method
/// semantics to request transfer of only one or more subranges of the
/// selected representation data, rather than the entire selected
/// representation data.
///
/// # ABNF
///
/// ```text
/// Range             = ranges-specifier
/// ranges-specifier  = range-unit "=" range-set
/// range-set         = 1#range-spec
/// range-spec        = int-range / suffix-range / other-range
/// ```
///
/// # Example values
///
/// * `bytes=1000-`
/// * `bytes=-2000`
/// * `bytes=0-1,30-40`
/// * `bytes=0-10,20-90,-100`
///
/// # Examples
///
/// ```
/// use fieldval_headers::Range;
///
/// let range = Range::bytes(0, 1234).unwrap();
/// assert_eq!(range.to_string(), "bytes=0-1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    unit: RangeUnit,
    specs: NonEmptyVec<RangeSpec>,
}

derive_header!(Range, name: ::http::header::RANGE);

impl Range {
    #[must_use]
    pub fn new(unit: RangeUnit, specs: NonEmptyVec<RangeSpec>) -> Self {
        Self { unit, specs }
    }

    /// Create a `Range: bytes=first-last` header.
    pub fn bytes(first: u64, last: u64) -> Result<Self, ValueError> {
        RangeSpec::from_to(first, last)
            .map(|spec| Self::new(RangeUnit::Bytes, NonEmptyVec::new(spec)))
    }

    #[must_use]
    pub fn unit(&self) -> &RangeUnit {
        &self.unit
    }

    pub fn iter(&self) -> impl Iterator<Item = &RangeSpec> {
        self.specs.iter()
    }

    /// The inclusive bounds of the ranges that can be satisfied
    /// for a representation of `len` units, in declared order.
    pub fn satisfiable_ranges(&self, len: u64) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.specs.iter().filter_map(move |spec| spec.to_bounds(len))
    }

    fn parse_text(text: &str, config: &DecodeConfig) -> Result<Self, ValueError> {
        let mut cursor = Cursor::with_config(text, config);
        cursor.skip_whitespace();
        let unit = RangeUnit::parse(&mut cursor)?;
        cursor.skip_whitespace();
        cursor.expect('=')?;
        let specs = parse_list(&mut cursor, RangeSpec::parse)?;
        cursor.finish()?;
        Ok(Self { unit, specs })
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.unit)?;
        for (i, spec) in self.specs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            spec.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use crate::grammar::ParseError;

    #[test]
    fn test_decode_values() {
        let range: Range = test_decode(&["bytes=0-10, 20-90,-100"]).unwrap();
        assert_eq!(range.unit(), &RangeUnit::Bytes);
        let specs: Vec<_> = range.iter().copied().collect();
        assert_eq!(
            specs,
            [
                RangeSpec::FromTo { first: 0, last: 10 },
                RangeSpec::FromTo {
                    first: 20,
                    last: 90
                },
                RangeSpec::Last { suffix: 100 },
            ]
        );
        assert_eq!(range.to_string(), "bytes=0-10, 20-90, -100");
    }

    #[test]
    fn test_satisfiable_ranges() {
        let range: Range = "bytes=0-1, 500-, 2000-3000, -10".parse().unwrap();
        let bounds: Vec<_> = range.satisfiable_ranges(1000).collect();
        assert_eq!(bounds, [(0, 1), (500, 999), (990, 999)]);
    }

    #[test]
    fn test_custom_unit() {
        let range: Range = "items=1-2".parse().unwrap();
        assert!(range.unit().is_unknown());
        assert_eq!(range.to_string(), "items=1-2");
    }

    #[test]
    fn test_decode_invalid() {
        for (input, expected) in [
            ("bytes", ValueError::Syntax(ParseError::missing_value(5))),
            ("bytes=", ValueError::Syntax(ParseError::missing_value(6))),
            ("bytes=1-2,", ValueError::Syntax(ParseError::missing_value(10))),
            ("bytes=a-2", ValueError::Syntax(ParseError::invalid_character('a', 6))),
        ] {
            assert_eq!(input.parse::<Range>(), Err(expected), "{input:?}");
        }
        assert!(matches!(
            "bytes=5-1".parse::<Range>(),
            Err(ValueError::Inconsistent { .. })
        ));
    }

    #[test]
    fn test_encode_value() {
        let headers = test_encode(Range::bytes(0, 499).unwrap());
        assert_eq!(headers["range"], "bytes=0-499");
    }
}
