use std::{fmt, str::FromStr};

use fieldval_utils::macros::enums::enum_builder;

use crate::ValueError;
use crate::grammar::{Cursor, ParseError};

enum_builder! {
    /// A content coding, as used by `Content-Encoding` and `Accept-Encoding`.
    ///
    /// Compared case-insensitively, `x-gzip` and `x-compress` are
    /// aliases of `gzip` and `compress`. Unknown codings are kept
    /// (lower-cased) as [`ContentCoding::Unknown`].
    @Token
    pub enum ContentCoding {
        Gzip => "gzip" | "x-gzip",
        Deflate => "deflate",
        Brotli => "br",
        Zstd => "zstd",
        Compress => "compress" | "x-compress",
        Identity => "identity",
    }
}

impl ContentCoding {
    /// Read a coding token. The wildcard is not a content coding,
    /// a `*` anywhere in the token is reported as invalid.
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        let start = cursor.position();
        let token = cursor.read_token()?;
        if let Some(index) = token.find('*') {
            return Err(ParseError::invalid_character('*', start + index));
        }
        Ok(Self::from_token(token))
    }
}

impl FromStr for ContentCoding {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        cursor.skip_whitespace();
        Self::parse(&mut cursor)
            .and_then(|coding| cursor.finish().map(|()| coding))
            .map_err(|err| ValueError::invalid_identity("content coding", s, err))
    }
}

/// A content coding or the `*` wildcard, as used by `Accept-Encoding`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodingRange {
    Wildcard,
    Coding(ContentCoding),
}

impl CodingRange {
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        let token = cursor.read_token()?;
        Ok(if token == "*" {
            Self::Wildcard
        } else {
            Self::Coding(ContentCoding::from_token(token))
        })
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    #[must_use]
    pub fn coding(&self) -> Option<&ContentCoding> {
        match self {
            Self::Wildcard => None,
            Self::Coding(coding) => Some(coding),
        }
    }

    /// Does this range accept `other`?
    ///
    /// Fails with [`ValueError::WildcardComparison`] if `other` is a wildcard.
    pub fn matches(&self, other: &Self) -> Result<bool, ValueError> {
        match (self, other) {
            (_, Self::Wildcard) => Err(ValueError::WildcardComparison),
            (Self::Wildcard, _) => Ok(true),
            (Self::Coding(a), Self::Coding(b)) => Ok(a == b),
        }
    }
}

impl From<ContentCoding> for CodingRange {
    fn from(coding: ContentCoding) -> Self {
        Self::Coding(coding)
    }
}

impl FromStr for CodingRange {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        cursor.skip_whitespace();
        Self::parse(&mut cursor)
            .and_then(|range| cursor.finish().map(|()| range))
            .map_err(|err| ValueError::invalid_identity("coding", s, err))
    }
}

impl fmt::Display for CodingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Coding(coding) => coding.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_coding() {
        for (input, expected) in [
            ("gzip", ContentCoding::Gzip),
            ("X-GZIP", ContentCoding::Gzip),
            ("br", ContentCoding::Brotli),
            ("x-compress", ContentCoding::Compress),
            (" zstd ", ContentCoding::Zstd),
        ] {
            assert_eq!(input.parse::<ContentCoding>().unwrap(), expected, "{input}");
        }
        let unknown: ContentCoding = "Snappy".parse().unwrap();
        assert!(unknown.is_unknown());
        assert_eq!(unknown.to_string(), "snappy");
    }

    #[test]
    fn test_content_coding_rejects_wildcard() {
        for (input, offset) in [("*", 0), ("gz*ip", 2)] {
            assert_eq!(
                input.parse::<ContentCoding>(),
                Err(ValueError::invalid_identity(
                    "content coding",
                    input,
                    ParseError::invalid_character('*', offset)
                ))
            );
        }
    }

    #[test]
    fn test_coding_range_matches() {
        let gzip = CodingRange::Coding(ContentCoding::Gzip);
        let br = CodingRange::Coding(ContentCoding::Brotli);
        assert_eq!(CodingRange::Wildcard.matches(&gzip), Ok(true));
        assert_eq!(gzip.matches(&gzip), Ok(true));
        assert_eq!(gzip.matches(&br), Ok(false));
        assert_eq!(
            gzip.matches(&CodingRange::Wildcard),
            Err(ValueError::WildcardComparison)
        );
        assert_eq!(
            CodingRange::Wildcard.matches(&CodingRange::Wildcard),
            Err(ValueError::WildcardComparison)
        );
    }
}
