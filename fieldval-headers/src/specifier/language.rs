use smol_str::SmolStr;
use std::{fmt, hash, str::FromStr};

use crate::ValueError;
use crate::grammar::{Cursor, ParseError};

/// Read `1*8ALPHA *( "-" 1*8alphanum )` and return the consumed text.
fn read_language(cursor: &mut Cursor<'_>) -> Result<SmolStr, ParseError> {
    let start = cursor.position();
    read_subtag(cursor, |b| b.is_ascii_alphabetic())?;
    loop {
        let mark = cursor.mark();
        if !cursor.try_consume('-') {
            break;
        }
        if let Err(err) = read_subtag(cursor, |b| b.is_ascii_alphanumeric()) {
            cursor.reset(mark);
            return Err(err);
        }
    }
    Ok(SmolStr::new(&cursor.text()[start..cursor.position()]))
}

fn read_subtag(cursor: &mut Cursor<'_>, f: impl Fn(u8) -> bool) -> Result<(), ParseError> {
    let mark = cursor.mark();
    let start = cursor.position();
    let subtag = cursor.read_while(&f);
    if subtag.is_empty() {
        return Err(cursor.unexpected());
    }
    if subtag.len() > 8 {
        cursor.reset(mark);
        let character = char::from(subtag.as_bytes()[8]);
        return Err(ParseError::invalid_character(character, start + 8));
    }
    Ok(())
}

/// A language tag as used by `Content-Language` and RFC 8187 encoded text.
///
/// Compared ASCII case-insensitively, kept as written.
///
/// # ABNF
///
/// ```text
/// language-tag = 1*8ALPHA *( "-" 1*8alphanum )
/// ```
#[derive(Debug, Clone)]
pub struct LanguageTag(SmolStr);

impl LanguageTag {
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        read_language(cursor).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag, e.g. `en` for `en-US`.
    #[must_use]
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl PartialEq for LanguageTag {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for LanguageTag {}

impl hash::Hash for LanguageTag {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl FromStr for LanguageTag {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        cursor.skip_whitespace();
        Self::parse(&mut cursor)
            .and_then(|tag| cursor.finish().map(|()| tag))
            .map_err(|err| ValueError::invalid_identity("language tag", s, err))
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A language range as used by `Accept-Language` (RFC 4647 basic filtering).
///
/// # ABNF
///
/// ```text
/// language-range = (1*8ALPHA *("-" 1*8alphanum)) / "*"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LanguageRange {
    Wildcard,
    Tag(LanguageTag),
}

impl LanguageRange {
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        if cursor.try_consume('*') {
            Ok(Self::Wildcard)
        } else {
            LanguageTag::parse(cursor).map(Self::Tag)
        }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Wildcard => "*",
            Self::Tag(tag) => tag.as_str(),
        }
    }

    /// Basic filtering: does this range match `other`?
    ///
    /// `en` matches `en` and `en-US`, but not `eng`. The wildcard
    /// matches every range. Fails with [`ValueError::WildcardComparison`]
    /// if `other` is a wildcard.
    pub fn matches(&self, other: &Self) -> Result<bool, ValueError> {
        let Self::Tag(other) = other else {
            return Err(ValueError::WildcardComparison);
        };
        Ok(match self {
            Self::Wildcard => true,
            Self::Tag(tag) => {
                let (range, tag) = (tag.as_str(), other.as_str());
                tag.len() >= range.len()
                    && tag[..range.len()].eq_ignore_ascii_case(range)
                    && (tag.len() == range.len() || tag.as_bytes()[range.len()] == b'-')
            }
        })
    }
}

impl FromStr for LanguageRange {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        cursor.skip_whitespace();
        Self::parse(&mut cursor)
            .and_then(|range| cursor.finish().map(|()| range))
            .map_err(|err| ValueError::invalid_identity("language range", s, err))
    }
}

impl From<LanguageTag> for LanguageRange {
    fn from(tag: LanguageTag) -> Self {
        Self::Tag(tag)
    }
}

impl fmt::Display for LanguageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> LanguageRange {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_tags() {
        for input in ["en", "en-US", "zh-Hant-TW", "de-CH-1996", "x-klingon", "abcdefgh"] {
            let tag: LanguageTag = input.parse().unwrap();
            assert_eq!(tag.to_string(), input);
        }
        assert_eq!(range("en-US").to_string(), "en-US");
        assert!(range("*").is_wildcard());
    }

    #[test]
    fn test_parse_invalid() {
        for (input, source) in [
            ("", ParseError::missing_value(0)),
            ("en_US", ParseError::invalid_character('_', 2)),
            ("abcdefghi", ParseError::invalid_character('i', 8)),
            ("en-", ParseError::missing_value(3)),
            ("1en", ParseError::invalid_character('1', 0)),
            ("en-abcdefghi", ParseError::invalid_character('i', 11)),
        ] {
            assert_eq!(
                input.parse::<LanguageTag>(),
                Err(ValueError::invalid_identity("language tag", input, source)),
                "{input:?}"
            );
        }
        assert!("*".parse::<LanguageTag>().is_err());
    }

    #[test]
    fn test_case_insensitive_eq() {
        assert_eq!(range("en-us"), range("EN-US"));
        assert_ne!(range("en"), range("en-US"));
    }

    #[test]
    fn test_matches() {
        for (r, tag, expected) in [
            ("en", "en", true),
            ("en", "en-US", true),
            ("en", "EN-gb", true),
            ("en", "eng", false),
            ("en-US", "en", false),
            ("*", "de", true),
        ] {
            assert_eq!(range(r).matches(&range(tag)), Ok(expected), "{r} vs {tag}");
        }
        assert_eq!(
            range("en").matches(&range("*")),
            Err(ValueError::WildcardComparison)
        );
        assert_eq!(
            range("*").matches(&range("*")),
            Err(ValueError::WildcardComparison)
        );
    }

    #[test]
    fn test_primary() {
        let tag: LanguageTag = "zh-Hant".parse().unwrap();
        assert_eq!(tag.primary(), "zh");
    }
}
