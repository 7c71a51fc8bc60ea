use fieldval_utils::collections::NonEmptyVec;
use smol_str::SmolStr;
use std::{fmt, str::FromStr};

use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, ParseError, parse_list};

/// `etagc = %x21 / %x23-7E / obs-text`
fn is_etag_char(c: char) -> bool {
    c == '!' || ('#'..='~').contains(&c) || !c.is_ascii()
}

/// An entity tag, defined in [RFC 9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.8.3)
///
/// An entity tag consists of a string enclosed by two literal double quotes.
/// Preceding the first double quote is an optional weakness indicator,
/// which always looks like `W/`. Examples for valid tags are `"xyzzy"` and `W/"xyzzy"`.
///
/// # ABNF
///
/// ```text
/// entity-tag = [ weak ] opaque-tag
/// weak       = %x57.2F ; "W/", case-sensitive
/// opaque-tag = DQUOTE *etagc DQUOTE
/// etagc      = %x21 / %x23-7E / obs-text
///            ; VCHAR except double quotes, plus obs-text
/// ```
///
/// # Comparison
/// To check if two entity tags are equivalent in an application always use the `strong_eq` or
/// `weak_eq` methods based on the context of the Tag. Only use `==` to check if two tags are
/// identical.
///
/// The example below shows the results for a set of entity-tag pairs and
/// both the weak and strong comparison function results:
///
/// | ETag 1  | ETag 2  | Strong Comparison | Weak Comparison |
/// |---------|---------|-------------------|-----------------|
/// | `W/"1"` | `W/"1"` | no match          | match           |
/// | `W/"1"` | `W/"2"` | no match          | no match        |
/// | `W/"1"` | `"1"`   | no match          | match           |
/// | `"1"`   | `"1"`   | match             | match           |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    tag: SmolStr,
    weak: bool,
}

impl EntityTag {
    /// Create a strong entity tag from its opaque value (without quotes).
    pub fn strong(tag: &str) -> Result<Self, ValueError> {
        Self::new(tag, false)
    }

    /// Create a weak entity tag from its opaque value (without quotes).
    pub fn weak(tag: &str) -> Result<Self, ValueError> {
        Self::new(tag, true)
    }

    fn new(tag: &str, weak: bool) -> Result<Self, ValueError> {
        match tag.char_indices().find(|(_, c)| !is_etag_char(*c)) {
            Some((offset, c)) => Err(ValueError::invalid_identity(
                "entity tag",
                tag,
                ParseError::invalid_character(c, offset),
            )),
            None => Ok(Self {
                tag: SmolStr::new(tag),
                weak,
            }),
        }
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        let weak = match cursor.peek() {
            Some('W') => {
                cursor.advance();
                cursor.expect('/')?;
                true
            }
            _ => false,
        };
        let open = cursor.position();
        let mark = cursor.mark();
        cursor.expect('"')?;
        let start = cursor.position();
        loop {
            match cursor.peek() {
                None => {
                    cursor.reset(mark);
                    return Err(ParseError::UnterminatedQuotedString { offset: open });
                }
                Some('"') => break,
                Some(c) if is_etag_char(c) => {
                    cursor.advance();
                }
                Some(_) => return Err(cursor.unexpected()),
            }
        }
        let tag = SmolStr::new(&cursor.text()[start..cursor.position()]);
        cursor.advance();
        Ok(Self { tag, weak })
    }

    /// Parse with an explicit [`DecodeConfig`].
    pub fn parse_with_config(text: &str, config: &DecodeConfig) -> Result<Self, ValueError> {
        let mut cursor = Cursor::with_config(text, config);
        cursor.skip_whitespace();
        let tag = Self::parse(&mut cursor)?;
        cursor.finish()?;
        Ok(tag)
    }

    /// The opaque tag, without quotes.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// For strong comparison two entity-tags are equivalent if both are not weak and their
    /// opaque-tags match character-by-character.
    #[must_use]
    pub fn strong_eq(&self, other: &Self) -> bool {
        !self.weak && !other.weak && self.tag == other.tag
    }

    /// For weak comparison two entity-tags are equivalent if their
    /// opaque-tags match character-by-character, regardless of either or
    /// both being tagged as "weak".
    #[must_use]
    pub fn weak_eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl FromStr for EntityTag {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_config(s, DecodeConfig::global())
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            f.write_str("W/")?;
        }
        write!(f, "\"{}\"", self.tag)
    }
}

/// `*` or a list of entity tags, as used by `If-Match` and `If-None-Match`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityTagRange {
    Any,
    Tags(NonEmptyVec<EntityTag>),
}

impl EntityTagRange {
    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        cursor.skip_whitespace();
        if cursor.try_consume('*') {
            return Ok(Self::Any);
        }
        parse_list(cursor, EntityTag::parse).map(Self::Tags)
    }

    /// Parse with an explicit [`DecodeConfig`].
    pub fn parse_with_config(text: &str, config: &DecodeConfig) -> Result<Self, ValueError> {
        let mut cursor = Cursor::with_config(text, config);
        let range = Self::parse(&mut cursor)?;
        cursor.finish()?;
        Ok(range)
    }

    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn tags(&self) -> impl Iterator<Item = &EntityTag> {
        let tags = match self {
            Self::Any => None,
            Self::Tags(tags) => Some(tags.iter()),
        };
        tags.into_iter().flatten()
    }

    /// `*` matches any tag, otherwise one of the tags must strongly match.
    #[must_use]
    pub fn matches_strong(&self, tag: &EntityTag) -> bool {
        match self {
            Self::Any => true,
            Self::Tags(tags) => tags.any(|t| t.strong_eq(tag)),
        }
    }

    /// `*` matches any tag, otherwise one of the tags must weakly match.
    #[must_use]
    pub fn matches_weak(&self, tag: &EntityTag) -> bool {
        match self {
            Self::Any => true,
            Self::Tags(tags) => tags.any(|t| t.weak_eq(tag)),
        }
    }
}

impl From<EntityTag> for EntityTagRange {
    fn from(tag: EntityTag) -> Self {
        Self::Tags(NonEmptyVec::new(tag))
    }
}

impl FromStr for EntityTagRange {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_config(s, DecodeConfig::global())
    }
}

impl fmt::Display for EntityTagRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Tags(tags) => {
                for (i, tag) in tags.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    tag.fmt(f)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn etag(s: &str) -> EntityTag {
        s.parse().unwrap()
    }

    #[test]
    fn test_etag_parse_success() {
        // Expected success
        assert_eq!(etag("\"foobar\""), EntityTag::strong("foobar").unwrap());
        assert_eq!(etag("\"\""), EntityTag::strong("").unwrap());
        assert_eq!(etag("W/\"weaktag\""), EntityTag::weak("weaktag").unwrap());
        assert_eq!(etag("W/\"\x65\x62\""), EntityTag::weak("\x65\x62").unwrap());
        assert_eq!(etag("W/\"\""), EntityTag::weak("").unwrap());
    }

    #[test]
    fn test_etag_parse_failures() {
        for (input, expected) in [
            ("no-dquotes", ParseError::invalid_character('n', 0)),
            ("w/\"the-first-w-is-case-sensitive\"", ParseError::invalid_character('w', 0)),
            ("", ParseError::missing_value(0)),
            ("\"unmatched-dquotes1", ParseError::UnterminatedQuotedString { offset: 0 }),
            ("W/\"unmatched", ParseError::UnterminatedQuotedString { offset: 2 }),
            ("unmatched-dquotes2\"", ParseError::invalid_character('u', 0)),
            ("\"matched-\"dquotes\"", ParseError::invalid_character('d', 10)),
            ("W\"x\"", ParseError::invalid_character('"', 1)),
        ] {
            assert_eq!(
                input.parse::<EntityTag>(),
                Err(ValueError::Syntax(expected)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_etag_fmt() {
        assert_eq!(EntityTag::strong("foobar").unwrap().to_string(), "\"foobar\"");
        assert_eq!(EntityTag::strong("").unwrap().to_string(), "\"\"");
        assert_eq!(EntityTag::weak("weak-etag").unwrap().to_string(), "W/\"weak-etag\"");
        assert_eq!(EntityTag::weak("\u{0065}").unwrap().to_string(), "W/\"\x65\"");
        assert_eq!(EntityTag::weak("").unwrap().to_string(), "W/\"\"");
    }

    #[test]
    fn test_etag_new_invalid() {
        assert_eq!(
            EntityTag::strong("a\"b"),
            Err(ValueError::invalid_identity(
                "entity tag",
                "a\"b",
                ParseError::invalid_character('"', 1)
            ))
        );
        assert!(EntityTag::weak("a b").is_err());
    }

    #[test]
    fn test_cmp() {
        // | ETag 1  | ETag 2  | Strong Comparison | Weak Comparison |
        // |---------|---------|-------------------|-----------------|
        // | `W/"1"` | `W/"1"` | no match          | match           |
        // | `W/"1"` | `W/"2"` | no match          | no match        |
        // | `W/"1"` | `"1"`   | no match          | match           |
        // | `"1"`   | `"1"`   | match             | match           |
        let mut etag1 = EntityTag::weak("1").unwrap();
        let mut etag2 = etag1.clone();
        assert!(!etag1.strong_eq(&etag2));
        assert!(etag1.weak_eq(&etag2));

        etag2 = EntityTag::weak("2").unwrap();
        assert!(!etag1.strong_eq(&etag2));
        assert!(!etag1.weak_eq(&etag2));

        etag2 = EntityTag::strong("1").unwrap();
        assert!(!etag1.strong_eq(&etag2));
        assert!(etag1.weak_eq(&etag2));

        etag1 = EntityTag::strong("1").unwrap();
        assert!(etag1.strong_eq(&etag2));
        assert!(etag1.weak_eq(&etag2));
    }

    #[test]
    fn test_range_lists() {
        let range: EntityTagRange = "\"A\",\"B\"".parse().unwrap();
        let tags: Vec<_> = range.tags().cloned().collect();
        assert_eq!(
            tags,
            [EntityTag::strong("A").unwrap(), EntityTag::strong("B").unwrap()]
        );

        let range: EntityTagRange = "W/\"A\", W/\"B\"".parse().unwrap();
        assert!(range.tags().all(EntityTag::is_weak));
        assert_eq!(range.to_string(), "W/\"A\", W/\"B\"");

        assert!("*".parse::<EntityTagRange>().unwrap().is_any());
        assert_eq!(
            "\"A\",".parse::<EntityTagRange>(),
            Err(ValueError::Syntax(ParseError::missing_value(4)))
        );
        assert_eq!(
            "\"A\", B".parse::<EntityTagRange>(),
            Err(ValueError::Syntax(ParseError::invalid_character('B', 5)))
        );
    }

    #[test]
    fn test_range_matches() {
        let range: EntityTagRange = "W/\"a\", \"b\"".parse().unwrap();
        assert!(range.matches_weak(&etag("\"a\"")));
        assert!(!range.matches_strong(&etag("\"a\"")));
        assert!(range.matches_strong(&etag("\"b\"")));
        assert!(EntityTagRange::Any.matches_strong(&etag("\"zzz\"")));
    }
}
