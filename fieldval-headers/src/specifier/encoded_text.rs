use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};
use std::{fmt, str::FromStr};

use super::{Charset, LanguageTag};
use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, ParseError};

/// Everything but `attr-char` is percent-encoded.
const ATTR_CHAR_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

const fn is_attr_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'&' | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~'
        )
}

const fn is_mime_charset_char(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#' | b'$' | b'%' | b'&' | b'+' | b'-' | b'^' | b'_' | b'`' | b'{' | b'}' | b'~'
        )
}

/// The charsets whose bytes we can turn into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decoder {
    Utf8,
    Latin1,
    Ascii,
}

impl Decoder {
    fn for_charset(charset: &Charset) -> Option<Self> {
        let name = charset.canonical_name();
        if name.eq_ignore_ascii_case(Charset::UTF_8.canonical_name()) {
            Some(Self::Utf8)
        } else if name.eq_ignore_ascii_case(Charset::ISO_8859_1.canonical_name()) {
            Some(Self::Latin1)
        } else if name.eq_ignore_ascii_case(Charset::US_ASCII.canonical_name()) {
            Some(Self::Ascii)
        } else {
            None
        }
    }

    fn decode(self, bytes: Vec<u8>) -> Option<String> {
        match self {
            Self::Utf8 => String::from_utf8(bytes).ok(),
            Self::Latin1 => Some(bytes.into_iter().map(char::from).collect()),
            Self::Ascii => bytes
                .is_ascii()
                .then(|| bytes.into_iter().map(char::from).collect()),
        }
    }

    fn encode(self, value: &str) -> Option<Vec<u8>> {
        match self {
            Self::Utf8 => Some(value.as_bytes().to_vec()),
            Self::Latin1 => value
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect(),
            Self::Ascii => value.is_ascii().then(|| value.as_bytes().to_vec()),
        }
    }
}

/// An extended parameter value as defined in
/// [RFC 8187](https://www.rfc-editor.org/rfc/rfc8187#section-3.2),
/// e.g. `UTF-8'en'%E2%82%AC%20rates`.
///
/// Only charsets whose bytes can be decoded are accepted: `UTF-8`,
/// `ISO-8859-1` and `US-ASCII`. Other (even if known) charsets fail
/// with [`ValueError::Unrepresentable`].
///
/// # ABNF
///
/// ```text
/// ext-value     = charset  "'" [ language ] "'" value-chars
/// charset       = "UTF-8" / "ISO-8859-1" / mime-charset
/// value-chars   = *( pct-encoded / attr-char )
/// pct-encoded   = "%" HEXDIG HEXDIG
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedText {
    charset: Charset,
    language: Option<LanguageTag>,
    value: String,
}

impl EncodedText {
    /// Create an encoded text, failing if `value` cannot be
    /// represented in `charset`.
    pub fn new(
        charset: Charset,
        language: Option<LanguageTag>,
        value: impl Into<String>,
    ) -> Result<Self, ValueError> {
        let value = value.into();
        let decoder = Decoder::for_charset(&charset).ok_or_else(|| unsupported(&charset))?;
        if decoder.encode(&value).is_none() {
            return Err(ValueError::Unrepresentable {
                charset: charset.canonical_name().into(),
                reason: "value contains characters outside of the charset",
            });
        }
        Ok(Self {
            charset,
            language,
            value,
        })
    }

    /// Create a `UTF-8` encoded text without language.
    #[must_use]
    pub fn utf8(value: impl Into<String>) -> Self {
        Self {
            charset: Charset::UTF_8,
            language: None,
            value: value.into(),
        }
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ValueError> {
        let name = cursor.read_while(is_mime_charset_char);
        if name.is_empty() {
            return Err(cursor.unexpected().into());
        }
        cursor.expect('\'')?;

        let language = if cursor.peek() == Some('\'') {
            None
        } else {
            Some(LanguageTag::parse(cursor)?)
        };
        cursor.expect('\'')?;

        let value_start = cursor.position();
        loop {
            match cursor.peek_byte() {
                Some(b'%') => {
                    let offset = cursor.position();
                    let hex = cursor.text().as_bytes().get(offset + 1..offset + 3);
                    if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
                        return Err(ParseError::invalid_character('%', offset).into());
                    }
                    cursor.advance();
                    cursor.advance();
                    cursor.advance();
                }
                Some(b) if is_attr_char(b) => {
                    cursor.advance();
                }
                _ => break,
            }
        }
        let raw = &cursor.text()[value_start..cursor.position()];

        let charset = cursor
            .config()
            .resolve_charset(name)
            .ok_or_else(|| ValueError::Unrepresentable {
                charset: name.into(),
                reason: "unknown charset",
            })?;
        let decoder = Decoder::for_charset(&charset).ok_or_else(|| unsupported(&charset))?;
        let value = decoder
            .decode(percent_decode_str(raw).collect())
            .ok_or_else(|| ValueError::Unrepresentable {
                charset: charset.canonical_name().into(),
                reason: "percent-encoded bytes are not valid in the charset",
            })?;

        Ok(Self {
            charset,
            language,
            value,
        })
    }

    /// Parse with an explicit [`DecodeConfig`].
    pub fn parse_with_config(text: &str, config: &DecodeConfig) -> Result<Self, ValueError> {
        let mut cursor = Cursor::with_config(text, config);
        cursor.skip_whitespace();
        let value = Self::parse(&mut cursor)?;
        cursor.finish()?;
        Ok(value)
    }

    #[must_use]
    pub fn charset(&self) -> &Charset {
        &self.charset
    }

    #[must_use]
    pub fn language(&self) -> Option<&LanguageTag> {
        self.language.as_ref()
    }

    /// The decoded text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

fn unsupported(charset: &Charset) -> ValueError {
    ValueError::Unrepresentable {
        charset: charset.canonical_name().into(),
        reason: "charset cannot be decoded",
    }
}

impl FromStr for EncodedText {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_config(s, DecodeConfig::global())
    }
}

impl fmt::Display for EncodedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'", self.charset)?;
        if let Some(language) = &self.language {
            write!(f, "{language}")?;
        }
        f.write_str("'")?;
        // representability is checked at construction
        let bytes = Decoder::for_charset(&self.charset)
            .and_then(|decoder| decoder.encode(&self.value))
            .unwrap_or_default();
        write!(f, "{}", percent_encode(&bytes, ATTR_CHAR_ENCODE_SET))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_utf8_without_language() {
        let text: EncodedText = "UTF-8''abc%20123".parse().unwrap();
        assert_eq!(text.charset(), &Charset::UTF_8);
        assert_eq!(text.language(), None);
        assert_eq!(text.value(), "abc 123");
        assert_eq!(text.to_string(), "UTF-8''abc%20123");
    }

    #[test]
    fn test_parse_with_language() {
        let text: EncodedText = "utf-8'en'%C2%A3%20rates".parse().unwrap();
        assert_eq!(text.language().map(LanguageTag::as_str), Some("en"));
        assert_eq!(text.value(), "£ rates");
        assert_eq!(text.to_string(), "UTF-8'en'%C2%A3%20rates");
    }

    #[test]
    fn test_parse_latin1() {
        let text: EncodedText = "iso-8859-1'de'n%E4chstes".parse().unwrap();
        assert_eq!(text.charset(), &Charset::ISO_8859_1);
        assert_eq!(text.value(), "nächstes");
        assert_eq!(text.to_string(), "ISO-8859-1'de'n%E4chstes");
    }

    #[test]
    fn test_invalid_percent_encoding() {
        for (input, offset) in [
            ("UTF-8''abc%2", 10),
            ("UTF-8''%zz", 7),
            ("UTF-8''a%", 8),
        ] {
            assert_eq!(
                input.parse::<EncodedText>(),
                Err(ValueError::Syntax(ParseError::invalid_character('%', offset))),
                "{input}"
            );
        }
    }

    #[test]
    fn test_invalid_structure() {
        assert_eq!(
            "UTF-8'abc".parse::<EncodedText>(),
            Err(ValueError::Syntax(ParseError::missing_value(9)))
        );
        assert_eq!(
            "''abc".parse::<EncodedText>(),
            Err(ValueError::Syntax(ParseError::invalid_character('\'', 0)))
        );
        assert_eq!(
            "UTF-8''a b".parse::<EncodedText>(),
            Err(ValueError::Syntax(ParseError::invalid_character('b', 9)))
        );
    }

    #[test]
    fn test_unrepresentable() {
        assert!(matches!(
            "UTF-8''%FF".parse::<EncodedText>(),
            Err(ValueError::Unrepresentable { .. })
        ));
        assert!(matches!(
            "US-ASCII''%E4".parse::<EncodedText>(),
            Err(ValueError::Unrepresentable { .. })
        ));
        assert!(matches!(
            "windows-1252''abc".parse::<EncodedText>(),
            Err(ValueError::Unrepresentable { .. })
        ));
        assert!(matches!(
            "x-klingon''abc".parse::<EncodedText>(),
            Err(ValueError::Unrepresentable { .. })
        ));
        assert!(matches!(
            EncodedText::new(Charset::ISO_8859_1, None, "€"),
            Err(ValueError::Unrepresentable { .. })
        ));
    }

    #[test]
    fn test_new_round_trip() {
        let text = EncodedText::new(
            Charset::UTF_8,
            Some("en".parse().unwrap()),
            "€ rates & more",
        )
        .unwrap();
        let wire = text.to_string();
        assert_eq!(wire, "UTF-8'en'%E2%82%AC%20rates%20&%20more");
        assert_eq!(wire.parse::<EncodedText>().unwrap(), text);
    }
}
