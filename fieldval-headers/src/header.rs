use fieldval_core::telemetry::tracing;
use http::{HeaderName, HeaderValue};

use crate::config::DecodeConfig;
use crate::grammar::ParseError;
use crate::{Error, ValueError};

/// A trait for any object that will represent a header field and value.
pub trait TypedHeader {
    /// The name of this header.
    fn name() -> &'static HeaderName;
}

/// A [`TypedHeader`] that can be decoded from its field value(s).
///
/// Implementors only provide [`HeaderDecode::decode_text`], which parses
/// the (combined) field value. Multiple field lines of the same header
/// are joined with [`HeaderDecode::SEPARATOR`] before parsing, as
/// RFC 9110 §5.3 allows for list based headers.
pub trait HeaderDecode: TypedHeader + Sized {
    /// Separator used to combine multiple field lines.
    const SEPARATOR: &'static str = ", ";

    /// Decode this type from a single field value.
    fn decode_text(text: &str, config: &DecodeConfig) -> Result<Self, ValueError>;

    /// Decode this type from a single field value using the default config.
    fn decode_str(text: &str) -> Result<Self, Error> {
        Self::decode_str_with_config(text, DecodeConfig::global())
    }

    /// Decode this type from a single field value.
    fn decode_str_with_config(text: &str, config: &DecodeConfig) -> Result<Self, Error> {
        Self::decode_text(text, config).map_err(|err| {
            tracing::debug!(
                header = %Self::name(),
                "failed to decode header value: {err}"
            );
            Error::new(Self::name().as_str(), text, err)
        })
    }

    /// Decode this type from an iterator of [`HeaderValue`]s.
    fn decode<'i, I>(values: &mut I) -> Result<Self, Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        Self::decode_with_config(values, DecodeConfig::global())
    }

    /// Decode this type from an iterator of [`HeaderValue`]s.
    fn decode_with_config<'i, I>(values: &mut I, config: &DecodeConfig) -> Result<Self, Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let mut text = String::new();
        let mut count = 0usize;
        for value in values {
            if count > 0 {
                text.push_str(Self::SEPARATOR);
            }
            count += 1;
            match std::str::from_utf8(value.as_bytes()) {
                Ok(s) => text.push_str(s),
                Err(err) => {
                    let offset = text.len() + err.valid_up_to();
                    text.push_str(&String::from_utf8_lossy(value.as_bytes()));
                    let err = ValueError::Syntax(ParseError::invalid_character('\u{FFFD}', offset));
                    tracing::debug!(
                        header = %Self::name(),
                        "failed to decode non utf-8 header value: {err}"
                    );
                    return Err(Error::new(Self::name().as_str(), text, err));
                }
            }
        }
        if count == 0 {
            let err = ValueError::Syntax(ParseError::missing_value(0));
            tracing::debug!(header = %Self::name(), "no header value to decode");
            return Err(Error::new(Self::name().as_str(), text, err));
        }
        Self::decode_str_with_config(&text, config)
    }
}

/// A [`TypedHeader`] that can be encoded into a field value.
///
/// The wire text is the [`Display`](std::fmt::Display) form of the value.
pub trait HeaderEncode: TypedHeader + std::fmt::Display {
    /// Encode this type to a [`HeaderValue`], and add it to a container
    /// which has [`HeaderValue`] type as each element.
    ///
    /// Values built through validating constructors always encode.
    /// Should it fail anyway, nothing is added and the failure is logged.
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match self.encode_to_value() {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(err) => {
                tracing::debug!(
                    header = %Self::name(),
                    "failed to encode header value: {err}"
                );
            }
        }
    }

    /// Encode this header to a single [`HeaderValue`].
    fn encode_to_value(&self) -> Result<HeaderValue, Error> {
        let text = self.to_string();
        encode_text(Self::name().as_str(), text)
    }
}

/// Turn wire text into a [`HeaderValue`], reporting the first
/// byte that is not allowed in a field value.
pub(crate) fn encode_text(name: &str, text: String) -> Result<HeaderValue, Error> {
    if let Some((offset, c)) = text
        .char_indices()
        .find(|(_, c)| c.is_ascii_control() && *c != '\t')
    {
        let err = ValueError::Syntax(ParseError::invalid_character(c, offset));
        return Err(Error::new(name, text, err));
    }
    HeaderValue::from_str(&text).map_err(|_| {
        let err = ValueError::Syntax(ParseError::invalid_character('\u{FFFD}', 0));
        Error::new(name, text.clone(), err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_text() {
        assert_eq!(
            encode_text("x-test", "a\tb c".to_owned()).unwrap(),
            "a\tb c"
        );
        let err = encode_text("x-test", "ab\ncd".to_owned()).unwrap_err();
        assert_eq!(err.name(), "x-test");
        assert_eq!(err.parse_error(), Some(&ParseError::invalid_character('\n', 2)));
        let err = encode_text("x-test", "a\u{7f}".to_owned()).unwrap_err();
        assert_eq!(err.parse_error(), Some(&ParseError::invalid_character('\u{7f}', 1)));
    }
}
