use smol_str::SmolStr;
use std::fmt;

use super::{CharsetName, EncodedText, Quality};
use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, ParseError, RawParameter, is_ctl, is_token};

/// A parameter name: a token, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterName(SmolStr);

impl ParameterName {
    pub const Q: Self = Self(SmolStr::new_static("q"));
    pub const CHARSET: Self = Self(SmolStr::new_static("charset"));

    pub fn new(name: &str) -> Result<Self, ValueError> {
        let mut cursor = Cursor::new(name);
        cursor
            .read_token()
            .and_then(|token| cursor.finish().map(|()| token))
            .map(|token| Self(SmolStr::new(token.to_ascii_lowercase())))
            .map_err(|err| ValueError::invalid_identity("parameter name", name, err))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extended parameters (`name*`) carry RFC 8187 encoded text.
    #[must_use]
    pub fn is_extended(&self) -> bool {
        self.0.ends_with('*')
    }
}

impl fmt::Display for ParameterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parameter value, typed by the parameter contract:
///
/// - `q` is a [`Quality`] (in families that carry a weight);
/// - `charset` is a [`CharsetName`];
/// - names ending in `*` carry [`EncodedText`];
/// - anything else is opaque text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterValue {
    Text(SmolStr),
    Quality(Quality),
    Charset(CharsetName),
    Encoded(EncodedText),
}

impl ParameterValue {
    /// Text value, `None` for typed values.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Quality(_) => "quality",
            Self::Charset(_) => "charset",
            Self::Encoded(_) => "encoded text",
        }
    }
}

impl From<Quality> for ParameterValue {
    fn from(q: Quality) -> Self {
        Self::Quality(q)
    }
}

impl From<CharsetName> for ParameterValue {
    fn from(charset: CharsetName) -> Self {
        Self::Charset(charset)
    }
}

impl From<EncodedText> for ParameterValue {
    fn from(text: EncodedText) -> Self {
        Self::Encoded(text)
    }
}

impl From<&str> for ParameterValue {
    fn from(text: &str) -> Self {
        Self::Text(SmolStr::new(text))
    }
}

/// Write `value` as a token if it is one, as a quoted-string otherwise.
pub(crate) fn write_token_or_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    if is_token(value) {
        return f.write_str(value);
    }
    f.write_str("\"")?;
    for c in value.chars() {
        if c == '"' || c == '\\' {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    f.write_str("\"")
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write_token_or_quoted(f, text),
            Self::Quality(q) => q.fmt(f),
            Self::Charset(charset) => charset.fmt(f),
            Self::Encoded(text) => text.fmt(f),
        }
    }
}

/// How a value family types its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParameterContract {
    /// Whether `q` is the weight of the value (and thus a [`Quality`]).
    weight: bool,
    /// Whether `q` is kept free for a weight wrapped around the value.
    q_reserved: bool,
}

impl ParameterContract {
    pub(crate) const PLAIN: Self = Self {
        weight: false,
        q_reserved: false,
    };
    pub(crate) const WEIGHTED: Self = Self {
        weight: true,
        q_reserved: false,
    };
    /// Media types, where `q` is left to the weight of an `Accept` range.
    pub(crate) const MEDIA_TYPE: Self = Self {
        weight: false,
        q_reserved: true,
    };

    fn reserved_q_error() -> ValueError {
        ValueError::WrongType {
            expected: "media type parameter",
            actual: "weight",
        }
    }

    fn type_value(
        self,
        name: &ParameterName,
        raw: &str,
        config: &DecodeConfig,
    ) -> Result<ParameterValue, ValueError> {
        let typed = if self.q_reserved && *name == ParameterName::Q {
            Err(Self::reserved_q_error())
        } else if self.weight && *name == ParameterName::Q {
            raw.parse().map(ParameterValue::Quality)
        } else if *name == ParameterName::CHARSET {
            CharsetName::resolve(raw, config).and_then(|charset| match charset {
                CharsetName::Wildcard => Err(ValueError::WildcardNotAllowed {
                    context: "charset parameter",
                }),
                charset => Ok(ParameterValue::Charset(charset)),
            })
        } else if name.is_extended() {
            EncodedText::parse_with_config(raw, config).map(ParameterValue::Encoded)
        } else {
            check_text(raw)
                .map(|()| ParameterValue::Text(SmolStr::new(raw)))
                .map_err(ValueError::from)
        };
        typed.map_err(|err| ValueError::invalid_parameter(name.as_str(), raw, err))
    }

    fn check_value(self, name: &ParameterName, value: &ParameterValue) -> Result<(), ValueError> {
        if self.q_reserved && *name == ParameterName::Q {
            return Err(ValueError::invalid_parameter(
                name.as_str(),
                &value.to_string(),
                Self::reserved_q_error(),
            ));
        }
        let expected = if self.weight && *name == ParameterName::Q {
            "quality"
        } else if *name == ParameterName::CHARSET {
            "charset"
        } else if name.is_extended() {
            "encoded text"
        } else {
            "text"
        };
        let actual = value.kind();
        if expected != actual {
            return Err(ValueError::invalid_parameter(
                name.as_str(),
                &value.to_string(),
                ValueError::WrongType { expected, actual },
            ));
        }
        match value {
            ParameterValue::Text(text) => check_text(text)
                .map_err(|err| ValueError::invalid_parameter(name.as_str(), text, err)),
            ParameterValue::Charset(CharsetName::Wildcard) => Err(ValueError::invalid_parameter(
                name.as_str(),
                "*",
                ValueError::WildcardNotAllowed {
                    context: "charset parameter",
                },
            )),
            _ => Ok(()),
        }
    }
}

/// Text values must be representable as a token or quoted-string.
fn check_text(text: &str) -> Result<(), ParseError> {
    match text
        .char_indices()
        .find(|(_, c)| *c != '\t' && c.is_ascii() && is_ctl(*c as u8))
    {
        Some((offset, c)) => Err(ParseError::invalid_character(c, offset)),
        None => Ok(()),
    }
}

/// Ordered parameters of a header value.
///
/// Names are case-insensitive (stored lower-cased), the order in which
/// they were parsed or added is kept. Setting an existing name replaces
/// its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parameters(Vec<(ParameterName, ParameterValue)>);

impl Parameters {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn from_raw(
        raw: Vec<RawParameter<'_>>,
        contract: ParameterContract,
        config: &DecodeConfig,
    ) -> Result<Self, ValueError> {
        let mut parameters = Self::new();
        for parameter in raw {
            let name = ParameterName::new(parameter.name)?;
            let value = contract.type_value(&name, &parameter.value, config)?;
            parameters.insert(name, value);
        }
        Ok(parameters)
    }

    /// Check that every value has the type the contract demands,
    /// used when parameters are attached to a value programmatically.
    pub(crate) fn check(&self, contract: ParameterContract) -> Result<(), ValueError> {
        self.0
            .iter()
            .try_for_each(|(name, value)| contract.check_value(name, value))
    }

    fn insert(&mut self, name: ParameterName, value: ParameterValue) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name, value)),
        }
    }

    /// Add (or replace) a parameter.
    pub fn with(self, name: &str, value: impl Into<ParameterValue>) -> Result<Self, ValueError> {
        let name = ParameterName::new(name)?;
        let mut parameters = self;
        parameters.insert(name, value.into());
        Ok(parameters)
    }

    /// Add (or replace) a parameter from its wire text,
    /// typing it by name (`q`, `charset`, `name*`).
    pub fn with_raw(self, name: &str, raw: &str) -> Result<Self, ValueError> {
        let name = ParameterName::new(name)?;
        let value =
            ParameterContract::WEIGHTED.type_value(&name, raw, DecodeConfig::global())?;
        let mut parameters = self;
        parameters.insert(name, value);
        Ok(parameters)
    }

    /// Set the `q` weight, placed first when not yet present.
    pub(crate) fn with_quality(mut self, q: Quality) -> Self {
        match self.0.iter_mut().find(|(n, _)| *n == ParameterName::Q) {
            Some((_, v)) => *v = ParameterValue::Quality(q),
            None => self.0.insert(0, (ParameterName::Q, ParameterValue::Quality(q))),
        }
        self
    }

    /// Remove a parameter, if present.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.0.retain(|(n, _)| !n.as_str().eq_ignore_ascii_case(name));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ParameterName, &ParameterValue)> {
        self.0.iter().map(|(name, value)| (name, value))
    }

    /// Look up a parameter, ASCII case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0
            .iter()
            .find(|(n, _)| n.as_str().eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The `q` parameter, if present.
    #[must_use]
    pub fn quality(&self) -> Option<Quality> {
        match self.get("q") {
            Some(ParameterValue::Quality(q)) => Some(*q),
            _ => None,
        }
    }

    /// The `charset` parameter, if present.
    #[must_use]
    pub fn charset(&self) -> Option<&CharsetName> {
        match self.get("charset") {
            Some(ParameterValue::Charset(charset)) => Some(charset),
            _ => None,
        }
    }

    /// Parameters present on both sides are equal,
    /// parameters present on one side only are ignored.
    #[must_use]
    pub fn eq_present(&self, other: &Self) -> bool {
        self.0.iter().all(|(name, value)| {
            other
                .get(name.as_str())
                .is_none_or(|other_value| other_value == value)
        })
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a (ParameterName, ParameterValue);
    type IntoIter = std::slice::Iter<'a, (ParameterName, ParameterValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.0 {
            write!(f, "; {name}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_parameters;
    use crate::specifier::Charset;

    fn parse(text: &str, contract: ParameterContract) -> Result<Parameters, ValueError> {
        let mut cursor = Cursor::new(text);
        let raw = parse_parameters(&mut cursor)?;
        Parameters::from_raw(raw, contract, DecodeConfig::global())
    }

    #[test]
    fn test_typing_by_contract() {
        let params = parse(
            "; Q=0.5; charset=utf-8; title*=UTF-8''a%20b; foo=\"bar baz\"",
            ParameterContract::WEIGHTED,
        )
        .unwrap();
        assert_eq!(params.len(), 4);
        assert_eq!(params.quality(), Quality::new(500));
        assert_eq!(
            params.charset(),
            Some(&CharsetName::supported(Charset::UTF_8))
        );
        assert_eq!(
            params.get("TITLE*"),
            Some(&ParameterValue::Encoded(EncodedText::utf8("a b")))
        );
        assert_eq!(params.get("foo").and_then(ParameterValue::as_text), Some("bar baz"));
        assert_eq!(
            params.to_string(),
            "; q=0.5; charset=utf-8; title*=UTF-8''a%20b; foo=\"bar baz\""
        );
    }

    #[test]
    fn test_q_is_text_without_weight() {
        let params = parse("; q=abc", ParameterContract::PLAIN).unwrap();
        assert_eq!(params.get("q").and_then(ParameterValue::as_text), Some("abc"));
        assert_eq!(params.quality(), None);
    }

    #[test]
    fn test_raw_text_rejects_control_characters() {
        assert_eq!(
            Parameters::new().with_raw("level", "a\u{1}"),
            Err(ValueError::invalid_parameter(
                "level",
                "a\u{1}",
                ParseError::invalid_character('\u{1}', 1)
            ))
        );
        let params = Parameters::new().with_raw("Level", "a b").unwrap();
        assert_eq!(params.get("level").and_then(ParameterValue::as_text), Some("a b"));
    }

    #[test]
    fn test_q_is_reserved_for_media_types() {
        let err = parse("; level=1; q=abc", ParameterContract::MEDIA_TYPE).unwrap_err();
        assert_eq!(
            err,
            ValueError::invalid_parameter(
                "q",
                "abc",
                ValueError::WrongType {
                    expected: "media type parameter",
                    actual: "weight",
                }
            )
        );

        let params = Parameters::new().with("Q", "abc").unwrap();
        assert!(matches!(
            params.check(ParameterContract::MEDIA_TYPE),
            Err(ValueError::InvalidParameter { name, .. }) if name == "q"
        ));
        params.check(ParameterContract::PLAIN).unwrap();
    }

    #[test]
    fn test_invalid_quality_names_parameter() {
        let err = parse("; q=ABC", ParameterContract::WEIGHTED).unwrap_err();
        match err {
            ValueError::InvalidParameter {
                name,
                value,
                source,
            } => {
                assert_eq!(name, "q");
                assert_eq!(value, "ABC");
                assert!(matches!(
                    *source,
                    ValueError::Syntax(ParseError::InvalidNumber { .. })
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_replaces_in_place() {
        let params = parse("; a=1; b=2; A=3", ParameterContract::PLAIN).unwrap();
        assert_eq!(params.to_string(), "; a=3; b=2");
    }

    #[test]
    fn test_with_and_without() {
        let params = Parameters::new()
            .with("Level", "1")
            .unwrap()
            .with("q", Quality::new(300).unwrap())
            .unwrap()
            .with_raw("charset", "latin1")
            .unwrap();
        assert_eq!(params.to_string(), "; level=1; q=0.3; charset=latin1");
        let params = params.without("Q");
        assert_eq!(params.to_string(), "; level=1; charset=latin1");
        assert!(Parameters::new().with("bad name", "x").is_err());
    }

    #[test]
    fn test_check_contract() {
        let params = Parameters::new().with("q", "high").unwrap();
        assert!(matches!(
            params.check(ParameterContract::WEIGHTED),
            Err(ValueError::InvalidParameter { .. })
        ));
        params.check(ParameterContract::PLAIN).unwrap();

        let params = Parameters::new().with("a", "line\nbreak").unwrap();
        assert!(params.check(ParameterContract::PLAIN).is_err());
    }

    #[test]
    fn test_eq_present() {
        let a = parse("; a=1; b=2", ParameterContract::PLAIN).unwrap();
        let b = parse("; b=2; c=3", ParameterContract::PLAIN).unwrap();
        let c = parse("; b=3", ParameterContract::PLAIN).unwrap();
        assert!(a.eq_present(&b));
        assert!(b.eq_present(&a));
        assert!(!a.eq_present(&c));
        assert_ne!(a, b);
    }

    #[test]
    fn test_quoting() {
        let params = Parameters::new()
            .with("a", "")
            .unwrap()
            .with("b", "x\"y\\z")
            .unwrap();
        assert_eq!(params.to_string(), "; a=\"\"; b=\"x\\\"y\\\\z\"");
    }
}
