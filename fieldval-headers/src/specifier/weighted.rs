use std::{fmt, str::FromStr};

use super::parameters::ParameterContract;
use super::{CharsetName, CodingRange, LanguageRange, MediaType, Parameters, Quality};
use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, RawParameter, parse_parameters};

/// A value that can carry a weight (`; q=...`) in a negotiation header.
pub trait WeightedValue: Sized + Clone + PartialEq + fmt::Display {
    /// Parse the value, returning the raw parameters that belong to the weight.
    fn parse_weighted<'a>(
        cursor: &mut Cursor<'a>,
    ) -> Result<(Self, Vec<RawParameter<'a>>), ValueError>;

    fn is_wildcard(&self) -> bool;

    /// Does this (possibly wildcard) value accept the concrete `other`?
    fn matches(&self, other: &Self) -> Result<bool, ValueError>;

    fn eq_ignore_parameters(&self, other: &Self) -> bool {
        self == other
    }
}

/// A value with its weight and extension parameters,
/// e.g. `gzip; q=0.5` or `en; q=0.8`.
///
/// The weight is not materialized when absent, use
/// [`Weighted::quality_or_default`] when ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weighted<T> {
    value: T,
    parameters: Parameters,
}

/// An `Accept` element: a media range with its weight.
pub type AcceptValue = Weighted<MediaType>;
/// An `Accept-Charset` element.
pub type AcceptCharsetValue = Weighted<CharsetName>;
/// An `Accept-Encoding` element.
pub type AcceptEncodingValue = Weighted<CodingRange>;
/// An `Accept-Language` element.
pub type AcceptLanguageValue = Weighted<LanguageRange>;

impl<T: WeightedValue> Weighted<T> {
    /// A value without weight.
    pub fn new(value: T) -> Self {
        Self {
            value,
            parameters: Parameters::new(),
        }
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ValueError> {
        let (value, raw) = T::parse_weighted(cursor)?;
        let parameters = Parameters::from_raw(raw, ParameterContract::WEIGHTED, cursor.config())?;
        Ok(Self { value, parameters })
    }

    /// Parse with an explicit [`DecodeConfig`].
    pub fn parse_with_config(text: &str, config: &DecodeConfig) -> Result<Self, ValueError> {
        let mut cursor = Cursor::with_config(text, config);
        cursor.skip_whitespace();
        let value = Self::parse(&mut cursor)?;
        cursor.finish()?;
        Ok(value)
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The explicit weight, if any.
    pub fn quality(&self) -> Option<Quality> {
        self.parameters.quality()
    }

    /// The weight used for ordering: an absent weight counts as `1`.
    pub fn quality_or_default(&self) -> Quality {
        self.quality().unwrap_or_default()
    }

    #[must_use]
    pub fn with_quality(self, q: Quality) -> Self {
        Self {
            parameters: self.parameters.with_quality(q),
            ..self
        }
    }

    /// Replace the weight parameters, `q` must be a [`Quality`].
    pub fn with_parameters(self, parameters: Parameters) -> Result<Self, ValueError> {
        parameters.check(ParameterContract::WEIGHTED)?;
        Ok(Self { parameters, ..self })
    }

    pub fn is_wildcard(&self) -> bool {
        self.value.is_wildcard()
    }

    /// See [`WeightedValue::matches`], the weight plays no role.
    pub fn matches(&self, other: &T) -> Result<bool, ValueError> {
        self.value.matches(other)
    }

    /// Compare the values only, ignoring weight and all parameters.
    pub fn eq_ignore_parameters(&self, other: &Self) -> bool {
        self.value.eq_ignore_parameters(&other.value)
    }

    /// Compare the values, and the parameters present on both sides.
    pub fn eq_present_parameters(&self, other: &Self) -> bool {
        self.eq_ignore_parameters(other) && self.parameters.eq_present(&other.parameters)
    }
}

impl<T: WeightedValue> From<T> for Weighted<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: WeightedValue> FromStr for Weighted<T> {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_config(s, DecodeConfig::global())
    }
}

impl<T: fmt::Display> fmt::Display for Weighted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.parameters)
    }
}

/// Order values by descending weight, keeping the declared
/// order among values of equal weight.
pub fn sort_by_quality<'a, T, I>(values: I) -> Vec<&'a Weighted<T>>
where
    T: WeightedValue + 'a,
    I: IntoIterator<Item = &'a Weighted<T>>,
{
    let mut sorted: Vec<_> = values.into_iter().collect();
    sorted.sort_by_key(|value| std::cmp::Reverse(value.quality_or_default()));
    sorted
}

impl WeightedValue for CharsetName {
    fn parse_weighted<'a>(
        cursor: &mut Cursor<'a>,
    ) -> Result<(Self, Vec<RawParameter<'a>>), ValueError> {
        let value = Self::parse(cursor)?;
        Ok((value, parse_parameters(cursor)?))
    }

    fn is_wildcard(&self) -> bool {
        Self::is_wildcard(self)
    }

    fn matches(&self, other: &Self) -> Result<bool, ValueError> {
        Self::matches(self, other)
    }
}

impl WeightedValue for LanguageRange {
    fn parse_weighted<'a>(
        cursor: &mut Cursor<'a>,
    ) -> Result<(Self, Vec<RawParameter<'a>>), ValueError> {
        let value = Self::parse(cursor)?;
        Ok((value, parse_parameters(cursor)?))
    }

    fn is_wildcard(&self) -> bool {
        Self::is_wildcard(self)
    }

    fn matches(&self, other: &Self) -> Result<bool, ValueError> {
        Self::matches(self, other)
    }
}

impl WeightedValue for CodingRange {
    fn parse_weighted<'a>(
        cursor: &mut Cursor<'a>,
    ) -> Result<(Self, Vec<RawParameter<'a>>), ValueError> {
        let value = Self::parse(cursor)?;
        Ok((value, parse_parameters(cursor)?))
    }

    fn is_wildcard(&self) -> bool {
        Self::is_wildcard(self)
    }

    fn matches(&self, other: &Self) -> Result<bool, ValueError> {
        Self::matches(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::ParseError;
    use crate::specifier::ContentCoding;

    #[test]
    fn test_accept_encoding_value() {
        let value: AcceptEncodingValue = "gzip;q=0.5".parse().unwrap();
        assert_eq!(value.value(), &CodingRange::Coding(ContentCoding::Gzip));
        assert_eq!(value.quality(), Quality::new(500));
        assert_eq!(value.to_string(), "gzip; q=0.5");
    }

    #[test]
    fn test_wildcard_with_invalid_quality() {
        let err = "*; q=ABC".parse::<AcceptEncodingValue>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("\"q\""), "{message}");
        assert!(message.contains("\"ABC\""), "{message}");
        assert!(matches!(
            err.parse_error(),
            Some(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_quality_bounds() {
        for input in ["en; q=0", "en; q=1", "en; q=1.000"] {
            input.parse::<AcceptLanguageValue>().unwrap();
        }
        for input in ["en; q=-0.1", "en; q=1.01"] {
            assert!(matches!(
                input.parse::<AcceptLanguageValue>(),
                Err(ValueError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_accept_value_keeps_media_parameters_apart() {
        let value: AcceptValue = "text/html;level=1;q=0.7;foo=bar".parse().unwrap();
        assert_eq!(value.value().to_string(), "text/html; level=1");
        assert_eq!(value.parameters().to_string(), "; q=0.7; foo=bar");
        assert_eq!(value.to_string(), "text/html; level=1; q=0.7; foo=bar");
    }

    #[test]
    fn test_with_quality() {
        let value = AcceptLanguageValue::new("en".parse().unwrap())
            .with_quality(Quality::new(300).unwrap());
        assert_eq!(value.to_string(), "en; q=0.3");
        assert_eq!(value.to_string().parse::<AcceptLanguageValue>().unwrap(), value);
        assert_eq!(value.quality_or_default(), Quality::new(300).unwrap());
        assert_eq!(
            AcceptLanguageValue::new("de".parse().unwrap()).quality_or_default(),
            Quality::one()
        );
    }

    #[test]
    fn test_equality_modes() {
        let a: AcceptCharsetValue = "utf-8; q=0.5".parse().unwrap();
        let b: AcceptCharsetValue = "UTF8".parse().unwrap();
        let c: AcceptCharsetValue = "utf-8; q=0.4".parse().unwrap();
        assert_ne!(a, b);
        assert!(a.eq_ignore_parameters(&b));
        assert!(a.eq_present_parameters(&b));
        assert!(!a.eq_present_parameters(&c));
    }

    #[test]
    fn test_sort_by_quality_is_stable() {
        let values: Vec<AcceptLanguageValue> = ["da", "en-gb;q=0.8", "en;q=0.7", "fr", "*;q=0.1"]
            .into_iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let sorted: Vec<_> = sort_by_quality(&values)
            .into_iter()
            .map(|v| v.value().to_string())
            .collect();
        assert_eq!(sorted, ["da", "fr", "en-gb", "en", "*"]);
    }
}
