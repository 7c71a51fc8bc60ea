use smol_str::SmolStr;
use std::{fmt, str::FromStr};

use super::parameters::ParameterContract;
use super::{CharsetName, Parameters, WeightedValue};
use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, ParseError, RawParameter, parse_parameters};

/// A media type (or media range), e.g. `text/html; charset=utf-8`.
///
/// Type and subtype are case-insensitive and stored lower-cased.
/// `*/*` and `type/*` are the wildcard forms used by `Accept`;
/// `*/subtype` is invalid.
///
/// # ABNF
///
/// ```text
/// media-type = type "/" subtype parameters
/// type       = token
/// subtype    = token
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    mtype: SmolStr,
    subtype: SmolStr,
    parameters: Parameters,
}

macro_rules! media_type_consts {
    ($($(#[$m:meta])* $name:ident => ($mtype:literal, $subtype:literal)),+ $(,)?) => {
        impl MediaType {
            $(
                $(#[$m])*
                pub const $name: Self = Self::from_static($mtype, $subtype);
            )+
        }
    };
}

media_type_consts! {
    /// `*/*`
    STAR_STAR => ("*", "*"),
    TEXT_STAR => ("text", "*"),
    TEXT_PLAIN => ("text", "plain"),
    TEXT_HTML => ("text", "html"),
    TEXT_CSS => ("text", "css"),
    TEXT_EVENT_STREAM => ("text", "event-stream"),
    APPLICATION_JSON => ("application", "json"),
    APPLICATION_OCTET_STREAM => ("application", "octet-stream"),
    APPLICATION_WWW_FORM_URLENCODED => ("application", "x-www-form-urlencoded"),
    IMAGE_STAR => ("image", "*"),
    IMAGE_PNG => ("image", "png"),
    MULTIPART_FORM_DATA => ("multipart", "form-data"),
}

impl MediaType {
    const fn from_static(mtype: &'static str, subtype: &'static str) -> Self {
        Self {
            mtype: SmolStr::new_static(mtype),
            subtype: SmolStr::new_static(subtype),
            parameters: Parameters::new(),
        }
    }

    /// Create a media type without parameters.
    pub fn new(mtype: &str, subtype: &str) -> Result<Self, ValueError> {
        let text = format!("{mtype}/{subtype}");
        let mut cursor = Cursor::new(&text);
        let (mtype, subtype) = parse_essence(&mut cursor)
            .and_then(|essence| cursor.finish().map(|()| essence))
            .map_err(|err| ValueError::invalid_identity("media type", &text, err))?;
        Ok(Self {
            mtype,
            subtype,
            parameters: Parameters::new(),
        })
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ValueError> {
        let (mtype, subtype) = parse_essence(cursor)?;
        let raw = parse_parameters(cursor)?;
        let parameters =
            Parameters::from_raw(raw, ParameterContract::MEDIA_TYPE, cursor.config())?;
        Ok(Self {
            mtype,
            subtype,
            parameters,
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
    pub fn type_(&self) -> &str {
        &self.mtype
    }

    #[must_use]
    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The `charset` parameter, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&CharsetName> {
        self.parameters.charset()
    }

    /// Replace the parameters, checking them against the media type contract.
    pub fn with_parameters(self, parameters: Parameters) -> Result<Self, ValueError> {
        parameters.check(ParameterContract::MEDIA_TYPE)?;
        Ok(Self { parameters, ..self })
    }

    /// `true` for `*/*` and `type/*`.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.subtype == "*"
    }

    /// Does this media range accept the concrete media type `other`?
    ///
    /// Parameters of this range must all be present (and equal) in `other`.
    pub fn matches(&self, other: &Self) -> Result<bool, ValueError> {
        if other.is_wildcard() {
            return Err(ValueError::WildcardComparison);
        }
        let essence = match (self.mtype.as_str(), self.subtype.as_str()) {
            ("*", _) => true,
            (mtype, "*") => mtype == other.mtype,
            (mtype, subtype) => mtype == other.mtype && subtype == other.subtype,
        };
        Ok(essence
            && self
                .parameters
                .iter()
                .all(|(name, value)| other.parameters.get(name.as_str()) == Some(value)))
    }

    /// Compare type and subtype only.
    #[must_use]
    pub fn eq_ignore_parameters(&self, other: &Self) -> bool {
        self.mtype == other.mtype && self.subtype == other.subtype
    }

    /// Compare type and subtype, and the parameters present on both sides.
    #[must_use]
    pub fn eq_present_parameters(&self, other: &Self) -> bool {
        self.eq_ignore_parameters(other) && self.parameters.eq_present(&other.parameters)
    }
}

fn parse_essence(cursor: &mut Cursor<'_>) -> Result<(SmolStr, SmolStr), ParseError> {
    let mtype = cursor.read_token()?;
    cursor.expect('/')?;
    let subtype_offset = cursor.position();
    let subtype = cursor.read_token()?;
    if mtype == "*" && subtype != "*" {
        let c = subtype.chars().next().unwrap_or('*');
        return Err(ParseError::invalid_character(c, subtype_offset));
    }
    Ok((
        SmolStr::new(mtype.to_ascii_lowercase()),
        SmolStr::new(subtype.to_ascii_lowercase()),
    ))
}

impl WeightedValue for MediaType {
    /// The media type parameters end where the weight (`q`) begins,
    /// everything from `q` onward belongs to the weight.
    fn parse_weighted<'a>(
        cursor: &mut Cursor<'a>,
    ) -> Result<(Self, Vec<RawParameter<'a>>), ValueError> {
        let (mtype, subtype) = parse_essence(cursor)?;
        let mut raw = parse_parameters(cursor)?;
        let split = raw
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case("q"))
            .unwrap_or(raw.len());
        let weight = raw.split_off(split);
        let parameters =
            Parameters::from_raw(raw, ParameterContract::MEDIA_TYPE, cursor.config())?;
        Ok((
            Self {
                mtype,
                subtype,
                parameters,
            },
            weight,
        ))
    }

    fn is_wildcard(&self) -> bool {
        Self::is_wildcard(self)
    }

    fn matches(&self, other: &Self) -> Result<bool, ValueError> {
        Self::matches(self, other)
    }

    fn eq_ignore_parameters(&self, other: &Self) -> bool {
        Self::eq_ignore_parameters(self, other)
    }
}

impl FromStr for MediaType {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with_config(s, DecodeConfig::global())
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}{}", self.mtype, self.subtype, self.parameters)
    }
}
