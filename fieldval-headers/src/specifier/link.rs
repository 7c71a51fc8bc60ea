use iri_string::types::{UriReferenceStr, UriReferenceString, UriStr, UriString};
use smol_str::format_smolstr;
use std::{fmt, str::FromStr};

use fieldval_utils::macros::enums::enum_builder;

use super::Parameters;
use super::parameters::{ParameterContract, ParameterValue, write_token_or_quoted};
use crate::ValueError;
use crate::grammar::{Cursor, ParseError, is_ctl, parse_parameters};

/// Validate a URI reference (absolute or relative).
pub(crate) fn uri_reference(value: &str) -> Result<UriReferenceString, ValueError> {
    UriReferenceStr::new(value)
        .map(ToOwned::to_owned)
        .map_err(|err| ValueError::InvalidUri {
            value: value.into(),
            reason: format_smolstr!("{err}"),
        })
}

/// Read a URI reference spanning up to the next whitespace.
pub(crate) fn read_uri_reference(cursor: &mut Cursor<'_>) -> Result<UriReferenceString, ValueError> {
    let raw = cursor.read_while(|b| b > b' ' && b != 0x7f);
    if raw.is_empty() {
        return Err(cursor.unexpected().into());
    }
    uri_reference(raw)
}

/// Validate an absolute URI.
pub(crate) fn absolute_uri(value: &str) -> Result<UriString, ValueError> {
    UriStr::new(value)
        .map(ToOwned::to_owned)
        .map_err(|err| ValueError::InvalidUri {
            value: value.into(),
            reason: format_smolstr!("{err}"),
        })
}

enum_builder! {
    /// A registered link relation type.
    ///
    /// See the [IANA registry](https://www.iana.org/assignments/link-relations/link-relations.xhtml).
    @Token
    pub enum RelationName {
        Next => "next",
        Prev => "prev" | "previous",
        First => "first",
        Last => "last",
        Alternate => "alternate",
        Canonical => "canonical",
        Preload => "preload",
        Preconnect => "preconnect",
        Prefetch => "prefetch",
        Stylesheet => "stylesheet",
        Icon => "icon",
        Author => "author",
        License => "license",
        Help => "help",
        Search => "search",
        Edit => "edit",
        Up => "up",
        Related => "related",
        Start => "start",
        Index => "index",
        Describedby => "describedby",
        Nofollow => "nofollow",
    }
}

impl FromStr for RelationName {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        cursor
            .read_token()
            .and_then(|token| cursor.finish().map(|()| Self::from_token(token)))
            .map_err(|err| ValueError::invalid_identity("link relation", s, err))
    }
}

/// The relation type of a link.
///
/// ```text
/// relation-type  = reg-rel-type / ext-rel-type
/// reg-rel-type   = LOALPHA *( LOALPHA / DIGIT / "." / "-" )
/// ext-rel-type   = URI
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkRelation {
    /// `self`, the context of the link is the target itself.
    SelfRel,
    Named(RelationName),
    /// An extension relation type, identified by an absolute URI.
    Url(UriString),
}

impl LinkRelation {
    /// Values containing a `:` are extension relation types.
    pub fn new(value: &str) -> Result<Self, ValueError> {
        if value.contains(':') {
            return absolute_uri(value).map(Self::Url);
        }
        if value.eq_ignore_ascii_case("self") {
            return Ok(Self::SelfRel);
        }
        value.parse().map(Self::Named)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::SelfRel => "self",
            Self::Named(name) => name.as_str(),
            Self::Url(url) => url.as_str(),
        }
    }
}

impl From<RelationName> for LinkRelation {
    fn from(name: RelationName) -> Self {
        Self::Named(name)
    }
}

impl FromStr for LinkRelation {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for LinkRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single link of a `Link` header.
///
/// The `rel` parameter is lifted out of the parameters into
/// [`LinkValue::relations`], all other parameters are kept as-is.
///
/// # ABNF
///
/// ```text
/// link-value = "<" URI-Reference ">" *( OWS ";" OWS link-param )
/// link-param = token BWS [ "=" BWS ( token / quoted-string ) ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkValue {
    target: UriReferenceString,
    relations: Vec<LinkRelation>,
    parameters: Parameters,
}

impl LinkValue {
    /// Create a link to `target`, without relations or parameters.
    pub fn new(target: &str) -> Result<Self, ValueError> {
        Ok(Self {
            target: uri_reference(target)?,
            relations: Vec::new(),
            parameters: Parameters::new(),
        })
    }

    #[must_use]
    pub fn with_relation(mut self, relation: impl Into<LinkRelation>) -> Self {
        let relation = relation.into();
        if !self.relations.contains(&relation) {
            self.relations.push(relation);
        }
        self
    }

    /// Replace the parameters. A `rel` parameter replaces the relations.
    pub fn with_parameters(self, parameters: Parameters) -> Result<Self, ValueError> {
        parameters.check(ParameterContract::PLAIN)?;
        let (relations, parameters) = split_relations(parameters)?;
        Ok(Self {
            relations: relations.unwrap_or(self.relations),
            parameters,
            ..self
        })
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ValueError> {
        cursor.expect('<')?;
        let raw = cursor.read_while(|b| {
            !is_ctl(b) && !matches!(b, b'>' | b'<' | b' ' | b'"' | b'\\' | b'\t')
        });
        cursor.expect('>')?;
        let target = uri_reference(raw)?;
        let raw_parameters = parse_parameters(cursor)?;
        let parameters =
            Parameters::from_raw(raw_parameters, ParameterContract::PLAIN, cursor.config())?;
        let (relations, parameters) = split_relations(parameters)?;
        Ok(Self {
            target,
            relations: relations.unwrap_or_default(),
            parameters,
        })
    }

    #[must_use]
    pub fn target(&self) -> &UriReferenceStr {
        &self.target
    }

    /// The relation types of the `rel` parameter, in declared order.
    #[must_use]
    pub fn relations(&self) -> &[LinkRelation] {
        &self.relations
    }

    #[must_use]
    pub fn has_relation(&self, relation: &LinkRelation) -> bool {
        self.relations.contains(relation)
    }

    /// The parameters other than `rel`.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The `title` parameter, if present as plain text.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.parameters.get("title").and_then(ParameterValue::as_text)
    }
}

fn split_relations(
    parameters: Parameters,
) -> Result<(Option<Vec<LinkRelation>>, Parameters), ValueError> {
    let Some(value) = parameters.get("rel") else {
        return Ok((None, parameters));
    };
    let Some(text) = value.as_text() else {
        return Err(ValueError::invalid_parameter(
            "rel",
            &value.to_string(),
            ValueError::WrongType {
                expected: "text",
                actual: "typed value",
            },
        ));
    };
    let mut relations: Vec<LinkRelation> = Vec::new();
    for name in text.split_ascii_whitespace() {
        let relation =
            LinkRelation::new(name).map_err(|err| ValueError::invalid_parameter("rel", text, err))?;
        if !relations.contains(&relation) {
            relations.push(relation);
        }
    }
    if relations.is_empty() {
        return Err(ValueError::invalid_parameter(
            "rel",
            text,
            ParseError::missing_value(0),
        ));
    }
    Ok((Some(relations), parameters.without("rel")))
}

impl FromStr for LinkValue {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cursor = Cursor::new(s);
        cursor.skip_whitespace();
        let link = Self::parse(&mut cursor)?;
        cursor.finish()?;
        Ok(link)
    }
}

impl fmt::Display for LinkValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.target)?;
        if !self.relations.is_empty() {
            let rel = self
                .relations
                .iter()
                .map(LinkRelation::as_str)
                .collect::<Vec<_>>()
                .join(" ");
            f.write_str("; rel=")?;
            write_token_or_quoted(f, &rel)?;
        }
        self.parameters.fmt(f)
    }
}
