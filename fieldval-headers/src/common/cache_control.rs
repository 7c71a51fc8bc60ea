use fieldval_utils::collections::NonEmptyVec;
use smol_str::SmolStr;
use std::fmt;
use std::time::Duration;

use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, ParseError, is_token, is_token_char, parse_token_list};
use crate::specifier::parameters::write_token_or_quoted;

/// The field names that limit a `no-cache` or `private` directive.
///
/// Always written as a quoted list, e.g. `private="set-cookie, x-id"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheControlFieldNames(NonEmptyVec<SmolStr>);

impl CacheControlFieldNames {
    /// Create a list of field names, each of which has to be a token.
    pub fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Self, ValueError> {
        let mut validated = Vec::new();
        for name in names {
            if !is_token(name) {
                let mut cursor = Cursor::new(name);
                cursor.read_while(is_token_char);
                return Err(cursor.unexpected().into());
            }
            validated.push(SmolStr::new(name));
        }
        NonEmptyVec::from_vec(validated)
            .map(Self)
            .ok_or(ValueError::EmptyList)
    }

    fn parse(text: &str, config: &DecodeConfig) -> Result<Self, ParseError> {
        let names = parse_token_list(text, config)?;
        Ok(Self(names.map(SmolStr::new)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(SmolStr::as_str)
    }

    /// Check if `name` is listed, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CacheControlFieldNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for (i, name) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(name)?;
        }
        f.write_str("\"")
    }
}

/// A `Cache-Control` directive without a dedicated variant.
///
/// Only created by parsing or [`CacheControlDirective::extension`], so the
/// name is always a lower-cased token that is no known directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheControlExtension {
    name: SmolStr,
    value: Option<SmolStr>,
}

impl CacheControlExtension {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unquoted value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// A single directive of a `Cache-Control` header.
///
/// Directive names are case-insensitive and written lower-cased.
/// Unknown directives are kept as [`CacheControlDirective::Extension`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheControlDirective {
    /// `no-cache`, optionally limited to a list of field names.
    NoCache(Option<CacheControlFieldNames>),
    NoStore,
    NoTransform,
    OnlyIfCached,
    MustRevalidate,
    MustUnderstand,
    Public,
    /// `private`, optionally limited to a list of field names.
    Private(Option<CacheControlFieldNames>),
    Immutable,
    ProxyRevalidate,
    MaxAge(u64),
    /// `max-stale`, without a value any staleness is accepted.
    MaxStale(Option<u64>),
    MinFresh(u64),
    SMaxAge(u64),
    StaleWhileRevalidate(u64),
    StaleIfError(u64),
    Extension(CacheControlExtension),
}

impl CacheControlDirective {
    /// Create an extension directive. Known directive names are rejected,
    /// use the matching variant for those.
    pub fn extension(name: &str, value: Option<&str>) -> Result<Self, ValueError> {
        let text = match value {
            Some(value) => format!("{name}={value}"),
            None => name.to_owned(),
        };
        let mut cursor = Cursor::new(&text);
        let directive = Self::parse(&mut cursor)?;
        cursor.finish()?;
        match directive {
            directive @ Self::Extension(_) => Ok(directive),
            _ => Err(ValueError::WrongType {
                expected: "extension directive",
                actual: "known directive",
            }),
        }
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ValueError> {
        let name = cursor.read_token()?;
        let value = if cursor.peek() == Some('=') {
            let eq_offset = cursor.position();
            cursor.advance();
            let value_offset = cursor.position();
            let text = match cursor.peek() {
                Some('"') => SmolStr::new(cursor.read_quoted_string()?),
                None | Some(',') => {
                    return Err(ParseError::MissingParameterValue {
                        name: SmolStr::new(name),
                        offset: value_offset,
                    }
                    .into());
                }
                Some(_) => SmolStr::new(cursor.read_token()?),
            };
            Some((text, eq_offset))
        } else {
            None
        };

        let end = cursor.position();
        let config = cursor.config();
        let lower = name.to_ascii_lowercase();
        let text = value.as_ref().map(|(text, _)| text.clone());
        let field_names = || {
            text.as_deref()
                .map(|text| {
                    CacheControlFieldNames::parse(text, config)
                        .map_err(|err| ValueError::invalid_parameter(&lower, text, err))
                })
                .transpose()
        };
        let flag = |directive: Self| match &value {
            None => Ok(directive),
            Some((text, eq_offset)) => Err(ValueError::invalid_parameter(
                &lower,
                text,
                ParseError::invalid_character('=', *eq_offset),
            )),
        };
        let seconds = || match &value {
            None => Err(ValueError::from(ParseError::MissingParameterValue {
                name: SmolStr::new(&lower),
                offset: end,
            })),
            Some((text, _)) => parse_seconds(&lower, text),
        };

        match lower.as_str() {
            "no-cache" => field_names().map(Self::NoCache),
            "no-store" => flag(Self::NoStore),
            "no-transform" => flag(Self::NoTransform),
            "only-if-cached" => flag(Self::OnlyIfCached),
            "must-revalidate" => flag(Self::MustRevalidate),
            "must-understand" => flag(Self::MustUnderstand),
            "public" => flag(Self::Public),
            "private" => field_names().map(Self::Private),
            "immutable" => flag(Self::Immutable),
            "proxy-revalidate" => flag(Self::ProxyRevalidate),
            "max-age" => seconds().map(Self::MaxAge),
            "max-stale" => match &text {
                None => Ok(Self::MaxStale(None)),
                Some(text) => parse_seconds(&lower, text).map(|n| Self::MaxStale(Some(n))),
            },
            "min-fresh" => seconds().map(Self::MinFresh),
            "s-maxage" => seconds().map(Self::SMaxAge),
            "stale-while-revalidate" => seconds().map(Self::StaleWhileRevalidate),
            "stale-if-error" => seconds().map(Self::StaleIfError),
            _ => Ok(Self::Extension(CacheControlExtension {
                name: SmolStr::new(&lower),
                value: text,
            })),
        }
    }

    /// The lower-cased directive name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::NoCache(_) => "no-cache",
            Self::NoStore => "no-store",
            Self::NoTransform => "no-transform",
            Self::OnlyIfCached => "only-if-cached",
            Self::MustRevalidate => "must-revalidate",
            Self::MustUnderstand => "must-understand",
            Self::Public => "public",
            Self::Private(_) => "private",
            Self::Immutable => "immutable",
            Self::ProxyRevalidate => "proxy-revalidate",
            Self::MaxAge(_) => "max-age",
            Self::MaxStale(_) => "max-stale",
            Self::MinFresh(_) => "min-fresh",
            Self::SMaxAge(_) => "s-maxage",
            Self::StaleWhileRevalidate(_) => "stale-while-revalidate",
            Self::StaleIfError(_) => "stale-if-error",
            Self::Extension(extension) => extension.name(),
        }
    }

    fn same_kind(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

fn parse_seconds(name: &str, text: &str) -> Result<u64, ValueError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValueError::invalid_parameter(
            name,
            text,
            ParseError::invalid_number(text, "expected delta-seconds"),
        ));
    }
    text.parse()
        .map_err(|err| ValueError::invalid_parameter(name, text, ParseError::invalid_number(text, err)))
}

impl fmt::Display for CacheControlDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Self::MaxAge(n)
            | Self::MaxStale(Some(n))
            | Self::MinFresh(n)
            | Self::SMaxAge(n)
            | Self::StaleWhileRevalidate(n)
            | Self::StaleIfError(n) => write!(f, "={n}"),
            Self::NoCache(Some(fields)) | Self::Private(Some(fields)) => write!(f, "={fields}"),
            Self::Extension(CacheControlExtension {
                value: Some(value), ..
            }) => {
                f.write_str("=")?;
                write_token_or_quoted(f, value)
            }
            _ => Ok(()),
        }
    }
}

derive_non_empty_list_header! {
    #[header(name = ::http::header::CACHE_CONTROL, sep = Comma, parse = CacheControlDirective::parse)]
    /// `Cache-Control` header, defined in [RFC9111](https://www.rfc-editor.org/rfc/rfc9111#section-5.2)
    /// with extensions in [RFC8246](https://www.rfc-editor.org/rfc/rfc8246)
    /// and [RFC5861](https://www.rfc-editor.org/rfc/rfc5861)
    ///
    /// The `Cache-Control` header field is used to specify directives for
    /// caches along the request/response chain.  Such cache directives are
    /// unidirectional in that the presence of a directive in a request does
    /// not imply that the same directive is to be given in the response.
    ///
    /// ## ABNF
    ///
    /// ```text
    /// Cache-Control   = 1#cache-directive
    /// cache-directive = token [ "=" ( token / quoted-string ) ]
    /// ```
    ///
    /// ## Example values
    ///
    /// * `no-cache`
    /// * `private, community="UCI"`
    /// * `max-age=30`
    ///
    /// # Example
    ///
    /// ```
    /// use fieldval_headers::{CacheControl, CacheControlDirective};
    ///
    /// let cc = CacheControl::new(CacheControlDirective::NoStore).with_max_age_seconds(30);
    /// assert_eq!(cc.to_string(), "no-store, max-age=30");
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct CacheControl(NonEmptyVec<CacheControlDirective>);
}

impl CacheControl {
    /// Add a directive, replacing a directive of the same kind in place.
    #[must_use]
    pub fn with_directive(self, directive: CacheControlDirective) -> Self {
        let mut values = self.into_values();
        if values.head.same_kind(&directive) {
            values.head = directive;
        } else if let Some(existing) = values.tail.iter_mut().find(|d| d.same_kind(&directive)) {
            *existing = directive;
        } else {
            values.tail.push(directive);
        }
        Self::from_values(values)
    }

    fn has(&self, f: impl Fn(&CacheControlDirective) -> bool) -> bool {
        self.iter().any(f)
    }

    fn find_map<T>(&self, f: impl Fn(&CacheControlDirective) -> Option<T>) -> Option<T> {
        self.iter().find_map(f)
    }

    // getters

    /// Check if the `no-cache` directive is set.
    #[must_use]
    pub fn no_cache(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::NoCache(_)))
    }

    /// Check if the `no-store` directive is set.
    #[must_use]
    pub fn no_store(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::NoStore))
    }

    #[must_use]
    pub fn no_transform(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::NoTransform))
    }

    #[must_use]
    pub fn only_if_cached(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::OnlyIfCached))
    }

    #[must_use]
    pub fn public(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::Public))
    }

    #[must_use]
    pub fn private(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::Private(_)))
    }

    /// The field names `no-cache` is limited to, `None` if unlimited or unset.
    #[must_use]
    pub fn no_cache_field_names(&self) -> Option<&CacheControlFieldNames> {
        self.iter().find_map(|d| match d {
            CacheControlDirective::NoCache(fields) => fields.as_ref(),
            _ => None,
        })
    }

    /// The field names `private` is limited to, `None` if unlimited or unset.
    #[must_use]
    pub fn private_field_names(&self) -> Option<&CacheControlFieldNames> {
        self.iter().find_map(|d| match d {
            CacheControlDirective::Private(fields) => fields.as_ref(),
            _ => None,
        })
    }

    #[must_use]
    pub fn immutable(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::Immutable))
    }

    #[must_use]
    pub fn must_revalidate(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::MustRevalidate))
    }

    #[must_use]
    pub fn must_understand(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::MustUnderstand))
    }

    #[must_use]
    pub fn proxy_revalidate(&self) -> bool {
        self.has(|d| matches!(d, CacheControlDirective::ProxyRevalidate))
    }

    /// Get the value of the `max-age` directive if set.
    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        self.find_map(|d| match d {
            CacheControlDirective::MaxAge(n) => Some(Duration::from_secs(*n)),
            _ => None,
        })
    }

    /// Get the value of the `max-stale` directive if set,
    /// [`Duration::MAX`] when it was given without a value.
    #[must_use]
    pub fn max_stale(&self) -> Option<Duration> {
        self.find_map(|d| match d {
            CacheControlDirective::MaxStale(n) => {
                Some(n.map_or(Duration::MAX, Duration::from_secs))
            }
            _ => None,
        })
    }

    #[must_use]
    pub fn min_fresh(&self) -> Option<Duration> {
        self.find_map(|d| match d {
            CacheControlDirective::MinFresh(n) => Some(Duration::from_secs(*n)),
            _ => None,
        })
    }

    #[must_use]
    pub fn s_max_age(&self) -> Option<Duration> {
        self.find_map(|d| match d {
            CacheControlDirective::SMaxAge(n) => Some(Duration::from_secs(*n)),
            _ => None,
        })
    }

    #[must_use]
    pub fn stale_while_revalidate(&self) -> Option<Duration> {
        self.find_map(|d| match d {
            CacheControlDirective::StaleWhileRevalidate(n) => Some(Duration::from_secs(*n)),
            _ => None,
        })
    }

    #[must_use]
    pub fn stale_if_error(&self) -> Option<Duration> {
        self.find_map(|d| match d {
            CacheControlDirective::StaleIfError(n) => Some(Duration::from_secs(*n)),
            _ => None,
        })
    }

    /// The value of an extension directive, `Some(None)` when it has no value.
    #[must_use]
    pub fn extension(&self, name: &str) -> Option<Option<&str>> {
        self.iter().find_map(|d| match d {
            CacheControlDirective::Extension(extension) if extension.name.eq_ignore_ascii_case(name) => {
                Some(extension.value())
            }
            _ => None,
        })
    }

    // setters

    /// Set the `no-cache` directive.
    #[must_use]
    pub fn with_no_cache(self) -> Self {
        self.with_directive(CacheControlDirective::NoCache(None))
    }

    /// Set the `no-store` directive.
    #[must_use]
    pub fn with_no_store(self) -> Self {
        self.with_directive(CacheControlDirective::NoStore)
    }

    #[must_use]
    pub fn with_no_transform(self) -> Self {
        self.with_directive(CacheControlDirective::NoTransform)
    }

    #[must_use]
    pub fn with_public(self) -> Self {
        self.with_directive(CacheControlDirective::Public)
    }

    #[must_use]
    pub fn with_private(self) -> Self {
        self.with_directive(CacheControlDirective::Private(None))
    }

    #[must_use]
    pub fn with_immutable(self) -> Self {
        self.with_directive(CacheControlDirective::Immutable)
    }

    #[must_use]
    pub fn with_must_revalidate(self) -> Self {
        self.with_directive(CacheControlDirective::MustRevalidate)
    }

    /// Set the `max-age` directive.
    #[must_use]
    pub fn with_max_age_seconds(self, seconds: u64) -> Self {
        self.with_directive(CacheControlDirective::MaxAge(seconds))
    }

    /// Set the `max-age` directive, rounding down to whole seconds.
    #[must_use]
    pub fn with_max_age(self, duration: Duration) -> Self {
        self.with_max_age_seconds(duration.as_secs())
    }

    #[must_use]
    pub fn with_s_max_age_seconds(self, seconds: u64) -> Self {
        self.with_directive(CacheControlDirective::SMaxAge(seconds))
    }

    #[must_use]
    pub fn with_stale_while_revalidate_seconds(self, seconds: u64) -> Self {
        self.with_directive(CacheControlDirective::StaleWhileRevalidate(seconds))
    }
}
