//! Dispatch of header values by header name.
//!
//! [`AnyHeader`] is the tagged union of every typed header of this crate,
//! [`HeaderRegistry`] binds well-known header names to the decoder of
//! their typed header. This is the entry point for code that only
//! knows the header name at runtime, e.g. when walking a [`HeaderMap`].
//!
//! ```
//! use fieldval_headers::{AnyHeader, HeaderRegistry};
//!
//! let registry = HeaderRegistry::new();
//! let header = registry.decode("Content-Length", "42").unwrap().unwrap();
//! assert!(matches!(header, AnyHeader::ContentLength(_)));
//! assert_eq!(registry.decode("x-custom", "anything").unwrap(), None);
//! ```

use fieldval_core::telemetry::tracing;
use http::header::ValueIter;
use http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;

use crate::config::DecodeConfig;
use crate::header::encode_text;
use crate::{Error, HeaderDecode, TypedHeader, ValueError};
use crate::{
    Accept, AcceptCharset, AcceptEncoding, AcceptLanguage, Age, CacheControl, ContentEncoding,
    ContentLanguage, ContentLength, ContentRange, ContentType, Cookie, Date, ETag, Expires,
    IfMatch, IfModifiedSince, IfNoneMatch, IfUnmodifiedSince, LastEventId, LastModified, Link,
    Location, MaxForwards, Range, Referer, Server, UserAgent,
};

type DecodeTextFn = fn(&str, &DecodeConfig) -> Result<AnyHeader, ValueError>;
type DecodeValuesFn =
    for<'a> fn(&mut ValueIter<'a, HeaderValue>, &DecodeConfig) -> Result<AnyHeader, Error>;

/// The decoders bound to a single header name.
#[derive(Clone, Copy)]
pub struct HeaderHandler {
    kind: AnyHeaderKind,
    decode_text: DecodeTextFn,
    decode_values: DecodeValuesFn,
}

impl HeaderHandler {
    #[must_use]
    pub fn kind(&self) -> AnyHeaderKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &'static HeaderName {
        self.kind.header_name()
    }
}

impl fmt::Debug for HeaderHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderHandler")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

macro_rules! any_header {
    ($($variant:ident),+ $(,)?) => {
        /// Any of the typed headers of this crate.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum AnyHeader {
            $(
                #[doc = concat!("The [`", stringify!($variant), "`] header.")]
                $variant($variant),
            )+
        }

        /// The kind of an [`AnyHeader`], without its value.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum AnyHeaderKind {
            $($variant,)+
        }

        impl AnyHeaderKind {
            /// All kinds, in registry order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            #[must_use]
            pub fn header_name(self) -> &'static HeaderName {
                match self {
                    $(Self::$variant => <$variant as TypedHeader>::name(),)+
                }
            }

            /// The lower-cased header name.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                self.header_name().as_str()
            }
        }

        impl fmt::Display for AnyHeaderKind {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl AnyHeader {
            #[must_use]
            pub fn kind(&self) -> AnyHeaderKind {
                match self {
                    $(Self::$variant(_) => AnyHeaderKind::$variant,)+
                }
            }
        }

        impl fmt::Display for AnyHeader {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant(header) => fmt::Display::fmt(header, f),)+
                }
            }
        }

        $(
            impl From<$variant> for AnyHeader {
                fn from(header: $variant) -> Self {
                    Self::$variant(header)
                }
            }

            impl TryFrom<AnyHeader> for $variant {
                type Error = ValueError;

                fn try_from(header: AnyHeader) -> Result<Self, Self::Error> {
                    match header {
                        AnyHeader::$variant(header) => Ok(header),
                        other => Err(ValueError::WrongType {
                            expected: AnyHeaderKind::$variant.as_str(),
                            actual: other.kind().as_str(),
                        }),
                    }
                }
            }
        )+

        static HANDLERS: &[HeaderHandler] = &[
            $(
                HeaderHandler {
                    kind: AnyHeaderKind::$variant,
                    decode_text: |text, config| {
                        <$variant as HeaderDecode>::decode_text(text, config).map(AnyHeader::$variant)
                    },
                    decode_values: |values, config| {
                        <$variant as HeaderDecode>::decode_with_config(values, config)
                            .map(AnyHeader::$variant)
                    },
                },
            )+
        ];
    };
}

any_header! {
    Accept,
    AcceptCharset,
    AcceptEncoding,
    AcceptLanguage,
    Age,
    CacheControl,
    ContentEncoding,
    ContentLanguage,
    ContentLength,
    ContentRange,
    ContentType,
    Cookie,
    Date,
    ETag,
    Expires,
    IfMatch,
    IfModifiedSince,
    IfNoneMatch,
    IfUnmodifiedSince,
    LastEventId,
    LastModified,
    Link,
    Location,
    MaxForwards,
    Range,
    Referer,
    Server,
    UserAgent,
}

impl AnyHeader {
    /// The name of the header this value belongs to.
    #[must_use]
    pub fn name(&self) -> &'static HeaderName {
        self.kind().header_name()
    }

    /// Encode this header to a single [`HeaderValue`].
    pub fn encode_to_value(&self) -> Result<HeaderValue, Error> {
        encode_text(self.kind().as_str(), self.to_string())
    }
}

/// A table of [`HeaderHandler`]s, looked up by header name.
///
/// Header names are matched ASCII case-insensitively. Names without a
/// handler are not an error: [`HeaderRegistry::decode`] returns `Ok(None)`
/// for them so callers can keep them as raw text.
#[derive(Debug, Clone)]
pub struct HeaderRegistry {
    handlers: &'static [HeaderHandler],
    config: DecodeConfig,
}

impl Default for HeaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRegistry {
    /// Create a registry with all well-known headers and the default [`DecodeConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HANDLERS,
            config: DecodeConfig::new(),
        }
    }

    /// Use a custom [`DecodeConfig`] for all decoding done by this registry.
    #[must_use]
    pub fn with_config(mut self, config: DecodeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Find the handler of a header name.
    #[must_use]
    pub fn handler(&self, name: &str) -> Option<&HeaderHandler> {
        self.handlers
            .iter()
            .find(|handler| handler.name().as_str().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handler(name).is_some()
    }

    /// The names of all registered headers.
    pub fn names(&self) -> impl Iterator<Item = &'static HeaderName> + '_ {
        self.handlers.iter().map(HeaderHandler::name)
    }

    /// Decode a single field value of the named header.
    ///
    /// Returns `Ok(None)` when no handler is registered for `name`.
    pub fn decode(&self, name: &str, text: &str) -> Result<Option<AnyHeader>, Error> {
        let Some(handler) = self.handler(name) else {
            tracing::trace!(header = name, "no handler registered for header");
            return Ok(None);
        };
        (handler.decode_text)(text, &self.config)
            .map(Some)
            .map_err(|err| {
                tracing::debug!(header = name, "failed to decode header value: {err}");
                Error::new(handler.name().as_str(), text, err)
            })
    }

    /// Decode every registered header present in `map`,
    /// combining multiple field lines of the same header.
    ///
    /// Headers without a handler are skipped.
    pub fn decode_map(&self, map: &HeaderMap) -> Result<Vec<AnyHeader>, Error> {
        let mut headers = Vec::new();
        for handler in self.handlers {
            if !map.contains_key(handler.name()) {
                continue;
            }
            let all = map.get_all(handler.name());
            let mut values = all.iter();
            headers.push((handler.decode_values)(&mut values, &self.config)?);
        }
        Ok(headers)
    }

    /// Check that `header` is a value of the named header, without re-parsing it.
    ///
    /// Names without a handler accept any value.
    pub fn validate(&self, name: &str, header: &AnyHeader) -> Result<(), Error> {
        let Some(handler) = self.handler(name) else {
            return Ok(());
        };
        if handler.kind == header.kind() {
            return Ok(());
        }
        let err = ValueError::WrongType {
            expected: handler.kind.as_str(),
            actual: header.kind().as_str(),
        };
        tracing::debug!(header = name, "header value of the wrong type: {err}");
        Err(Error::new(handler.name().as_str(), header.to_string(), err))
    }

    /// Validate `header` against the named header and encode it.
    pub fn encode(&self, name: &str, header: &AnyHeader) -> Result<HeaderValue, Error> {
        self.validate(name, header)?;
        header.encode_to_value()
    }
}
