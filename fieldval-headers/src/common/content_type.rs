use crate::config::DecodeConfig;
use crate::grammar::Cursor;
use crate::specifier::{CharsetName, MediaType};
use crate::ValueError;
use std::fmt;

/// `Content-Type` header, defined in
/// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.3)
///
/// The `Content-Type` header field indicates the media type of the
/// associated representation. Unlike the ranges of `Accept`
/// it never holds a wildcard.
///
/// # ABNF
///
/// ```text
/// Content-Type = media-type
/// ```
///
/// # Example values
///
/// * `text/html; charset=utf-8`
/// * `application/json`
///
/// # Examples
///
/// ```
/// use fieldval_headers::ContentType;
///
/// let ct = ContentType::json();
/// assert_eq!(ct.to_string(), "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType(MediaType);

derive_header!(ContentType, name: ::http::header::CONTENT_TYPE);

impl ContentType {
    /// Wrap a concrete media type.
    pub fn new(media_type: MediaType) -> Result<Self, ValueError> {
        if media_type.is_wildcard() || media_type.type_() == "*" {
            return Err(ValueError::WildcardNotAllowed {
                context: "content-type",
            });
        }
        Ok(Self(media_type))
    }

    /// A constructor to easily create a `Content-Type: application/json` header.
    #[inline]
    #[must_use]
    pub fn json() -> Self {
        Self(MediaType::APPLICATION_JSON)
    }

    /// A constructor to easily create a `Content-Type: text/plain` header.
    #[inline]
    #[must_use]
    pub fn text() -> Self {
        Self(MediaType::TEXT_PLAIN)
    }

    /// A constructor to easily create a `Content-Type: text/html` header.
    #[inline]
    #[must_use]
    pub fn html() -> Self {
        Self(MediaType::TEXT_HTML)
    }

    /// A constructor to easily create a `Content-Type: application/octet-stream` header.
    #[inline]
    #[must_use]
    pub fn octet_stream() -> Self {
        Self(MediaType::APPLICATION_OCTET_STREAM)
    }

    /// A constructor to easily create a `Content-Type: application/x-www-form-urlencoded` header.
    #[inline]
    #[must_use]
    pub fn form_url_encoded() -> Self {
        Self(MediaType::APPLICATION_WWW_FORM_URLENCODED)
    }

    /// A constructor to easily create a `Content-Type: text/event-stream` header.
    #[inline]
    #[must_use]
    pub fn text_event_stream() -> Self {
        Self(MediaType::TEXT_EVENT_STREAM)
    }

    #[must_use]
    pub fn media_type(&self) -> &MediaType {
        &self.0
    }

    #[must_use]
    pub fn into_media_type(self) -> MediaType {
        self.0
    }

    /// The `charset` parameter, if any.
    #[must_use]
    pub fn charset(&self) -> Option<&CharsetName> {
        self.0.charset()
    }

    fn parse_text(text: &str, config: &DecodeConfig) -> Result<Self, ValueError> {
        let mut cursor = Cursor::with_config(text, config);
        cursor.skip_whitespace();
        let media_type = MediaType::parse(&mut cursor)?;
        cursor.finish()?;
        Self::new(media_type)
    }
}

impl TryFrom<MediaType> for ContentType {
    type Error = ValueError;

    fn try_from(media_type: MediaType) -> Result<Self, Self::Error> {
        Self::new(media_type)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
