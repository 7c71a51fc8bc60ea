use crate::specifier::{AcceptValue, MediaType, sort_by_quality};

derive_non_empty_list_header! {
    #[header(name = ::http::header::ACCEPT, sep = Comma, parse = AcceptValue::parse)]
    /// `Accept` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.1)
    ///
    /// The `Accept` header field can be used by user agents to specify
    /// response media types that are acceptable.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept = #( media-range [ weight ] )
    ///
    /// media-range    = ( "*/*"
    ///                  / ( type "/" "*" )
    ///                  / ( type "/" subtype )
    ///                  ) parameters
    /// ```
    ///
    /// Everything from the `q` parameter onwards belongs to the weight,
    /// the parameters before it to the media range.
    ///
    /// # Example values
    /// * `audio/*; q=0.2, audio/basic`
    /// * `text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c`
    ///
    /// # Examples
    /// ```
    /// use fieldval_headers::{Accept, HeaderMapExt};
    /// use fieldval_headers::specifier::{AcceptValue, MediaType, Quality};
    ///
    /// let mut headers = http::HeaderMap::new();
    /// headers.typed_insert(Accept::new(
    ///     AcceptValue::new(MediaType::TEXT_HTML).with_quality(Quality::new(900).unwrap()),
    /// ));
    /// assert_eq!(headers["accept"], "text/html; q=0.9");
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Accept(NonEmptyVec<AcceptValue>);
}

impl Accept {
    #[inline]
    #[must_use]
    pub fn new_from_media_type(media_type: MediaType) -> Self {
        Self::new(AcceptValue::new(media_type))
    }

    /// A constructor to easily create `Accept: */*`.
    #[inline]
    #[must_use]
    pub fn star() -> Self {
        Self::new_from_media_type(MediaType::STAR_STAR)
    }

    /// A constructor to easily create `Accept: application/json`.
    #[inline]
    #[must_use]
    pub fn json() -> Self {
        Self::new_from_media_type(MediaType::APPLICATION_JSON)
    }

    /// A constructor to easily create `Accept: text/*`.
    #[inline]
    #[must_use]
    pub fn text() -> Self {
        Self::new_from_media_type(MediaType::TEXT_STAR)
    }

    /// A constructor to easily create `Accept: image/*`.
    #[inline]
    #[must_use]
    pub fn image() -> Self {
        Self::new_from_media_type(MediaType::IMAGE_STAR)
    }

    /// The media ranges by descending weight, declared order among equals.
    #[must_use]
    pub fn sorted_by_quality(&self) -> Vec<&AcceptValue> {
        sort_by_quality(self)
    }
}
