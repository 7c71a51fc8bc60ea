use crate::specifier::EntityTag;

derive_value_header! {
    #[header(name = ::http::header::ETAG, parse = EntityTag::parse)]
    /// `ETag` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.8.3)
    ///
    /// The `ETag` header field in a response provides the current entity-tag
    /// for the selected representation, as determined at the conclusion of
    /// handling the request. An entity-tag is an opaque validator for
    /// differentiating between multiple representations of the same
    /// resource, regardless of whether those multiple representations are
    /// due to resource state changes over time, content negotiation
    /// resulting in multiple representations being valid at the same time,
    /// or both. An entity-tag consists of an opaque quoted string, possibly
    /// prefixed by a weakness indicator.
    ///
    /// # ABNF
    ///
    /// ```text
    /// ETag       = entity-tag
    /// ```
    ///
    /// # Example values
    ///
    /// * `"xyzzy"`
    /// * `W/"xyzzy"`
    /// * `""`
    ///
    /// # Examples
    ///
    /// ```
    /// let etag = "\"xyzzy\"".parse::<fieldval_headers::ETag>().unwrap();
    /// assert!(!etag.entity_tag().is_weak());
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct ETag(EntityTag);
}

impl ETag {
    #[must_use]
    pub fn entity_tag(&self) -> &EntityTag {
        &self.0
    }
}
