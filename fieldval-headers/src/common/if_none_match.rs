use crate::specifier::{EntityTag, EntityTagRange};

derive_value_header! {
    #[header(name = ::http::header::IF_NONE_MATCH, parse = EntityTagRange::parse)]
    /// `If-None-Match` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.2)
    ///
    /// The `If-None-Match` header field makes the request method conditional
    /// on a recipient cache or origin server either not having any current
    /// representation of the target resource, when the field-value is "*",
    /// or having a selected representation with an entity-tag that does not
    /// match any of those listed in the field-value.
    ///
    /// A recipient MUST use the weak comparison function when comparing
    /// entity-tags for If-None-Match, since weak entity-tags
    /// can be used for cache validation even if there have been changes to
    /// the representation data.
    ///
    /// # ABNF
    ///
    /// ```text
    /// If-None-Match = "*" / 1#entity-tag
    /// ```
    ///
    /// # Example values
    ///
    /// * `"xyzzy"`
    /// * `W/"xyzzy"`
    /// * `"xyzzy", "r2d2xxxx", "c3piozzzz"`
    /// * `W/"xyzzy", W/"r2d2xxxx", W/"c3piozzzz"`
    /// * `*`
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldval_headers::IfNoneMatch;
    ///
    /// let if_none_match = IfNoneMatch::any();
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct IfNoneMatch(EntityTagRange);
}

impl IfNoneMatch {
    /// Create a new `If-None-Match: *` header.
    #[must_use]
    pub fn any() -> Self {
        Self(EntityTagRange::Any)
    }

    #[must_use]
    pub fn range(&self) -> &EntityTagRange {
        &self.0
    }

    /// Checks whether the `ETag` passes this precondition,
    /// i.e. none of the tags weakly match.
    #[must_use]
    pub fn precondition_passes(&self, etag: &EntityTag) -> bool {
        !self.0.matches_weak(etag)
    }
}

impl From<EntityTag> for IfNoneMatch {
    fn from(etag: EntityTag) -> Self {
        Self(etag.into())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;

    #[test]
    fn test_decode_weak_list() {
        let if_none_match: IfNoneMatch = test_decode(&["W/\"A\",W/\"B\""]).unwrap();
        let tags: Vec<_> = if_none_match.range().tags().collect();
        assert_eq!(tags.len(), 2);
        assert!(tags.iter().all(|tag| tag.is_weak()));
    }

    #[test]
    fn test_precondition() {
        let foo = EntityTag::strong("foo").unwrap();
        let bar = EntityTag::strong("bar").unwrap();
        let weak_foo = EntityTag::weak("foo").unwrap();

        let if_none = IfNoneMatch::from(foo.clone());
        assert!(!if_none.precondition_passes(&foo));
        assert!(!if_none.precondition_passes(&weak_foo));
        assert!(if_none.precondition_passes(&bar));

        assert!(!IfNoneMatch::any().precondition_passes(&bar));
    }

    #[test]
    fn test_encode_value() {
        let headers = test_encode(IfNoneMatch::any());
        assert_eq!(headers["if-none-match"], "*");
    }
}
