use crate::specifier::{EntityTag, EntityTagRange};

derive_value_header! {
    #[header(name = ::http::header::IF_MATCH, parse = EntityTagRange::parse)]
    /// `If-Match` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.1)
    ///
    /// The `If-Match` header field makes the request method conditional on
    /// the recipient origin server either having at least one current
    /// representation of the target resource, when the field-value is "*",
    /// or having a current representation of the target resource that has an
    /// entity-tag matching a member of the list of entity-tags provided in
    /// the field-value.
    ///
    /// An origin server MUST use the strong comparison function when
    /// comparing entity-tags for `If-Match`, since the client
    /// intends this precondition to prevent the method from being applied if
    /// there have been any changes to the representation data.
    ///
    /// # ABNF
    ///
    /// ```text
    /// If-Match = "*" / 1#entity-tag
    /// ```
    ///
    /// # Example values
    ///
    /// * `"xyzzy"`
    /// * "xyzzy", "r2d2xxxx", "c3piozzzz"
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldval_headers::IfMatch;
    ///
    /// let if_match = IfMatch::any();
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct IfMatch(EntityTagRange);
}

impl IfMatch {
    /// Create a new `If-Match: *` header.
    #[must_use]
    pub fn any() -> Self {
        Self(EntityTagRange::Any)
    }

    /// Returns whether this is `If-Match: *`, matching any entity tag.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.0.is_any()
    }

    #[must_use]
    pub fn range(&self) -> &EntityTagRange {
        &self.0
    }

    /// Checks whether the `ETag` strongly matches.
    #[must_use]
    pub fn precondition_passes(&self, etag: &EntityTag) -> bool {
        self.0.matches_strong(etag)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;

    #[test]
    fn test_is_any() {
        assert!(IfMatch::any().is_any());
        assert!(!IfMatch::from(EntityTagRange::from(EntityTag::strong("yolo").unwrap())).is_any());
    }

    #[test]
    fn test_decode_strong_list() {
        let if_match: IfMatch = test_decode(&["\"A\",\"B\""]).unwrap();
        let tags: Vec<_> = if_match.range().tags().collect();
        assert_eq!(tags.len(), 2);
        assert!(tags.iter().all(|tag| !tag.is_weak()));
        assert_eq!(if_match.to_string(), "\"A\", \"B\"");
    }

    #[test]
    fn test_precondition_uses_strong_comparison() {
        let if_match: IfMatch = "W/\"foo\", \"bar\"".parse().unwrap();
        assert!(if_match.precondition_passes(&EntityTag::strong("bar").unwrap()));
        assert!(!if_match.precondition_passes(&EntityTag::strong("foo").unwrap()));
        assert!(!if_match.precondition_passes(&EntityTag::weak("bar").unwrap()));
        assert!(IfMatch::any().precondition_passes(&EntityTag::weak("x").unwrap()));
    }

    #[test]
    fn test_decode_invalid() {
        for input in ["", "*, \"a\"", "\"a\",", "a"] {
            assert_eq!(test_decode::<IfMatch>(&[input]), None, "{input:?}");
        }
    }
}
