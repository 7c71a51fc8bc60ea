use crate::specifier::LanguageTag;

derive_non_empty_list_header! {
    #[header(name = ::http::header::CONTENT_LANGUAGE, sep = Comma, parse = LanguageTag::parse)]
    /// `Content-Language` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.5)
    ///
    /// # ABNF
    ///
    /// ```text
    /// Content-Language = 1#language-tag
    /// ```
    ///
    /// # Example values
    /// * `da`
    /// * `mi, en`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ContentLanguage(NonEmptyVec<LanguageTag>);
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;
    use crate::ValueError;
    use crate::grammar::ParseError;

    #[test]
    fn test_decode_values() {
        let lang: ContentLanguage = test_decode(&["mi, en-NZ"]).unwrap();
        let tags: Vec<_> = lang.iter().map(LanguageTag::as_str).collect();
        assert_eq!(tags, ["mi", "en-NZ"]);
        assert_eq!(lang.to_string(), "mi, en-NZ");
    }

    #[test]
    fn test_wildcard_is_not_a_tag() {
        assert_eq!(
            "*".parse::<ContentLanguage>(),
            Err(ValueError::Syntax(ParseError::invalid_character('*', 0)))
        );
    }
}
