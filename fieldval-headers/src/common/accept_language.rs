use crate::specifier::{AcceptLanguageValue, sort_by_quality};

derive_non_empty_list_header! {
    #[header(name = ::http::header::ACCEPT_LANGUAGE, sep = Comma, parse = AcceptLanguageValue::parse)]
    /// `Accept-Language` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.4)
    ///
    /// The elements keep the order in which they were declared,
    /// use [`AcceptLanguage::sorted_by_quality`] to negotiate.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Language = #( language-range [ weight ] )
    /// language-range  = (1*8ALPHA *("-" 1*8alphanum)) / "*"
    /// ```
    ///
    /// # Example values
    /// * `da, en-gb;q=0.8, en;q=0.7`
    /// * `en-us;q=1.0, en;q=0.5, fr`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AcceptLanguage(NonEmptyVec<AcceptLanguageValue>);
}

impl AcceptLanguage {
    #[must_use]
    pub fn sorted_by_quality(&self) -> Vec<&AcceptLanguageValue> {
        sort_by_quality(self)
    }
}
