use crate::specifier::{AcceptCharsetValue, sort_by_quality};

derive_non_empty_list_header! {
    #[header(name = ::http::header::ACCEPT_CHARSET, sep = Comma, parse = AcceptCharsetValue::parse)]
    /// `Accept-Charset` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.2)
    ///
    /// Charset names are resolved through the [`DecodeConfig`](crate::DecodeConfig)
    /// charset oracle; names it does not know are kept as unsupported.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Charset = #( ( token / "*" ) [ weight ] )
    /// ```
    ///
    /// # Example values
    /// * `iso-8859-5, unicode-1-1;q=0.8`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AcceptCharset(NonEmptyVec<AcceptCharsetValue>);
}

impl AcceptCharset {
    #[must_use]
    pub fn sorted_by_quality(&self) -> Vec<&AcceptCharsetValue> {
        sort_by_quality(self)
    }
}
