derive_number_header! {
    #[header(name = ::http::header::CONTENT_LENGTH)]
    /// `Content-Length` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.6)
    ///
    /// When a message does not have a `Transfer-Encoding` header field, a
    /// Content-Length header field can provide the anticipated size, as a
    /// decimal number of octets, for a potential payload body.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Content-Length = 1*DIGIT
    /// ```
    ///
    /// # Example values
    ///
    /// * `3495`
    ///
    /// # Example
    ///
    /// ```
    /// use fieldval_headers::ContentLength;
    ///
    /// let len = ContentLength(1_000);
    /// ```
    pub struct ContentLength(pub u64);
}
