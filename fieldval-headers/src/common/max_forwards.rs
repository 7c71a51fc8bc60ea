derive_number_header! {
    #[header(name = ::http::header::MAX_FORWARDS)]
    /// `Max-Forwards` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-7.6.2)
    ///
    /// Limits the number of times a `TRACE` or `OPTIONS` request
    /// can be forwarded by proxies.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Max-Forwards = 1*DIGIT
    /// ```
    pub struct MaxForwards(pub u64);
}

impl MaxForwards {
    /// The value to forward with, `None` once it reached zero.
    #[must_use]
    pub fn decremented(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}
