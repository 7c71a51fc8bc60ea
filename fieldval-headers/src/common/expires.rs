derive_http_date_header! {
    #[header(name = ::http::header::EXPIRES)]
    /// `Expires` header, defined in [RFC9111](https://www.rfc-editor.org/rfc/rfc9111#section-5.3)
    ///
    /// The `Expires` header field gives the date/time after which the
    /// response is considered stale.
    ///
    /// The presence of an Expires field does not imply that the original
    /// resource will change or cease to exist at, before, or after that
    /// time.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Expires = HTTP-date
    /// ```
    ///
    /// # Example values
    /// * `Thu, 01 Dec 1994 16:00:00 GMT`
    ///
    /// # Example
    ///
    /// ```
    /// use fieldval_headers::Expires;
    /// use std::time::{SystemTime, Duration};
    ///
    /// let time = SystemTime::now() + Duration::from_secs(60 * 60 * 24);
    /// let expires = Expires::from(time);
    /// ```
    pub struct Expires(HttpDate);
}
