use super::LastModified;

derive_http_date_header! {
    #[header(name = ::http::header::IF_UNMODIFIED_SINCE)]
    /// `If-Unmodified-Since` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.4)
    ///
    /// The `If-Unmodified-Since` header field makes the request method
    /// conditional on the selected representation's last modification date
    /// being earlier than or equal to the date provided in the field-value.
    ///
    /// # ABNF
    ///
    /// ```text
    /// If-Unmodified-Since = HTTP-date
    /// ```
    ///
    /// # Example values
    ///
    /// * `Sat, 29 Oct 1994 19:43:31 GMT`
    pub struct IfUnmodifiedSince(HttpDate);
}

impl IfUnmodifiedSince {
    /// Check if the precondition passes for the given modification date.
    #[must_use]
    pub fn precondition_passes(&self, last_modified: LastModified) -> bool {
        last_modified.date() <= self.date()
    }
}
