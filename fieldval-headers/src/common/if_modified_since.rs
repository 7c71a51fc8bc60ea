use super::LastModified;

derive_http_date_header! {
    #[header(name = ::http::header::IF_MODIFIED_SINCE)]
    /// `If-Modified-Since` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-13.1.3)
    ///
    /// The `If-Modified-Since` header field makes a GET or HEAD request
    /// method conditional on the selected representation's modification
    /// date being more recent than the date provided in the field-value.
    ///
    /// # ABNF
    ///
    /// ```text
    /// If-Modified-Since = HTTP-date
    /// ```
    ///
    /// # Example values
    /// * `Sat, 29 Oct 1994 19:43:31 GMT`
    pub struct IfModifiedSince(HttpDate);
}

impl IfModifiedSince {
    /// Check if the resource has been modified since this date.
    #[must_use]
    pub fn is_modified(&self, last_modified: LastModified) -> bool {
        last_modified.date() > self.date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_is_modified() {
        let newer = SystemTime::now();
        let exact = newer - Duration::from_secs(2);
        let older = newer - Duration::from_secs(4);

        let if_mod = IfModifiedSince::from(exact);
        assert!(if_mod.is_modified(LastModified::from(newer)));
        assert!(!if_mod.is_modified(LastModified::from(exact)));
        assert!(!if_mod.is_modified(LastModified::from(older)));
    }
}
