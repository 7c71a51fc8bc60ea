derive_http_date_header! {
    #[header(name = ::http::header::DATE)]
    /// `Date` header, defined in [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-6.6.1)
    ///
    /// The `Date` header field represents the date and time at which the
    /// message was originated.
    ///
    /// ## ABNF
    ///
    /// ```text
    /// Date = HTTP-date
    /// ```
    ///
    /// ## Example values
    ///
    /// * `Tue, 15 Nov 1994 08:12:31 GMT`
    ///
    /// # Example
    ///
    /// ```
    /// use fieldval_headers::Date;
    /// use std::time::SystemTime;
    ///
    /// let date = Date::from(SystemTime::now());
    /// ```
    pub struct Date(HttpDate);
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    #[test]
    fn test_decode_obsolete_formats() {
        let expected = Date::from(UNIX_EPOCH + Duration::from_secs(784_111_777));
        for input in [
            "Sun, 06 Nov 1994 08:49:37 GMT",
            "Sunday, 06-Nov-94 08:49:37 GMT",
            "Sun Nov  6 08:49:37 1994",
        ] {
            assert_eq!(test_decode::<Date>(&[input]), Some(expected), "{input:?}");
        }
    }

    #[test]
    fn test_encode_imf_fixdate() {
        let date = Date::from(UNIX_EPOCH + Duration::from_secs(784_111_777));
        let headers = test_encode(date);
        assert_eq!(headers["date"], "Sun, 06 Nov 1994 08:49:37 GMT");
        assert_eq!(SystemTime::from(date), UNIX_EPOCH + Duration::from_secs(784_111_777));
    }

    #[test]
    fn test_decode_invalid() {
        for input in ["", "tomorrow", "Sun, 06 Nov 1994"] {
            assert_eq!(test_decode::<Date>(&[input]), None, "{input:?}");
        }
    }
}
