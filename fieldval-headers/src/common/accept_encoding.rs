use crate::specifier::{AcceptEncodingValue, CodingRange, ContentCoding, Quality, sort_by_quality};

derive_non_empty_list_header! {
    #[header(name = ::http::header::ACCEPT_ENCODING, sep = Comma, parse = AcceptEncodingValue::parse)]
    /// `Accept-Encoding` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-12.5.3)
    ///
    /// # ABNF
    ///
    /// ```text
    /// Accept-Encoding  = #( codings [ weight ] )
    /// codings          = content-coding / "identity" / "*"
    /// ```
    ///
    /// # Example values
    /// * `compress, gzip`
    /// * `gzip;q=1.0, identity; q=0.5, *;q=0`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct AcceptEncoding(NonEmptyVec<AcceptEncodingValue>);
}

impl AcceptEncoding {
    #[must_use]
    pub fn sorted_by_quality(&self) -> Vec<&AcceptEncodingValue> {
        sort_by_quality(self)
    }

    /// The weight given to `coding`: the most specific element that
    /// names it, else the wildcard, else `None`.
    #[must_use]
    pub fn quality_of(&self, coding: &ContentCoding) -> Option<Quality> {
        let coding = CodingRange::Coding(coding.clone());
        self.iter()
            .find(|value| value.value() == &coding)
            .or_else(|| self.iter().find(|value| value.is_wildcard()))
            .map(|value| value.quality_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;
    use crate::ValueError;
    use crate::grammar::ParseError;

    #[test]
    fn test_decode_values() {
        let accept: AcceptEncoding = test_decode(&["gzip;q=1.0, identity; q=0.5, *;q=0"]).unwrap();
        assert_eq!(accept.len(), 3);
        assert_eq!(accept.to_string(), "gzip; q=1, identity; q=0.5, *; q=0");
        assert_eq!(
            accept.quality_of(&ContentCoding::Gzip),
            Some(Quality::one())
        );
        assert_eq!(
            accept.quality_of(&ContentCoding::Brotli),
            Some(Quality::zero())
        );
    }

    #[test]
    fn test_decode_multiple_lines() {
        let accept: AcceptEncoding = test_decode(&["compress", "gzip"]).unwrap();
        assert_eq!(accept.to_string(), "compress, gzip");
        assert_eq!(accept.quality_of(&ContentCoding::Zstd), None);
    }

    #[test]
    fn test_invalid_quality_names_parameter() {
        let err = "*; q=ABC".parse::<AcceptEncoding>().unwrap_err();
        let ValueError::InvalidParameter { name, value, .. } = &err else {
            panic!("unexpected error: {err:?}");
        };
        assert_eq!(name, "q");
        assert_eq!(value, "ABC");
        assert!(matches!(err.parse_error(), Some(ParseError::InvalidNumber { .. })));
    }
}
