use http::{HeaderMap, HeaderValue, header};

use crate::config::DecodeConfig;
use crate::{Error, HeaderDecode, HeaderEncode};

/// An extension trait adding "typed" methods to `http::HeaderMap`.
pub trait HeaderMapExt: self::sealed::Sealed {
    /// Inserts the typed header into this `HeaderMap`,
    /// replacing any previous values of that header.
    fn typed_insert<H>(&mut self, header: H)
    where
        H: HeaderEncode;

    /// Tries to find the header by name, and then decode it into `H`.
    fn typed_get<H>(&self) -> Option<H>
    where
        H: HeaderDecode;

    /// Tries to find the header by name, and then decode it into `H`.
    fn typed_try_get<H>(&self) -> Result<Option<H>, Error>
    where
        H: HeaderDecode;

    /// Like [`HeaderMapExt::typed_try_get`], with an explicit [`DecodeConfig`].
    fn typed_try_get_with_config<H>(&self, config: &DecodeConfig) -> Result<Option<H>, Error>
    where
        H: HeaderDecode;
}

impl HeaderMapExt for HeaderMap {
    fn typed_insert<H>(&mut self, header: H)
    where
        H: HeaderEncode,
    {
        let mut values: Vec<HeaderValue> = Vec::with_capacity(1);
        header.encode(&mut values);
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return;
        };
        match self.entry(H::name()) {
            header::Entry::Occupied(mut entry) => {
                entry.insert(first);
                for value in values {
                    entry.append(value);
                }
            }
            header::Entry::Vacant(entry) => {
                let mut entry = entry.insert_entry(first);
                for value in values {
                    entry.append(value);
                }
            }
        }
    }

    fn typed_get<H>(&self) -> Option<H>
    where
        H: HeaderDecode,
    {
        HeaderMapExt::typed_try_get(self).unwrap_or(None)
    }

    fn typed_try_get<H>(&self) -> Result<Option<H>, Error>
    where
        H: HeaderDecode,
    {
        self.typed_try_get_with_config(DecodeConfig::global())
    }

    fn typed_try_get_with_config<H>(&self, config: &DecodeConfig) -> Result<Option<H>, Error>
    where
        H: HeaderDecode,
    {
        let mut values = self.get_all(H::name()).iter();
        if values.size_hint() == (0, Some(0)) {
            Ok(None)
        } else {
            H::decode_with_config(&mut values, config).map(Some)
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for ::http::HeaderMap {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AcceptLanguage, ContentLength, ETag};
    use tracing_test::traced_test;

    #[test]
    fn test_insert_replaces() {
        let mut headers = HeaderMap::new();
        headers.append("content-length", HeaderValue::from_static("1"));
        headers.append("content-length", HeaderValue::from_static("2"));
        headers.typed_insert(ContentLength(42));
        assert_eq!(headers.get_all("content-length").iter().count(), 1);
        assert_eq!(headers["content-length"], "42");
        assert_eq!(headers.typed_get::<ContentLength>(), Some(ContentLength(42)));
    }

    #[test]
    fn test_get_absent() {
        let headers = HeaderMap::new();
        assert_eq!(headers.typed_try_get::<ETag>(), Ok(None));
    }

    #[test]
    fn test_get_joins_field_lines() {
        let mut headers = HeaderMap::new();
        headers.append("accept-language", HeaderValue::from_static("en-US"));
        headers.append("accept-language", HeaderValue::from_static("en;q=0.5"));
        let accept = headers.typed_get::<AcceptLanguage>().unwrap();
        assert_eq!(accept.to_string(), "en-US, en; q=0.5");
    }

    #[test]
    fn test_non_utf8_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "etag",
            HeaderValue::from_bytes(b"\"ab\xffc\"").unwrap(),
        );
        let err = headers.typed_try_get::<ETag>().unwrap_err();
        assert_eq!(
            err.parse_error(),
            Some(&crate::grammar::ParseError::invalid_character('\u{FFFD}', 3))
        );
    }

    #[test]
    #[traced_test]
    fn test_decode_failure_is_logged() {
        let mut headers = HeaderMap::new();
        headers.insert("content-length", HeaderValue::from_static("12a"));
        assert_eq!(headers.typed_get::<ContentLength>(), None);
        assert!(logs_contain("failed to decode header value"));
    }
}
