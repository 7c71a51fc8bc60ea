use crate::specifier::ContentCoding;

derive_non_empty_list_header! {
    #[header(name = ::http::header::CONTENT_ENCODING, sep = Comma, parse = ContentCoding::parse)]
    /// `Content-Encoding` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-8.4)
    ///
    /// The `Content-Encoding` header field indicates what content codings
    /// have been applied to the representation, beyond those inherent in the
    /// media type. Neither parameters nor the `*` wildcard are allowed.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Content-Encoding = 1#content-coding
    /// ```
    ///
    /// # Example values
    ///
    /// * `gzip`
    /// * `br`
    /// * `deflate, zstd`
    ///
    /// # Examples
    ///
    /// ```
    /// use fieldval_headers::ContentEncoding;
    ///
    /// let content_enc = ContentEncoding::gzip();
    /// assert!(content_enc.contains(&fieldval_headers::specifier::ContentCoding::Gzip));
    /// ```
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ContentEncoding(NonEmptyVec<ContentCoding>);
}

impl ContentEncoding {
    /// A constructor to easily create a `Content-Encoding: gzip` header.
    #[inline]
    #[must_use]
    pub fn gzip() -> Self {
        Self::new(ContentCoding::Gzip)
    }

    /// A constructor to easily create a `Content-Encoding: br` header.
    #[inline]
    #[must_use]
    pub fn brotli() -> Self {
        Self::new(ContentCoding::Brotli)
    }

    /// A constructor to easily create a `Content-Encoding: zstd` header.
    #[inline]
    #[must_use]
    pub fn zstd() -> Self {
        Self::new(ContentCoding::Zstd)
    }

    /// Check if this header contains a given coding.
    #[must_use]
    pub fn contains(&self, coding: &ContentCoding) -> bool {
        self.iter().any(|c| c == coding)
    }
}
