use crate::specifier::{Product, Products};

derive_value_header! {
    #[header(name = ::http::header::USER_AGENT, parse = Products::parse)]
    /// `User-Agent` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.1.5)
    ///
    /// The `User-Agent` header field contains information about the user
    /// agent originating the request, which is often used by servers to help
    /// identify the scope of reported interoperability problems, to work
    /// around or tailor responses to avoid particular user agent
    /// limitations, and for analytics regarding browser or operating system
    /// use.
    ///
    /// # ABNF
    ///
    /// ```text
    /// User-Agent = product *( RWS ( product / comment ) )
    /// product         = token ["/" product-version]
    /// product-version = token
    /// ```
    ///
    /// # Example values
    ///
    /// * `CERN-LineMode/2.15 libwww/2.17b3`
    /// * `Bunnies`
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct UserAgent(Products);
}

impl UserAgent {
    #[must_use]
    pub fn products(&self) -> &Products {
        &self.0
    }

    /// The leading product.
    #[must_use]
    pub fn product(&self) -> &Product {
        self.0.product()
    }
}
