use crate::specifier::Products;

derive_value_header! {
    #[header(name = ::http::header::SERVER, parse = Products::parse)]
    /// `Server` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.2.4)
    ///
    /// The `Server` header field contains information about the software
    /// used by the origin server to handle the request.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Server = product *( RWS ( product / comment ) )
    /// ```
    ///
    /// # Example values
    ///
    /// * `CERN/3.0 libwww/2.17`
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Server(Products);
}

impl Server {
    #[must_use]
    pub fn products(&self) -> &Products {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_decode;
    use super::*;
    use crate::specifier::{Product, ProductItemRef};

    #[test]
    fn test_decode_with_comment() {
        let server: Server = test_decode(&["nginx/1.25.3 (Ubuntu)"]).unwrap();
        let items: Vec<_> = server.products().iter().collect();
        assert_eq!(items[1], ProductItemRef::Comment("Ubuntu"));
        assert_eq!(server.to_string(), "nginx/1.25.3 (Ubuntu)");
    }

    #[test]
    fn test_from_products() {
        let server = Server::from(Products::new(Product::new("fieldval", None).unwrap()));
        assert_eq!(server.to_string(), "fieldval");
    }
}
