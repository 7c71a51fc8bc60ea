use iri_string::types::{UriReferenceStr, UriReferenceString};

use crate::ValueError;
use crate::specifier::read_uri_reference;

derive_value_header! {
    #[header(name = ::http::header::LOCATION, parse = read_uri_reference)]
    /// `Location` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.2.2)
    ///
    /// The `Location` header field is used in some responses to refer to a
    /// specific resource in relation to the response.  The type of
    /// relationship is defined by the combination of request method and
    /// status code semantics.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Location = URI-reference
    /// ```
    ///
    /// # Example values
    /// * `/People.html#tim`
    /// * `http://www.example.net/index.html`
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Location(UriReferenceString);
}

impl Location {
    /// Create a `Location` from a (relative or absolute) URI reference.
    pub fn new(uri: &str) -> Result<Self, ValueError> {
        uri.parse()
    }

    #[must_use]
    pub fn uri(&self) -> &UriReferenceStr {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use crate::grammar::ParseError;

    #[test]
    fn absolute_uri() {
        let s = "http://www.example.net/index.html";
        let loc = test_decode::<Location>(&[s]).unwrap();
        assert_eq!(loc.uri().as_str(), s);
        assert_eq!(test_encode(loc)["location"], s);
    }

    #[test]
    fn relative_uri_with_fragment() {
        let s = "/People.html#tim";
        let loc = test_decode::<Location>(&[s]).unwrap();
        assert_eq!(loc, Location::new(s).unwrap());
    }

    #[test]
    fn invalid_uri() {
        assert_eq!(
            "/a b".parse::<Location>(),
            Err(ValueError::Syntax(ParseError::invalid_character('b', 3)))
        );
        assert_eq!(
            "".parse::<Location>(),
            Err(ValueError::Syntax(ParseError::missing_value(0)))
        );
        assert!(matches!(
            Location::new("http://[::1/"),
            Err(ValueError::InvalidUri { .. })
        ));
    }
}
