use iri_string::types::{UriReferenceStr, UriReferenceString};

use crate::ValueError;
use crate::grammar::Cursor;
use crate::specifier::read_uri_reference;

fn read_referer(cursor: &mut Cursor<'_>) -> Result<UriReferenceString, ValueError> {
    let uri = read_uri_reference(cursor)?;
    if uri.fragment().is_some() {
        return Err(ValueError::InvalidUri {
            value: uri.as_str().into(),
            reason: "a referer has no fragment".into(),
        });
    }
    Ok(uri)
}

derive_value_header! {
    #[header(name = ::http::header::REFERER, parse = read_referer)]
    /// `Referer` header, defined in
    /// [RFC9110](https://www.rfc-editor.org/rfc/rfc9110#section-10.1.3)
    ///
    /// The `Referer` \[sic\] header field allows the user agent to specify a
    /// URI reference for the resource from which the target URI was obtained
    /// (i.e., the "referrer", though the field name is misspelled).  A user
    /// agent MUST NOT include the fragment and userinfo components of the
    /// URI reference, if any, when generating the Referer field value.
    ///
    /// ## ABNF
    ///
    /// ```text
    /// Referer = absolute-URI / partial-URI
    /// ```
    ///
    /// ## Example values
    ///
    /// * `http://www.example.org/hypertext/Overview.html`
    /// * `/People.html`
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Referer(UriReferenceString);
}

impl Referer {
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
    use super::super::test_decode;
    use super::*;

    #[test]
    fn test_decode_values() {
        for s in ["http://www.example.org/hypertext/Overview.html", "/People.html?a=1"] {
            let referer = test_decode::<Referer>(&[s]).unwrap();
            assert_eq!(referer.to_string(), s);
        }
    }

    #[test]
    fn test_fragment_rejected() {
        assert!(matches!(
            Referer::new("/People.html#tim"),
            Err(ValueError::InvalidUri { .. })
        ));
    }
}
