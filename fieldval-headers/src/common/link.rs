use crate::specifier::{LinkRelation, LinkValue};

derive_non_empty_list_header! {
    #[header(name = ::http::header::LINK, sep = Comma, parse = LinkValue::parse)]
    /// `Link` header, defined in [RFC8288](https://datatracker.ietf.org/doc/html/rfc8288#section-3)
    ///
    /// The `Link` header field provides a means for serializing one or
    /// more links into HTTP headers. Each link has a target URI reference,
    /// zero or more relation types and optional target attributes.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Link       = #link-value
    /// link-value = "<" URI-Reference ">" *( OWS ";" OWS link-param )
    /// link-param = token BWS [ "=" BWS ( token / quoted-string ) ]
    /// ```
    ///
    /// # Example values
    ///
    /// * `<http://example.com/TheBook/chapter2>; rel="previous"; title="previous chapter"`
    /// * `</>; rel="http://example.net/foo"`
    /// * `</style.css>; rel=preload; as=style, </app.js>; rel=preload; as=script`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Link(NonEmptyVec<LinkValue>);
}

impl Link {
    /// The links having the given relation type, in declared order.
    pub fn with_relation<'a>(
        &'a self,
        relation: &'a LinkRelation,
    ) -> impl Iterator<Item = &'a LinkValue> + 'a {
        self.iter().filter(move |link| link.has_relation(relation))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use crate::ValueError;
    use crate::grammar::ParseError;
    use crate::specifier::RelationName;

    #[test]
    fn test_decode_values() {
        let link: Link = test_decode(&[
            "<https://api.example.com/items?page=2>; rel=next, <https://api.example.com/items?page=9>; rel=\"last\"",
            "<https://api.example.com/a,b>; rel=alternate",
        ])
        .unwrap();
        assert_eq!(link.len(), 3);

        let next = LinkRelation::Named(RelationName::Next);
        let targets: Vec<_> = link
            .with_relation(&next)
            .map(|link| link.target().as_str())
            .collect();
        assert_eq!(targets, ["https://api.example.com/items?page=2"]);
        assert_eq!(
            link.iter().nth(2).unwrap().target().as_str(),
            "https://api.example.com/a,b"
        );
    }

    #[test]
    fn test_decode_invalid() {
        for (input, expected) in [
            ("", ParseError::missing_value(0)),
            ("</a>,", ParseError::missing_value(5)),
            ("</a> </b>", ParseError::invalid_character('<', 5)),
            ("</a", ParseError::missing_value(3)),
        ] {
            assert_eq!(
                input.parse::<Link>(),
                Err(ValueError::Syntax(expected)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_encode_value() {
        let link = Link::try_from_iter([
            LinkValue::new("/style.css")
                .unwrap()
                .with_relation(RelationName::Preload),
            LinkValue::new("https://example.com/")
                .unwrap()
                .with_relation(LinkRelation::SelfRel),
        ])
        .unwrap();
        let headers = test_encode(link);
        assert_eq!(
            headers["link"],
            "</style.css>; rel=preload, <https://example.com/>; rel=self"
        );
    }
}
