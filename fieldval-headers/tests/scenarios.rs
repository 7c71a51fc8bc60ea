use fieldval_headers::grammar::ParseError;
use fieldval_headers::specifier::{
    Charset, CodingRange, ContentCoding, EncodedText, EntityTag, Quality,
};
use fieldval_headers::{
    AcceptEncoding, AcceptLanguage, AnyHeader, ContentRange, HeaderMapExt, HeaderRegistry,
    IfMatch, IfNoneMatch, ValueError,
};
use http::{HeaderMap, HeaderValue};

fn headers(name: &'static str, values: &[&'static str]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for value in values {
        map.append(name, HeaderValue::from_static(value));
    }
    map
}

#[test]
fn accept_encoding_with_weight() {
    let map = headers("accept-encoding", &["gzip;q=0.5"]);
    let accept = map.typed_get::<AcceptEncoding>().unwrap();
    let value = accept.first();
    assert_eq!(value.value(), &CodingRange::Coding(ContentCoding::Gzip));
    assert_eq!(value.quality(), Quality::new(500));
    assert_eq!(accept.to_string(), "gzip; q=0.5");

    let mut encoded = HeaderMap::new();
    encoded.typed_insert(accept);
    assert_eq!(encoded["accept-encoding"], "gzip; q=0.5");
}

#[test]
fn accept_language_keeps_declared_order() {
    let map = headers("accept-language", &["en-US,en;q=0.5"]);
    let accept = map.typed_get::<AcceptLanguage>().unwrap();
    let values: Vec<_> = accept
        .iter()
        .map(|value| (value.value().as_str().to_owned(), value.quality()))
        .collect();
    assert_eq!(
        values,
        [
            ("en-US".to_owned(), None),
            ("en".to_owned(), Quality::new(500)),
        ]
    );
}

#[test]
fn entity_tag_lists() {
    let map = headers("if-match", &["\"A\",\"B\""]);
    let if_match = map.typed_get::<IfMatch>().unwrap();
    let tags: Vec<_> = if_match.range().tags().collect();
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().all(|tag| !tag.is_weak()));
    assert_eq!(tags[0], &EntityTag::strong("A").unwrap());
    assert_eq!(tags[1], &EntityTag::strong("B").unwrap());

    let map = headers("if-none-match", &["W/\"A\",W/\"B\""]);
    let if_none_match = map.typed_get::<IfNoneMatch>().unwrap();
    let tags: Vec<_> = if_none_match.range().tags().collect();
    assert_eq!(tags.len(), 2);
    assert!(tags.iter().all(|tag| tag.is_weak()));
}

#[test]
fn encoded_text_utf8() {
    let text: EncodedText = "UTF-8''abc%20123".parse().unwrap();
    assert_eq!(text.charset(), &Charset::UTF_8);
    assert_eq!(text.language(), None);
    assert_eq!(text.value(), "abc 123");
}

#[test]
fn content_range_round_trips() {
    let map = headers("content-range", &["bytes 123-456/789"]);
    let range = map.typed_get::<ContentRange>().unwrap();
    assert_eq!(range.bytes_range(), Some((123, 456)));
    assert_eq!(range.bytes_len(), Some(789));
    assert_eq!(range.to_string(), "bytes 123-456/789");
}

#[test]
fn invalid_quality_names_the_parameter() {
    let map = headers("accept-encoding", &["*; q=ABC"]);
    let err = map.typed_try_get::<AcceptEncoding>().unwrap_err();
    assert_eq!(err.name(), "accept-encoding");
    assert_eq!(err.raw(), "*; q=ABC");
    match err.value_error() {
        ValueError::InvalidParameter {
            name,
            value,
            source,
        } => {
            assert_eq!(name, "q");
            assert_eq!(value, "ABC");
            assert!(matches!(
                source.as_ref(),
                ValueError::Syntax(ParseError::InvalidNumber { .. })
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("\"q\""));
}

#[test]
fn registry_dispatches_scenarios() {
    let registry = HeaderRegistry::new();
    for (name, input, expected) in [
        ("Accept-Encoding", "gzip;q=0.5", "gzip; q=0.5"),
        ("accept-language", "en-US,en;q=0.5", "en-US, en; q=0.5"),
        ("if-match", "\"A\",\"B\"", "\"A\", \"B\""),
        ("if-none-match", "W/\"A\",W/\"B\"", "W/\"A\", W/\"B\""),
        ("content-range", "bytes 123-456/789", "bytes 123-456/789"),
    ] {
        let header = registry.decode(name, input).unwrap().unwrap();
        assert_eq!(header.to_string(), expected, "{name}: {input}");
        assert_eq!(registry.encode(name, &header).unwrap(), expected);
    }

    let err = registry.decode("accept-encoding", "*; q=ABC").unwrap_err();
    assert!(matches!(
        err.value_error(),
        ValueError::InvalidParameter { name, .. } if name == "q"
    ));
}

#[test]
fn merging_headers_rejects_other_kinds() {
    let registry = HeaderRegistry::new();
    let first = registry.decode("accept-encoding", "gzip").unwrap().unwrap();
    let second = registry.decode("accept-encoding", "br;q=0.1").unwrap().unwrap();
    let merged = AcceptEncoding::try_from_headers([first.clone(), second]).unwrap();
    assert_eq!(merged.to_string(), "gzip, br; q=0.1");

    let other = registry.decode("content-length", "3").unwrap().unwrap();
    assert_eq!(
        AcceptEncoding::try_from_headers([first, other]),
        Err(ValueError::WrongType {
            expected: "accept-encoding",
            actual: "content-length",
        })
    );
    assert_eq!(
        AcceptEncoding::try_from_headers(Vec::<AnyHeader>::new()),
        Err(ValueError::EmptyList)
    );
}
