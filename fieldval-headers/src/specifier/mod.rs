//! Specifiers that can be used as part of header values.
//!
//! These are the typed values the headers are built from: media types,
//! codings, charsets, languages, entity tags, ranges and so on. Each of
//! them validates its identity at construction, is immutable, and
//! serializes back to wire text through [`Display`](std::fmt::Display).
//!
//! Values that take part in content negotiation are wrapped in
//! [`Weighted`], which carries the `q` weight and its extension parameters.

mod quality;
#[doc(inline)]
pub use quality::Quality;

mod charset;
#[doc(inline)]
pub use charset::{Charset, CharsetName, CharsetOracle, WellKnownCharsets};

mod language;
#[doc(inline)]
pub use language::{LanguageRange, LanguageTag};

mod encoded_text;
#[doc(inline)]
pub use encoded_text::EncodedText;

pub(crate) mod parameters;
#[doc(inline)]
pub use parameters::{ParameterName, ParameterValue, Parameters};

mod media_type;
#[doc(inline)]
pub use media_type::MediaType;

mod coding;
#[doc(inline)]
pub use coding::{CodingRange, ContentCoding};

mod weighted;
#[doc(inline)]
pub use weighted::{
    AcceptCharsetValue, AcceptEncodingValue, AcceptLanguageValue, AcceptValue, Weighted,
    WeightedValue, sort_by_quality,
};

mod entity_tag;
#[doc(inline)]
pub use entity_tag::{EntityTag, EntityTagRange};

mod range;
#[doc(inline)]
pub use range::{RangeSpec, RangeUnit};

mod product;
#[doc(inline)]
pub use product::{Product, ProductItem, ProductItemRef, Products};

mod date;
#[doc(inline)]
pub use date::HttpDate;

mod link;
pub(crate) use link::read_uri_reference;
#[doc(inline)]
pub use link::{LinkRelation, LinkValue, RelationName};
