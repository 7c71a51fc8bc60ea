//! The typed headers that fieldval knows about.
//!
//! Each header wraps the value types of [`crate::specifier`] and
//! implements [`TypedHeader`](crate::TypedHeader),
//! [`HeaderDecode`](crate::HeaderDecode) and [`HeaderEncode`](crate::HeaderEncode).

pub use self::accept::Accept;
pub use self::accept_charset::AcceptCharset;
pub use self::accept_encoding::AcceptEncoding;
pub use self::accept_language::AcceptLanguage;
pub use self::age::Age;
pub use self::cache_control::{
    CacheControl, CacheControlDirective, CacheControlExtension, CacheControlFieldNames,
};
pub use self::content_encoding::ContentEncoding;
pub use self::content_language::ContentLanguage;
pub use self::content_length::ContentLength;
pub use self::content_range::ContentRange;
pub use self::content_type::ContentType;
pub use self::cookie::{Cookie, CookiePair};
pub use self::date::Date;
pub use self::etag::ETag;
pub use self::expires::Expires;
pub use self::if_match::IfMatch;
pub use self::if_modified_since::IfModifiedSince;
pub use self::if_none_match::IfNoneMatch;
pub use self::if_unmodified_since::IfUnmodifiedSince;
pub use self::last_event_id::LastEventId;
pub use self::last_modified::LastModified;
pub use self::link::Link;
pub use self::location::Location;
pub use self::max_forwards::MaxForwards;
pub use self::range::Range;
pub use self::referer::Referer;
pub use self::server::Server;
pub use self::user_agent::UserAgent;

#[cfg(test)]
fn test_decode<T: crate::HeaderDecode>(values: &[&str]) -> Option<T> {
    use crate::HeaderMapExt;
    let mut map = ::http::HeaderMap::new();
    for val in values {
        map.append(T::name(), val.parse().unwrap());
    }
    map.typed_get()
}

#[cfg(test)]
fn test_encode<T: crate::HeaderEncode>(header: T) -> ::http::HeaderMap {
    use crate::HeaderMapExt;
    let mut map = ::http::HeaderMap::new();
    map.typed_insert(header);
    map
}

mod accept;
mod accept_charset;
mod accept_encoding;
mod accept_language;
mod age;
mod cache_control;
mod content_encoding;
mod content_language;
mod content_length;
mod content_range;
mod content_type;
mod cookie;
mod date;
mod etag;
mod expires;
mod if_match;
mod if_modified_since;
mod if_none_match;
mod if_unmodified_since;
mod last_event_id;
mod last_modified;
mod link;
mod location;
mod max_forwards;
mod range;
mod referer;
mod server;
mod user_agent;
