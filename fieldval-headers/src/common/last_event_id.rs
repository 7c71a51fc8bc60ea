use http::HeaderName;
use smol_str::SmolStr;
use std::fmt;

use crate::ValueError;
use crate::grammar::parse_unquoted_string;

static LAST_EVENT_ID: HeaderName = HeaderName::from_static("last-event-id");

/// `Last-Event-ID` header, defined in
/// [WhatWG's SSE spec](https://html.spec.whatwg.org/multipage/server-sent-events.html#the-last-event-id-header)
///
/// The `Last-Event-ID` HTTP request header reports an EventSource object's
/// last event ID string to the server when the user agent is to reestablish the connection.
///
/// The value is a string with the id of the last event, it can be
/// an empty string which acts a sort of "reset".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LastEventId(SmolStr);

impl LastEventId {
    /// Create an id, rejecting control characters.
    pub fn new(id: &str) -> Result<Self, ValueError> {
        id.parse()
    }

    /// Return the id as a borrowed string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse_text(text: &str, _config: &crate::DecodeConfig) -> Result<Self, ValueError> {
        if text.is_empty() {
            return Ok(Self(SmolStr::default()));
        }
        let id = parse_unquoted_string(text)?;
        Ok(Self(SmolStr::new(id)))
    }
}

impl AsRef<str> for LastEventId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LastEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

derive_header!(LastEventId, name: LAST_EVENT_ID);

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use crate::grammar::ParseError;

    #[test]
    fn test_decode_values() {
        let id: LastEventId = test_decode(&["42"]).unwrap();
        assert_eq!(id.as_str(), "42");
        let id: LastEventId = test_decode(&[""]).unwrap();
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn test_control_characters() {
        assert_eq!(
            LastEventId::new("ab\u{1}"),
            Err(ValueError::Syntax(ParseError::invalid_character('\u{1}', 2)))
        );
    }

    #[test]
    fn test_quote_and_backslash_rejected() {
        assert_eq!(
            "a\"b".parse::<LastEventId>(),
            Err(ValueError::Syntax(ParseError::invalid_character('"', 1)))
        );
        assert_eq!(
            LastEventId::new("id\\7"),
            Err(ValueError::Syntax(ParseError::invalid_character('\\', 2)))
        );
        assert_eq!(test_decode::<LastEventId>(&["evt\"1"]), None);
    }

    #[test]
    fn test_encode_value() {
        let headers = test_encode(LastEventId::new("evt-7").unwrap());
        assert_eq!(headers["last-event-id"], "evt-7");
    }
}
