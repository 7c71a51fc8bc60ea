use smol_str::SmolStr;
use std::{fmt, str::FromStr, time::SystemTime};

use crate::ValueError;
use crate::grammar::{Cursor, ParseError, is_ctl};

/// A timestamp with HTTP formatting and parsing.
///
/// Parses the three formats allowed by
/// [RFC 9110](https://www.rfc-editor.org/rfc/rfc9110#section-5.6.7)
/// (IMF-fixdate, obsolete RFC 850 and asctime), always formats as IMF-fixdate.
///
/// ```text
/// Sun, 06 Nov 1994 08:49:37 GMT  ; IMF-fixdate
/// Sunday, 06-Nov-94 08:49:37 GMT ; obsolete RFC 850 format
/// Sun Nov  6 08:49:37 1994       ; ANSI C's asctime() format
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HttpDate(httpdate::HttpDate);

impl HttpDate {
    fn parse_text(text: &str) -> Result<Self, ValueError> {
        let mut cursor = Cursor::new(text);
        cursor.skip_whitespace();
        if cursor.at_end() {
            return Err(ParseError::missing_value(cursor.position()).into());
        }
        if let Some((offset, c)) = text
            .char_indices()
            .find(|(_, c)| c.is_ascii() && is_ctl(*c as u8))
        {
            return Err(ParseError::invalid_character(c, offset).into());
        }
        let trimmed = text.trim_matches([' ', '\t']);
        trimmed
            .parse()
            .map(Self)
            .map_err(|_| ValueError::InvalidDate {
                value: SmolStr::new(trimmed),
            })
    }
}

impl FromStr for HttpDate {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_text(s)
    }
}

impl fmt::Display for HttpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<SystemTime> for HttpDate {
    fn from(sys: SystemTime) -> Self {
        Self(sys.into())
    }
}

impl From<HttpDate> for SystemTime {
    fn from(date: HttpDate) -> Self {
        date.0.into()
    }
}
