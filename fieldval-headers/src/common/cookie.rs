use smol_str::SmolStr;
use std::fmt;

use crate::ValueError;
use crate::grammar::{Cursor, ParseError};

/// `cookie-octet = %x21 / %x23-2B / %x2D-3A / %x3C-5B / %x5D-7E`
const fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}

/// A single `name=value` pair of a `Cookie` header.
///
/// The value is kept as it was sent, no decoding is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CookiePair {
    name: SmolStr,
    value: SmolStr,
    quoted: bool,
}

impl CookiePair {
    /// Create a pair, validating the name as a token
    /// and the value as a sequence of cookie octets.
    pub fn new(name: &str, value: &str) -> Result<Self, ValueError> {
        let mut cursor = Cursor::new(name);
        cursor
            .read_token()
            .and_then(|_| cursor.finish())
            .map_err(|err| ValueError::invalid_identity("cookie name", name, err))?;
        if let Some((offset, c)) = value
            .char_indices()
            .find(|(_, c)| !c.is_ascii() || !is_cookie_octet(*c as u8))
        {
            return Err(ValueError::invalid_identity(
                "cookie value",
                value,
                ParseError::invalid_character(c, offset),
            ));
        }
        Ok(Self {
            name: SmolStr::new(name),
            value: SmolStr::new(value),
            quoted: false,
        })
    }

    /// Same as [`CookiePair::new`], serializing the value between double quotes.
    pub fn new_quoted(name: &str, value: &str) -> Result<Self, ValueError> {
        Self::new(name, value).map(|pair| Self {
            quoted: true,
            ..pair
        })
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        let name = SmolStr::new(cursor.read_token()?);
        cursor.expect('=')?;
        let quoted = cursor.try_consume('"');
        let value = SmolStr::new(cursor.read_while(is_cookie_octet));
        if quoted {
            cursor.expect('"')?;
        }
        Ok(Self {
            name,
            value,
            quoted,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the value was (or will be) written between double quotes.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }
}

impl fmt::Display for CookiePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "{}=\"{}\"", self.name, self.value)
        } else {
            write!(f, "{}={}", self.name, self.value)
        }
    }
}

derive_non_empty_list_header! {
    #[header(name = ::http::header::COOKIE, sep = Semicolon, parse = CookiePair::parse)]
    /// `Cookie` header, defined in [RFC6265](https://datatracker.ietf.org/doc/html/rfc6265#section-5.4)
    ///
    /// The pairs keep their declared order, duplicate names included.
    /// Multiple field lines are joined with `; `.
    ///
    /// # ABNF
    ///
    /// ```text
    /// cookie-header = "Cookie:" OWS cookie-string OWS
    /// cookie-string = cookie-pair *( ";" SP cookie-pair )
    /// cookie-pair   = cookie-name "=" cookie-value
    /// cookie-value  = *cookie-octet / ( DQUOTE *cookie-octet DQUOTE )
    /// ```
    ///
    /// # Example values
    ///
    /// * `SID=31d4d96e407aad42`
    /// * `SID=31d4d96e407aad42; lang=en-US`
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Cookie(NonEmptyVec<CookiePair>);
}

impl Cookie {
    /// The value of the first pair with this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|pair| pair.name() == name)
            .map(CookiePair::value)
    }

    /// All pair names, in declared order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(CookiePair::name)
    }
}
