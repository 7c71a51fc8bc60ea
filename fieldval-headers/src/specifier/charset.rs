use smol_str::SmolStr;
use std::{fmt, hash};

use crate::ValueError;
use crate::config::DecodeConfig;
use crate::grammar::{Cursor, ParseError};

/// A charset known by its canonical (IANA preferred) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Charset {
    canonical: SmolStr,
}

impl Charset {
    pub const UTF_8: Self = Self::from_static("UTF-8");
    pub const US_ASCII: Self = Self::from_static("US-ASCII");
    pub const ISO_8859_1: Self = Self::from_static("ISO-8859-1");
    pub const UTF_16: Self = Self::from_static("UTF-16");

    /// Create a charset from its canonical name.
    #[must_use]
    pub const fn from_static(canonical: &'static str) -> Self {
        Self {
            canonical: SmolStr::new_static(canonical),
        }
    }

    /// Create a charset from its canonical name, e.g. for a custom [`CharsetOracle`].
    #[must_use]
    pub fn new(canonical: &str) -> Self {
        Self {
            canonical: SmolStr::new(canonical),
        }
    }

    #[must_use]
    pub fn canonical_name(&self) -> &str {
        &self.canonical
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

/// Resolves charset names to a [`Charset`].
///
/// Called once per parsed charset name. Implementations
/// are expected to be cheap and side effect free.
pub trait CharsetOracle: Send + Sync + fmt::Debug {
    /// Resolve `name` (as written on the wire), `None` if not supported.
    fn resolve(&self, name: &str) -> Option<Charset>;
}

/// The built-in [`CharsetOracle`]: a static table of well-known
/// charsets and their common aliases.
#[derive(Debug, Clone, Copy, Default)]
pub struct WellKnownCharsets;

static WELL_KNOWN_CHARSETS: &[(&str, &[&str])] = &[
    ("UTF-8", &["utf8"]),
    (
        "US-ASCII",
        &["ascii", "us", "iso-ir-6", "ansi_x3.4-1968", "iso646-us", "cp367"],
    ),
    ("ISO-8859-1", &["latin1", "l1", "iso_8859-1", "iso-ir-100", "cp819"]),
    ("ISO-8859-2", &["latin2", "l2", "iso_8859-2"]),
    ("ISO-8859-3", &["latin3", "l3", "iso_8859-3"]),
    ("ISO-8859-4", &["latin4", "l4", "iso_8859-4"]),
    ("ISO-8859-5", &["cyrillic", "iso_8859-5"]),
    ("ISO-8859-6", &["arabic", "iso_8859-6"]),
    ("ISO-8859-7", &["greek", "iso_8859-7"]),
    ("ISO-8859-8", &["hebrew", "iso_8859-8"]),
    ("ISO-8859-9", &["latin5", "l5", "iso_8859-9"]),
    ("ISO-8859-10", &["latin6", "l6"]),
    ("ISO-8859-13", &[]),
    ("ISO-8859-14", &["latin8", "l8"]),
    ("ISO-8859-15", &["latin-9", "iso_8859-15"]),
    ("UTF-16", &["utf16"]),
    ("UTF-16BE", &[]),
    ("UTF-16LE", &[]),
    ("UTF-32", &["utf32"]),
    ("windows-1250", &["cp1250"]),
    ("windows-1251", &["cp1251"]),
    ("windows-1252", &["cp1252"]),
    ("windows-1253", &["cp1253"]),
    ("windows-1254", &["cp1254"]),
    ("windows-1255", &["cp1255"]),
    ("windows-1256", &["cp1256"]),
    ("windows-1257", &["cp1257"]),
    ("windows-1258", &["cp1258"]),
    ("KOI8-R", &[]),
    ("KOI8-U", &[]),
    ("Shift_JIS", &["ms_kanji", "csshiftjis", "sjis"]),
    ("EUC-JP", &[]),
    ("ISO-2022-JP", &[]),
    ("EUC-KR", &[]),
    ("GBK", &["cp936"]),
    ("GB18030", &[]),
    ("GB2312", &[]),
    ("Big5", &["csbig5"]),
];

impl CharsetOracle for WellKnownCharsets {
    fn resolve(&self, name: &str) -> Option<Charset> {
        WELL_KNOWN_CHARSETS
            .iter()
            .find(|(canonical, aliases)| {
                canonical.eq_ignore_ascii_case(name)
                    || aliases.iter().any(|alias| alias.eq_ignore_ascii_case(name))
            })
            .map(|&(canonical, _)| Charset::from_static(canonical))
    }
}

/// A charset name as it appears in a header value (e.g. `Accept-Charset`
/// or a `charset` parameter), resolved once at construction.
///
/// Two names are equal when they resolve to the same [`Charset`],
/// or, for unsupported names, when they match ASCII case-insensitively.
#[derive(Debug, Clone)]
pub enum CharsetName {
    Supported { name: SmolStr, charset: Charset },
    Unsupported(SmolStr),
    Wildcard,
}

impl CharsetName {
    /// A supported charset name, written as its canonical name.
    #[must_use]
    pub fn supported(charset: Charset) -> Self {
        Self::Supported {
            name: charset.canonical.clone(),
            charset,
        }
    }

    /// Validate `name` as a token (or `*`) and resolve it through
    /// the [`CharsetOracle`] of `config`.
    pub fn resolve(name: &str, config: &DecodeConfig) -> Result<Self, ValueError> {
        let mut cursor = Cursor::with_config(name, config);
        Self::parse(&mut cursor)
            .and_then(|value| cursor.finish().map(|()| value))
            .map_err(|err| ValueError::invalid_identity("charset", name, err))
    }

    pub(crate) fn parse(cursor: &mut Cursor<'_>) -> Result<Self, ParseError> {
        let name = cursor.read_token()?;
        if name == "*" {
            return Ok(Self::Wildcard);
        }
        Ok(match cursor.config().resolve_charset(name) {
            Some(charset) => Self::Supported {
                name: SmolStr::new(name),
                charset,
            },
            None => Self::Unsupported(SmolStr::new(name)),
        })
    }

    /// The name as it was written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Supported { name, .. } | Self::Unsupported(name) => name,
            Self::Wildcard => "*",
        }
    }

    #[must_use]
    pub fn charset(&self) -> Option<&Charset> {
        match self {
            Self::Supported { charset, .. } => Some(charset),
            Self::Unsupported(_) | Self::Wildcard => None,
        }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Does this (possibly wildcard) name accept `other`?
    ///
    /// Fails with [`ValueError::WildcardComparison`] if `other` is a wildcard.
    pub fn matches(&self, other: &Self) -> Result<bool, ValueError> {
        if other.is_wildcard() {
            return Err(ValueError::WildcardComparison);
        }
        Ok(self.is_wildcard() || self == other)
    }

    fn key(&self) -> (u8, String) {
        match self {
            Self::Supported { charset, .. } => (0, charset.canonical.to_ascii_lowercase()),
            Self::Unsupported(name) => (1, name.to_ascii_lowercase()),
            Self::Wildcard => (2, String::new()),
        }
    }
}

impl PartialEq for CharsetName {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Supported { charset: a, .. }, Self::Supported { charset: b, .. }) => {
                a.canonical.eq_ignore_ascii_case(&b.canonical)
            }
            (Self::Unsupported(a), Self::Unsupported(b)) => a.eq_ignore_ascii_case(b),
            (Self::Wildcard, Self::Wildcard) => true,
            _ => false,
        }
    }
}

impl Eq for CharsetName {}

impl hash::Hash for CharsetName {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<Charset> for CharsetName {
    fn from(charset: Charset) -> Self {
        Self::supported(charset)
    }
}

impl fmt::Display for CharsetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CharsetName {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s, DecodeConfig::global())
    }
}
