//! The shared header field grammar.
//!
//! Built around a [`Cursor`] that knows how to read the lexemes common to
//! all header values (RFC 9110 §5.6): tokens, quoted-strings, comments,
//! parameters and lists. The typed values in [`crate::specifier`] and the
//! headers build their own recursive-descent parsers on top of it.
//!
//! All offsets reported by [`ParseError`] are byte offsets into the text
//! that was handed to the cursor.

mod cursor;
#[doc(inline)]
pub use cursor::{Cursor, Mark, is_ctl, is_separator, is_token, is_token_char, is_whitespace};

mod error;
#[doc(inline)]
pub use error::{ParseError, ParseErrorKind};

mod parse;
pub(crate) use parse::read_number;
#[doc(inline)]
pub use parse::{
    RawParameter, TokenOrWildcard, parse_delimited, parse_list, parse_number, parse_parameters,
    parse_quoted_string, parse_token, parse_token_list, parse_token_or_wildcard,
    parse_token_with_parameters, parse_unquoted_string,
};
