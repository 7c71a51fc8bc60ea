use std::borrow::Cow;

use fieldval_core::telemetry::tracing;
use fieldval_utils::collections::NonEmptyVec;
use smol_str::{SmolStr, format_smolstr};

use super::{Cursor, ParseError, is_ctl};
use crate::config::DecodeConfig;

/// A token or the `*` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrWildcard<'a> {
    Wildcard,
    Token(&'a str),
}

/// A parameter exactly as it appeared on the wire,
/// before any family specific typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawParameter<'a> {
    pub name: &'a str,
    pub value: Cow<'a, str>,
    /// `true` if the value was written as a quoted-string.
    pub quoted: bool,
    /// Byte offset of the first character of the value.
    pub value_offset: usize,
}

/// Read `*( OWS ";" OWS name OWS "=" OWS value )`.
///
/// Stops (without consuming) at the first character that is not a `;`
/// after optional whitespace, leaving list separators to the caller.
pub fn parse_parameters<'a>(cursor: &mut Cursor<'a>) -> Result<Vec<RawParameter<'a>>, ParseError> {
    let mut parameters = Vec::new();
    loop {
        let mark = cursor.mark();
        cursor.skip_whitespace();
        if !cursor.try_consume(';') {
            cursor.reset(mark);
            return Ok(parameters);
        }
        cursor.skip_whitespace();
        let name = cursor.read_token()?;
        cursor.skip_whitespace();
        if !cursor.try_consume('=') {
            return Err(ParseError::MissingParameterValue {
                name: SmolStr::new(name),
                offset: cursor.position(),
            });
        }
        cursor.skip_whitespace();
        let value_offset = cursor.position();
        let (value, quoted) = match cursor.peek() {
            Some('"') => (Cow::Owned(cursor.read_quoted_string()?), true),
            Some(c) if c.is_ascii() && super::is_token_char(c as u8) => {
                (Cow::Borrowed(cursor.read_token()?), false)
            }
            None | Some(';' | ',') => {
                return Err(ParseError::MissingParameterValue {
                    name: SmolStr::new(name),
                    offset: value_offset,
                });
            }
            Some(c) => return Err(ParseError::invalid_character(c, value_offset)),
        };
        parameters.push(RawParameter {
            name,
            value,
            quoted,
            value_offset,
        });
    }
}

/// Parse a `#element` list separated by commas, see [`parse_delimited`].
pub fn parse_list<'a, T, E, F>(cursor: &mut Cursor<'a>, element: F) -> Result<NonEmptyVec<T>, E>
where
    E: From<ParseError>,
    F: FnMut(&mut Cursor<'a>) -> Result<T, E>,
{
    parse_delimited(cursor, ',', element)
}

/// Parse a non-empty list of elements separated by `separator`.
///
/// Whitespace around elements and separators is skipped. An empty
/// element (consecutive, leading or trailing separators) fails with
/// [`ParseError::MissingValue`] at the position right after the
/// previous separator, unless the [`DecodeConfig`] of the cursor
/// enables lenient empty elements, in which case they are skipped.
/// More than [`DecodeConfig::max_list_items`] elements fail with
/// [`ParseError::OutOfRange`].
pub fn parse_delimited<'a, T, E, F>(
    cursor: &mut Cursor<'a>,
    separator: char,
    mut element: F,
) -> Result<NonEmptyVec<T>, E>
where
    E: From<ParseError>,
    F: FnMut(&mut Cursor<'a>) -> Result<T, E>,
{
    let config = cursor.config();
    let mut items = Vec::new();
    cursor.skip_whitespace();
    let mut element_start = cursor.position();

    loop {
        cursor.skip_whitespace();
        let empty = cursor.at_end() || cursor.peek() == Some(separator);
        if empty {
            if !config.lenient_empty_elements() {
                return Err(ParseError::missing_value(element_start).into());
            }
            tracing::trace!(offset = element_start, "skipping empty list element");
        } else {
            items.push(element(cursor)?);
            if items.len() > config.max_list_items() {
                return Err(ParseError::OutOfRange {
                    value: format_smolstr!("{}", items.len()),
                    min: 1,
                    max: config.max_list_items() as u64,
                }
                .into());
            }
            cursor.skip_whitespace();
        }

        if cursor.at_end() {
            break;
        }
        cursor.expect(separator)?;
        element_start = cursor.position();
    }

    NonEmptyVec::from_vec(items).ok_or_else(|| ParseError::missing_value(cursor.position()).into())
}

/// Parse a text that consists of exactly one token.
pub fn parse_token(text: &str) -> Result<&str, ParseError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    let token = cursor.read_token()?;
    cursor.finish()?;
    Ok(token)
}

/// Parse a text that consists of exactly one token or `*`.
pub fn parse_token_or_wildcard(text: &str) -> Result<TokenOrWildcard<'_>, ParseError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    let token = cursor.read_token()?;
    cursor.finish()?;
    Ok(if token == "*" {
        TokenOrWildcard::Wildcard
    } else {
        TokenOrWildcard::Token(token)
    })
}

/// Parse a comma separated list of tokens.
pub fn parse_token_list<'a>(
    text: &'a str,
    config: &'a DecodeConfig,
) -> Result<NonEmptyVec<&'a str>, ParseError> {
    let mut cursor = Cursor::with_config(text, config);
    let tokens = parse_list(&mut cursor, |cursor| cursor.read_token())?;
    cursor.finish()?;
    Ok(tokens)
}

/// Read a token followed by its parameters, e.g. `gzip; q=0.5`.
pub fn parse_token_with_parameters<'a>(
    cursor: &mut Cursor<'a>,
) -> Result<(&'a str, Vec<RawParameter<'a>>), ParseError> {
    cursor.skip_whitespace();
    let token = cursor.read_token()?;
    let parameters = parse_parameters(cursor)?;
    Ok((token, parameters))
}

/// Parse a text that consists of exactly one quoted-string,
/// returning its unescaped content.
pub fn parse_quoted_string(text: &str) -> Result<String, ParseError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    let value = cursor.read_quoted_string()?;
    cursor.finish()?;
    Ok(value)
}

/// Parse free text: any visible character, space, tab or `obs-text`.
///
/// Unlike most grammars the surrounding whitespace is kept.
/// Control characters, `"` and `\` are rejected.
pub fn parse_unquoted_string(text: &str) -> Result<&str, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyText);
    }
    match text
        .char_indices()
        .find(|(_, c)| {
            matches!(*c, '"' | '\\') || (*c != '\t' && c.is_ascii() && is_ctl(*c as u8))
        })
    {
        Some((offset, c)) => Err(ParseError::invalid_character(c, offset)),
        None => Ok(text),
    }
}

/// Parse a text that consists of exactly one non-negative decimal number.
pub fn parse_number(text: &str) -> Result<u64, ParseError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    let n = read_number(&mut cursor)?;
    cursor.finish()?;
    Ok(n)
}

/// Read digits and convert them into a number,
/// failing with [`ParseError::OutOfRange`] on overflow.
pub(crate) fn read_number(cursor: &mut Cursor<'_>) -> Result<u64, ParseError> {
    let digits = cursor.read_digits()?;
    digits.parse().map_err(|_| ParseError::OutOfRange {
        value: SmolStr::new(digits),
        min: 0,
        max: u64::MAX,
    })
}
