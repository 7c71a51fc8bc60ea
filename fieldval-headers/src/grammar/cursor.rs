use super::ParseError;
use crate::config::{DEFAULT_DECODE_CONFIG, DecodeConfig};

/// `tchar` as defined in RFC 9110 §5.6.2.
///
/// ```text
/// tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*"
///       / "+" / "-" / "." / "^" / "_" / "`" / "|" / "~"
///       / DIGIT / ALPHA
/// ```
#[must_use]
pub const fn is_token_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~'
    ) || b.is_ascii_alphanumeric()
}

/// `OWS` characters: space and horizontal tab.
#[must_use]
pub const fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// The delimiters that end a token.
#[must_use]
pub const fn is_separator(b: u8) -> bool {
    matches!(
        b,
        b'(' | b')'
            | b'<'
            | b'>'
            | b'@'
            | b','
            | b';'
            | b':'
            | b'\\'
            | b'"'
            | b'/'
            | b'['
            | b']'
            | b'?'
            | b'='
            | b'{'
            | b'}'
            | b' '
            | b'\t'
    )
}

/// Control characters (`%x00-1F` and `DEL`).
#[must_use]
pub const fn is_ctl(b: u8) -> bool {
    b < 0x20 || b == 0x7f
}

/// Returns `true` if `s` is a non-empty token.
#[must_use]
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_char)
}

/// Characters that may appear inside a quoted-string or a comment
/// after unescaping. Non-ASCII input is `obs-text`.
const fn is_text_char(c: char) -> bool {
    c == '\t' || (c as u32 >= 0x20 && c as u32 != 0x7f)
}

/// A saved cursor position, see [`Cursor::mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// Position tracking scanner over a single header field value.
///
/// The cursor knows nothing about specific header grammars: it only
/// classifies characters and reads the shared lexemes (tokens,
/// quoted-strings, comments, quality values, digits). Readers only
/// advance on success, on failure the cursor is left at the offending
/// character.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    config: &'a DecodeConfig,
}

impl<'a> Cursor<'a> {
    /// Create a cursor using the default [`DecodeConfig`].
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self::with_config(text, &DEFAULT_DECODE_CONFIG)
    }

    #[must_use]
    pub fn with_config(text: &'a str, config: &'a DecodeConfig) -> Self {
        Self {
            text,
            pos: 0,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &'a DecodeConfig {
        self.config
    }

    /// The full text this cursor scans.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    #[must_use]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Current byte offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    #[must_use]
    pub fn peek_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Consume and return the next character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    #[must_use]
    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }

    /// The text that has not been consumed yet.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        self.text.get(self.pos..).unwrap_or_default()
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek_byte().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    /// Consume `c` if it is the next character.
    pub fn try_consume(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `c` or fail at the current position.
    pub fn expect(&mut self, c: char) -> Result<(), ParseError> {
        if self.try_consume(c) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// The error for "something else was expected here":
    /// [`ParseError::InvalidCharacter`] for the next character,
    /// or [`ParseError::MissingValue`] at the end of the text.
    #[must_use]
    pub fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(c) => ParseError::invalid_character(c, self.pos),
            None => ParseError::missing_value(self.pos),
        }
    }

    /// Skip trailing whitespace and require the end of the text.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.at_end() {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Consume bytes as long as `f` holds, returning the consumed slice.
    pub fn read_while(&mut self, f: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii() && f(bytes[self.pos]) {
            self.pos += 1;
        }
        &self.text[start..self.pos]
    }

    /// Read a non-empty `token`.
    pub fn read_token(&mut self) -> Result<&'a str, ParseError> {
        let token = self.read_while(is_token_char);
        if token.is_empty() {
            Err(self.unexpected())
        } else {
            Ok(token)
        }
    }

    /// Read a non-empty run of ASCII digits.
    pub fn read_digits(&mut self) -> Result<&'a str, ParseError> {
        let digits = self.read_while(|b| b.is_ascii_digit());
        if digits.is_empty() {
            Err(self.unexpected())
        } else {
            Ok(digits)
        }
    }

    /// Read the lexeme of a quality value, `DIGIT [ "." 0*3DIGIT ]`.
    ///
    /// Only the shape is checked here, the range is up to
    /// [`Quality`](crate::specifier::Quality).
    pub fn read_quality_value(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        match self.peek_byte() {
            Some(b) if b.is_ascii_digit() => self.pos += 1,
            _ => return Err(self.unexpected()),
        }
        if self.try_consume('.') {
            let mut decimals = 0;
            while decimals < 3 && self.peek_byte().is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
                decimals += 1;
            }
        }
        Ok(&self.text[start..self.pos])
    }

    /// Read a quoted-string, returning its unescaped content.
    ///
    /// Fails with [`ParseError::UnterminatedQuotedString`] pointing at
    /// the opening quote when the closing quote is missing.
    pub fn read_quoted_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.expect('"')?;
        let mut value = String::new();
        loop {
            let at = self.pos;
            match self.advance() {
                None => {
                    self.pos = start;
                    return Err(ParseError::UnterminatedQuotedString { offset: start });
                }
                Some('"') => return Ok(value),
                Some('\\') => match self.advance() {
                    Some(c) if is_text_char(c) => value.push(c),
                    Some(c) => {
                        self.pos = at + 1;
                        return Err(ParseError::invalid_character(c, at + 1));
                    }
                    None => {
                        self.pos = start;
                        return Err(ParseError::UnterminatedQuotedString { offset: start });
                    }
                },
                Some(c) if is_text_char(c) => value.push(c),
                Some(c) => {
                    self.pos = at;
                    return Err(ParseError::invalid_character(c, at));
                }
            }
        }
    }

    /// Read a (possibly nested) comment, returning the raw text
    /// between the outer parentheses, escapes left as-is.
    ///
    /// A comment that is never closed fails with
    /// [`ParseError::MissingValue`] at the end of the text.
    pub fn read_comment(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        self.expect('(')?;
        let mut depth = 1usize;
        loop {
            let at = self.pos;
            match self.advance() {
                None => {
                    let end = self.text.len();
                    self.pos = start;
                    return Err(ParseError::missing_value(end));
                }
                Some('(') => depth += 1,
                Some(')') => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&self.text[start + 1..at]);
                    }
                }
                Some('\\') => match self.advance() {
                    Some(c) if is_text_char(c) => {}
                    Some(c) => {
                        self.pos = at + 1;
                        return Err(ParseError::invalid_character(c, at + 1));
                    }
                    None => {
                        let end = self.text.len();
                        self.pos = start;
                        return Err(ParseError::missing_value(end));
                    }
                },
                Some(c) if is_text_char(c) => {}
                Some(c) => {
                    self.pos = at;
                    return Err(ParseError::invalid_character(c, at));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classifiers() {
        for b in b"abcXYZ019!#$%&'*+-.^_`|~" {
            assert!(is_token_char(*b), "{}", *b as char);
            assert!(!is_separator(*b), "{}", *b as char);
        }
        for b in b"()<>@,;:\\\"/[]?={} \t" {
            assert!(!is_token_char(*b), "{}", *b as char);
            assert!(is_separator(*b), "{}", *b as char);
        }
        assert!(is_whitespace(b' '));
        assert!(is_whitespace(b'\t'));
        assert!(!is_whitespace(b'\n'));
        assert!(is_ctl(0));
        assert!(is_ctl(b'\n'));
        assert!(is_ctl(0x7f));
        assert!(!is_ctl(b'a'));
    }

    #[test]
    fn test_peek_advance_position() {
        let mut cursor = Cursor::new("aé b");
        assert_eq!(cursor.peek(), Some('a'));
        assert_eq!(cursor.advance(), Some('a'));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.advance(), Some('é'));
        assert_eq!(cursor.position(), 3);
        cursor.skip_whitespace();
        assert_eq!(cursor.rest(), "b");
        assert_eq!(cursor.peek_byte(), Some(b'b'));
        cursor.advance();
        assert!(cursor.at_end());
        assert_eq!(cursor.advance(), None);
    }

    #[test]
    fn test_mark_reset() {
        let mut cursor = Cursor::new("token rest");
        let mark = cursor.mark();
        assert_eq!(cursor.read_token().unwrap(), "token");
        cursor.reset(mark);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_expect() {
        let mut cursor = Cursor::new("=x");
        cursor.expect('=').unwrap();
        assert_eq!(
            cursor.expect('='),
            Err(ParseError::invalid_character('x', 1))
        );
        assert_eq!(cursor.position(), 1);
        cursor.advance();
        assert_eq!(cursor.expect('='), Err(ParseError::missing_value(2)));
    }

    #[test]
    fn test_read_token() {
        let mut cursor = Cursor::new("gzip;q=1");
        assert_eq!(cursor.read_token().unwrap(), "gzip");
        assert_eq!(
            cursor.read_token(),
            Err(ParseError::invalid_character(';', 4))
        );
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_read_quoted_string() {
        for (input, expected, rest) in [
            (r#""""#, "", ""),
            (r#""abc" x"#, "abc", " x"),
            (r#""a\"b""#, "a\"b", ""),
            (r#""a, b; c""#, "a, b; c", ""),
            (r#""a\\b""#, "a\\b", ""),
        ] {
            let mut cursor = Cursor::new(input);
            assert_eq!(cursor.read_quoted_string().unwrap(), expected, "{input}");
            assert_eq!(cursor.rest(), rest, "{input}");
        }
    }

    #[test]
    fn test_read_quoted_string_errors() {
        let mut cursor = Cursor::new("x \"abc");
        cursor.advance();
        cursor.skip_whitespace();
        assert_eq!(
            cursor.read_quoted_string(),
            Err(ParseError::UnterminatedQuotedString { offset: 2 })
        );
        assert_eq!(cursor.position(), 2);

        let mut cursor = Cursor::new("\"a\u{1}b\"");
        assert_eq!(
            cursor.read_quoted_string(),
            Err(ParseError::invalid_character('\u{1}', 2))
        );

        let mut cursor = Cursor::new("abc");
        assert_eq!(
            cursor.read_quoted_string(),
            Err(ParseError::invalid_character('a', 0))
        );
    }

    #[test]
    fn test_read_comment() {
        let mut cursor = Cursor::new("(Windows NT 10.0; (nested) \\) x) rest");
        assert_eq!(
            cursor.read_comment().unwrap(),
            "Windows NT 10.0; (nested) \\) x"
        );
        assert_eq!(cursor.rest(), " rest");

        let mut cursor = Cursor::new("(a (b)");
        assert_eq!(cursor.read_comment(), Err(ParseError::missing_value(6)));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_read_quality_value() {
        for (input, lexeme, rest) in [
            ("1", "1", ""),
            ("0.5", "0.5", ""),
            ("0.", "0.", ""),
            ("0.125", "0.125", ""),
            ("0.1255", "0.125", "5"),
            ("1;", "1", ";"),
        ] {
            let mut cursor = Cursor::new(input);
            assert_eq!(cursor.read_quality_value().unwrap(), lexeme, "{input}");
            assert_eq!(cursor.rest(), rest, "{input}");
        }
        assert_eq!(
            Cursor::new("ABC").read_quality_value(),
            Err(ParseError::invalid_character('A', 0))
        );
    }

    #[test]
    fn test_read_digits() {
        let mut cursor = Cursor::new("123-456");
        assert_eq!(cursor.read_digits().unwrap(), "123");
        assert_eq!(
            cursor.read_digits(),
            Err(ParseError::invalid_character('-', 3))
        );
        assert_eq!(Cursor::new("").read_digits(), Err(ParseError::missing_value(0)));
    }

    #[test]
    fn test_finish() {
        let mut cursor = Cursor::new("a  ");
        cursor.advance();
        cursor.finish().unwrap();

        let mut cursor = Cursor::new("a b");
        cursor.advance();
        assert_eq!(cursor.finish(), Err(ParseError::invalid_character('b', 2)));
    }
}
