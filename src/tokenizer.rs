//! The tokenizer (lexer).
//!
//! Consumes the input `&str` and produces the token sequence handed to the
//! parser, terminated by exactly one `EndOfInput` token. Scanning walks the
//! input by code point, keeping both a byte cursor (for slicing) and a
//! code-point offset (for spans). A lookup table classifies ASCII, and
//! `memchr` finds the closing quote of strings.
//!
//! The tokenizer fails fast: the first malformed number or undefined bare
//! word ends tokenization with an error.

use crate::error::{ErrorKind, ParseError, Result};
use crate::limits::Limits;
use crate::token::{Span, Token, TokenKind};
use memchr::memchr;
use std::iter::FusedIterator;
use tracing::{debug, trace};

// Character classes. Anything left at 0 starts an `Unknown` token.
const W: u8 = 1; // Whitespace
const S: u8 = 2; // Structural
const L: u8 = 3; // Letter (keyword start)
const D: u8 = 4; // Number start
const Q: u8 = 5; // Quote

static ASCII_CLASS: [u8; 128] = {
    let mut table = [0; 128];
    // Same set as `char::is_whitespace` restricted to ASCII.
    table[b' ' as usize] = W;
    table[b'\t' as usize] = W;
    table[b'\n' as usize] = W;
    table[0x0B] = W;
    table[0x0C] = W;
    table[b'\r' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b'"' as usize] = Q;

    // '.' starts a number only so that `.5` is reported as malformed.
    table[b'-' as usize] = D;
    table[b'+' as usize] = D;
    table[b'.' as usize] = D;
    let mut b = b'0';
    while b <= b'9' {
        table[b as usize] = D;
        b += 1;
    }

    let mut b = b'a';
    while b <= b'z' {
        table[b as usize] = L;
        table[(b - b'a' + b'A') as usize] = L;
        b += 1;
    }
    table
};

fn classify(c: char) -> u8 {
    if c.is_ascii() {
        ASCII_CLASS[c as usize]
    } else if c.is_whitespace() {
        W
    } else if c.is_alphabetic() {
        L
    } else {
        0
    }
}

fn is_number_byte(byte: u8) -> bool {
    matches!(byte, b'0'..=b'9' | b'.' | b'-' | b'+')
}

/// Returns why a scanned number lexeme is malformed, if it is.
fn number_defect(lexeme: &str) -> Option<&'static str> {
    if lexeme.starts_with('.') {
        return Some("cannot start with a decimal point");
    }
    if lexeme.matches('.').count() > 1 {
        return Some("more than one decimal point");
    }
    for sign in ['-', '+'] {
        let count = lexeme.matches(sign).count();
        if count > 1 || (count == 1 && !lexeme.starts_with(sign)) {
            return Some("a sign is only allowed as the first character");
        }
    }
    if !lexeme.bytes().any(|b| b.is_ascii_digit()) {
        return Some("no digits");
    }
    None
}

/// The tokenizer (lexer).
///
/// Yields `Result<Token, ParseError>` items. The last `Ok` item is always
/// the `EndOfInput` token; after it, or after the first error, the iterator
/// is exhausted.
pub struct Tokenizer<'a> {
    input: &'a str,
    /// Byte position in `input`.
    cursor: usize,
    /// Code-point position in `input`; what spans are measured in.
    offset: usize,
    allow_unterminated_strings: bool,
    backslash_parity_escapes: bool,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` with the default `Limits`.
    pub fn new(input: &'a str) -> Self {
        Self::with_limits(input, &Limits::default())
    }

    /// Creates a new `Tokenizer` that scans strings per `limits`.
    pub fn with_limits(input: &'a str, limits: &Limits) -> Self {
        Tokenizer {
            input,
            cursor: 0,
            offset: 0,
            allow_unterminated_strings: limits.allow_unterminated_strings,
            backslash_parity_escapes: limits.backslash_parity_escapes,
            finished: false,
        }
    }

    /// Current code-point offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.input[self.cursor..].chars().next()
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        self.offset += 1;
        Some(c)
    }

    fn token(&self, kind: TokenKind, lexeme: &str, start: usize) -> Token {
        Token::new(kind, lexeme, Span::new(start, self.offset))
    }

    /// Creates a `ParseError` spanning from `start` to the current offset.
    fn error(&self, kind: ErrorKind, message: String, lexeme: &str, start: usize) -> ParseError {
        ParseError::new(kind, message, lexeme, Span::new(start, self.offset))
    }

    /// Scans exactly one token at the current position, whitespace included.
    fn scan_token(&mut self) -> Result<Token> {
        let start = self.offset;
        let Some(c) = self.peek() else {
            return Ok(Token::new(
                TokenKind::EndOfInput,
                "",
                Span::new(start, start + 1),
            ));
        };

        match classify(c) {
            W => Ok(self.lex_whitespace(start)),
            S => {
                self.bump();
                let kind = match c {
                    '{' => TokenKind::LeftBrace,
                    '}' => TokenKind::RightBrace,
                    '[' => TokenKind::LeftBracket,
                    ']' => TokenKind::RightBracket,
                    ':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                };
                let begin = self.cursor - 1;
                Ok(self.token(kind, &self.input[begin..self.cursor], start))
            }
            Q => self.lex_string(start),
            D => self.lex_number(start),
            L => self.lex_keyword(start),
            _ => {
                let begin = self.cursor;
                self.bump();
                Ok(self.token(TokenKind::Unknown, &self.input[begin..self.cursor], start))
            }
        }
    }

    fn lex_whitespace(&mut self, start: usize) -> Token {
        let begin = self.cursor;
        while let Some(c) = self.peek() {
            if classify(c) != W {
                break;
            }
            self.bump();
        }
        self.token(TokenKind::Whitespace, &self.input[begin..self.cursor], start)
    }

    /// Scans a string. The lexeme is the raw text between the quotes; a
    /// quote directly after a backslash does not close it. With
    /// `backslash_parity_escapes`, only an odd run of backslashes escapes it.
    fn lex_string(&mut self, start: usize) -> Result<Token> {
        let input = self.input;
        self.bump(); // Consume opening '"'
        let content_start = self.cursor;
        let bytes = input.as_bytes();

        let mut search_from = content_start;
        let close = loop {
            match memchr(b'"', &bytes[search_from..]) {
                Some(i) => {
                    let quote = search_from + i;
                    let backslashes = bytes[content_start..quote]
                        .iter()
                        .rev()
                        .take_while(|&&b| b == b'\\')
                        .count();
                    let escaped = if self.backslash_parity_escapes {
                        backslashes % 2 == 1
                    } else {
                        backslashes > 0
                    };
                    if !escaped {
                        break Some(quote);
                    }
                    search_from = quote + 1;
                }
                None => break None,
            }
        };

        let content_end = close.unwrap_or(bytes.len());
        let content = &input[content_start..content_end];
        self.cursor = content_end;
        self.offset += content.chars().count();

        match close {
            Some(_) => {
                self.bump(); // Consume closing '"'
                Ok(self.token(TokenKind::String, content, start))
            }
            None if self.allow_unterminated_strings => {
                Ok(self.token(TokenKind::String, content, start))
            }
            None => Err(self.error(
                ErrorKind::UnterminatedString,
                "string reaches end of input without a closing quote".to_string(),
                content,
                start,
            )),
        }
    }

    /// Greedily consumes digits, '.', '-' and '+', then validates the result.
    fn lex_number(&mut self, start: usize) -> Result<Token> {
        let input = self.input;
        let begin = self.cursor;
        let bytes = input.as_bytes();
        while let Some(&byte) = bytes.get(self.cursor) {
            if !is_number_byte(byte) {
                break;
            }
            self.cursor += 1;
            self.offset += 1;
        }

        let lexeme = &input[begin..self.cursor];
        if let Some(defect) = number_defect(lexeme) {
            return Err(self.error(
                ErrorKind::InvalidData,
                format!("invalid number: {defect}"),
                lexeme,
                start,
            ));
        }
        Ok(self.token(TokenKind::Number, lexeme, start))
    }

    /// Consumes a bare word up to whitespace or one of `: , ] }`.
    fn lex_keyword(&mut self, start: usize) -> Result<Token> {
        let input = self.input;
        let begin = self.cursor;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || matches!(c, ':' | ',' | ']' | '}') {
                break;
            }
            self.bump();
        }

        let word = &input[begin..self.cursor];
        let kind = match word {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => {
                return Err(self.error(
                    ErrorKind::UndefinedKeyword,
                    "expected `true`, `false` or `null`".to_string(),
                    word,
                    start,
                ))
            }
        };
        Ok(self.token(kind, word, start))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token>;

    /// Gets the next significant `Token`, skipping whitespace.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            match self.scan_token() {
                Ok(token) if token.kind == TokenKind::Whitespace => continue,
                Ok(token) => {
                    trace!(kind = %token.kind, start = token.span.start, end = token.span.end, "token");
                    if token.kind == TokenKind::EndOfInput {
                        self.finished = true;
                    }
                    return Some(Ok(token));
                }
                Err(e) => {
                    debug!(kind = %e.kind, span = %e.span, lexeme = %e.lexeme, "lexical error");
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper to collect tokens into just their kinds for easy comparison
    fn collect_kinds(input: &str) -> Result<Vec<TokenKind>> {
        Tokenizer::new(input).map(|res| res.map(|token| token.kind)).collect()
    }

    fn collect_tokens(input: &str) -> Result<Vec<Token>> {
        Tokenizer::new(input).collect()
    }

    fn tok(kind: TokenKind, lexeme: &str, start: usize, end: usize) -> Token {
        Token::new(kind, lexeme, Span::new(start, end))
    }

    #[test]
    fn test_tokenizer_structurals() {
        let expected = vec![
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::Colon,
            TokenKind::Comma,
            TokenKind::EndOfInput,
        ];
        assert_eq!(collect_kinds("{}[]:,").unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_literals() {
        let expected = vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::EndOfInput,
        ];
        assert_eq!(collect_kinds("true false null").unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_positions() {
        let expected = vec![
            tok(TokenKind::LeftBrace, "{", 0, 1),
            tok(TokenKind::String, "msg", 1, 6),
            tok(TokenKind::Colon, ":", 6, 7),
            tok(TokenKind::String, "hello", 8, 15),
            tok(TokenKind::RightBrace, "}", 15, 16),
            tok(TokenKind::EndOfInput, "", 16, 17),
        ];
        assert_eq!(collect_tokens(r#"{"msg": "hello"}"#).unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_keyword_before_bracket() {
        let expected = vec![
            tok(TokenKind::LeftBracket, "[", 0, 1),
            tok(TokenKind::True, "true", 1, 5),
            tok(TokenKind::RightBracket, "]", 5, 6),
            tok(TokenKind::EndOfInput, "", 6, 7),
        ];
        assert_eq!(collect_tokens("[true]").unwrap(), expected);
    }

    #[test]
    fn test_tokenizer_empty_input() {
        let expected = vec![tok(TokenKind::EndOfInput, "", 0, 1)];
        assert_eq!(collect_tokens("").unwrap(), expected);
        assert_eq!(collect_tokens(" \n\t ").unwrap(), vec![tok(TokenKind::EndOfInput, "", 4, 5)]);
    }

    #[test]
    fn test_tokenizer_offsets_count_code_points() {
        let tokens = collect_tokens(r#"["é", "日本"]"#).unwrap();
        assert_eq!(tokens[1], tok(TokenKind::String, "é", 1, 4));
        assert_eq!(tokens[2], tok(TokenKind::Comma, ",", 4, 5));
        assert_eq!(tokens[3], tok(TokenKind::String, "日本", 6, 10));
        assert_eq!(tokens[5], tok(TokenKind::EndOfInput, "", 11, 12));
    }

    #[test]
    fn test_tokenizer_unicode_whitespace_is_skipped() {
        let kinds = collect_kinds("[\u{00A0}1,\u{2003}2]").unwrap();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LeftBracket,
                TokenKind::Number,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::RightBracket,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_tokenizer_numbers() {
        for lexeme in ["5", "-5", "5.5", "+5", "0.25", "-0.5", "007"] {
            let tokens = collect_tokens(lexeme).unwrap();
            assert_eq!(tokens[0].kind, TokenKind::Number, "{lexeme}");
            assert_eq!(tokens[0].lexeme, lexeme);
        }
    }

    #[test]
    fn test_tokenizer_number_errors() {
        for lexeme in ["1.2.3", "-1-2", ".5", "5-", "+-5", "++5", "-", "+."] {
            let err = collect_kinds(lexeme).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidData, "{lexeme}");
            assert_eq!(err.lexeme, lexeme);
            assert_eq!(err.span, Span::new(0, lexeme.chars().count()));
        }
    }

    #[test]
    fn test_tokenizer_number_error_span_is_positioned() {
        let err = collect_kinds(r#"{"a": 1.2.3}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidData);
        assert_eq!(err.span, Span::new(6, 11));
        assert_eq!(err.message, "invalid number: more than one decimal point");
    }

    #[test]
    fn test_tokenizer_keyword_errors() {
        let err = collect_kinds("tru").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedKeyword);
        assert_eq!(err.lexeme, "tru");
        assert_eq!(err.span, Span::new(0, 3));

        let err = collect_kinds("[nullx, 1]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedKeyword);
        assert_eq!(err.lexeme, "nullx");
        assert_eq!(err.span, Span::new(1, 6));
    }

    #[test]
    fn test_tokenizer_exponent_is_not_a_number_constituent() {
        let err = collect_kinds("[1e5]").unwrap_err();
        assert_eq!(err.kind, ErrorKind::UndefinedKeyword);
        assert_eq!(err.lexeme, "e5");
    }

    #[test]
    fn test_tokenizer_stops_at_first_error() {
        let mut tokenizer = Tokenizer::new("[tru, 1.2.3]");
        assert_eq!(tokenizer.next().unwrap().unwrap().kind, TokenKind::LeftBracket);
        assert_eq!(tokenizer.next().unwrap().unwrap_err().kind, ErrorKind::UndefinedKeyword);
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_tokenizer_strings_keep_escapes() {
        let tokens = collect_tokens(r#""the \" is OK""#).unwrap();
        assert_eq!(tokens[0], tok(TokenKind::String, r#"the \" is OK"#, 0, 14));

        let tokens = collect_tokens(r#"["a\nb", "é"]"#).unwrap();
        assert_eq!(tokens[1].lexeme, r#"a\nb"#);
        assert_eq!(tokens[3].lexeme, r#"é"#);
    }

    #[test]
    fn test_tokenizer_quote_after_backslash_never_closes() {
        // Even a doubled backslash escapes the quote, so the string runs on.
        let tokens = collect_tokens(r#"["a\\", 1]"#).unwrap();
        assert_eq!(tokens[1], tok(TokenKind::String, r#"a\\", 1]"#, 1, 10));
        assert_eq!(tokens[2], tok(TokenKind::EndOfInput, "", 10, 11));

        let err = Tokenizer::with_limits(r#"["a\\", 1]"#, &Limits::strict())
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
        assert_eq!(err.span, Span::new(1, 10));
    }

    #[test]
    fn test_tokenizer_backslash_parity_escapes() {
        let tokens = Tokenizer::with_limits(r#"["a\\", 1, "b\\\"c"]"#, &Limits::lenient())
            .collect::<Result<Vec<_>>>()
            .unwrap();
        assert_eq!(tokens[1], tok(TokenKind::String, r#"a\\"#, 1, 6));
        assert_eq!(tokens[2].kind, TokenKind::Comma);
        assert_eq!(tokens[5], tok(TokenKind::String, r#"b\\\"c"#, 11, 19));
    }

    #[test]
    fn test_tokenizer_unterminated_string_is_truncated_by_default() {
        let tokens = collect_tokens(r#"{"abc"#).unwrap();
        assert_eq!(tokens[1], tok(TokenKind::String, "abc", 1, 5));
        assert_eq!(tokens[2], tok(TokenKind::EndOfInput, "", 5, 6));
    }

    #[test]
    fn test_tokenizer_unterminated_string_strict() {
        let err = Tokenizer::with_limits(r#"{"abc"#, &Limits::strict())
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnterminatedString);
        assert_eq!(err.span, Span::new(1, 5));
        assert_eq!(err.lexeme, "abc");
    }

    #[test]
    fn test_tokenizer_unknown_characters() {
        let tokens = collect_tokens("[1, ?]").unwrap();
        assert_eq!(tokens[3], tok(TokenKind::Unknown, "?", 4, 5));

        let tokens = collect_tokens("→").unwrap();
        assert_eq!(tokens[0], tok(TokenKind::Unknown, "→", 0, 1));
    }

    #[test]
    fn test_tokenizer_never_emits_whitespace() {
        let kinds = collect_kinds("  { \n \t \"key\" \r\n : \n 123 \n } \n ").unwrap();
        assert!(!kinds.contains(&TokenKind::Whitespace));
        assert_eq!(kinds.len(), 6);
    }

    #[test]
    fn test_tokenizer_is_fused_after_end_of_input() {
        let mut tokenizer = Tokenizer::new("[]");
        assert_eq!(tokenizer.by_ref().count(), 3);
        assert!(tokenizer.next().is_none());
    }

    #[test]
    fn test_tokenizer_is_idempotent() {
        let input = r#"{"a": [1, -2.5, true, null, "x"], "b": {}}"#;
        assert_eq!(collect_tokens(input).unwrap(), collect_tokens(input).unwrap());
    }
}
