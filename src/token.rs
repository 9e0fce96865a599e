//! Defines the `Token` record, its `TokenKind`, and the `Span` type.
//!
//! These are the intermediate representation between the `Tokenizer`
//! (lexer) and the `Parser`. Positions are code-point offsets into the
//! original input, not byte offsets.

use crate::error::{ErrorKind, ParseError, Result};
use std::fmt;
use std::ops::Range;

/// A half-open `[start, end)` range of code-point offsets into the input.
///
/// An invariant to be maintained is that `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Construct a new span. Will panic if `start > end`.
    pub const fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "`start` must not be larger than `end`");
        Span { start, end }
    }

    /// Number of code points covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span covers no code points.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if `offset` falls inside the span.
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// The span as a `Range`, e.g. for diagnostic labels.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The kind of a `Token`.
///
/// This represents the smallest meaningful units of JSON grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Marks the end of the input. Always the last token.
    EndOfInput,
    /// `null`
    Null,
    /// A string, e.g. `"hello"`
    String,
    /// A number, e.g. `-12.5`
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// A run of whitespace. Recognized by the scanner but never emitted.
    Whitespace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// A code point that starts no other token.
    Unknown,
}

impl TokenKind {
    /// Token kinds that may begin a value.
    pub const VALUE_START: [TokenKind; 7] = [
        TokenKind::String,
        TokenKind::Number,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
        TokenKind::LeftBrace,
        TokenKind::LeftBracket,
    ];

    /// Returns `true` if a token of this kind can begin a value.
    pub fn is_value_start(self) -> bool {
        TokenKind::VALUE_START.contains(&self)
    }

    /// Returns `true` for the kinds a `Value` node can wrap.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single token produced by the `Tokenizer`.
///
/// For `String` tokens the lexeme is the text between the quotes with any
/// escapes left as written, while the span covers the quotes too. For
/// `Number` tokens the lexeme is the raw digit/sign/dot sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: String,
    pub(crate) span: Span,
}

impl Token {
    /// Creates a token from its kind, lexeme, and code-point span.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// The token's category.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The source text of the token; quotes excluded for strings.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// Where the token sits in the input, in code points.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Loads a `Number` token as a 64-bit float.
    pub fn as_f64(&self) -> Result<f64> {
        self.expect_kind(TokenKind::Number)?;
        self.lexeme.parse::<f64>().map_err(|_| {
            ParseError::new(
                ErrorKind::InvalidData,
                "number literal is not a valid 64-bit float",
                self.lexeme.clone(),
                self.span,
            )
        })
    }

    /// Loads a `String` token's raw content.
    pub fn as_str(&self) -> Result<&str> {
        self.expect_kind(TokenKind::String)?;
        Ok(&self.lexeme)
    }

    /// Loads a `True` or `False` token.
    pub fn as_bool(&self) -> Result<bool> {
        match self.kind {
            TokenKind::True => Ok(true),
            TokenKind::False => Ok(false),
            other => Err(ParseError::usage(
                format!("{other} token is neither True nor False"),
                self.span,
            )),
        }
    }

    /// Returns `true` for a `Null` token.
    pub fn is_null(&self) -> bool {
        self.kind == TokenKind::Null
    }

    fn expect_kind(&self, kind: TokenKind) -> Result<()> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(ParseError::usage(
                format!("{} token is not a {kind} token", self.kind),
                self.span,
            ))
        }
    }
}
