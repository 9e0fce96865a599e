//! Contains the primary `ParseError` type for the library.
//!
//! Every failure the tokenizer, parser, or materializer can report is a
//! `ParseError`. The `kind` tag tells lexical, syntactic, limit, and usage
//! errors apart; the `span` points at the offending code points.

use crate::token::{Span, TokenKind};
use std::fmt;
use thiserror::Error;

/// A convenience alias used throughout the crate.
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// The category of a `ParseError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A malformed number literal (e.g. `1.2.3`, `-1-2`, `.5`).
    InvalidData,
    /// A bare word that is not `true`, `false`, or `null`.
    UndefinedKeyword,
    /// A string literal that reaches end-of-input. Only reported when
    /// `Limits::allow_unterminated_strings` is off.
    UnterminatedString,
    /// A structural grammar violation.
    Syntax,
    /// Objects and arrays nested deeper than `Limits::max_depth`.
    DepthLimitExceeded,
    /// The input is larger than `Limits::max_input_bytes`.
    InputTooLarge,
    /// The API was called on the wrong kind of node or token.
    Usage,
}

impl ErrorKind {
    /// Returns `true` for errors raised while scanning characters.
    pub fn is_lexical(self) -> bool {
        matches!(
            self,
            ErrorKind::InvalidData | ErrorKind::UndefinedKeyword | ErrorKind::UnterminatedString
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::InvalidData => "InvalidDataError",
            ErrorKind::UndefinedKeyword => "UndefinedKeywordError",
            ErrorKind::UnterminatedString => "UnterminatedStringError",
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::DepthLimitExceeded => "DepthLimitError",
            ErrorKind::InputTooLarge => "InputTooLargeError",
            ErrorKind::Usage => "UsageError",
        })
    }
}

/// The primary error type for all parsing operations.
///
/// Carries the error category, a human-readable message, the offending
/// literal text (empty when there is none), and the `[start, end)`
/// code-point span into the original input. Syntax errors additionally
/// record which token kinds would have been accepted and which was found.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at {span}: {message}{}", lexeme_suffix(.lexeme))]
pub struct ParseError {
    /// What went wrong.
    pub kind: ErrorKind,
    /// A description of what went wrong.
    pub message: String,
    /// The offending source text, if any.
    pub lexeme: String,
    /// Where in the input the error was detected.
    pub span: Span,
    /// Token kinds the parser would have accepted (syntax errors only).
    pub expected: Vec<TokenKind>,
    /// The token kind the parser actually saw (syntax errors only).
    pub found: Option<TokenKind>,
}

fn lexeme_suffix(lexeme: &str) -> String {
    if lexeme.is_empty() {
        String::new()
    } else {
        format!(" `{lexeme}`")
    }
}

impl ParseError {
    /// Creates an error with no expected/found payload.
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        lexeme: impl Into<String>,
        span: Span,
    ) -> Self {
        ParseError {
            kind,
            message: message.into(),
            lexeme: lexeme.into(),
            span,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Creates a `Syntax` error naming the accepted kinds and the one found.
    pub fn syntax(
        expected: &[TokenKind],
        found: TokenKind,
        lexeme: impl Into<String>,
        span: Span,
    ) -> Self {
        let wanted = expected
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" or ");
        ParseError {
            kind: ErrorKind::Syntax,
            message: format!("expected {wanted}, found {found}"),
            lexeme: lexeme.into(),
            span,
            expected: expected.to_vec(),
            found: Some(found),
        }
    }

    /// Creates a `Usage` error.
    pub fn usage(message: impl Into<String>, span: Span) -> Self {
        ParseError::new(ErrorKind::Usage, message, "", span)
    }
}
