//! # jsontree
//!
//! `jsontree` parses a JSON document into an inspectable value tree with
//! precise source positions, and lowers that tree into plain Rust data.
//!
//! Parsing happens in three single-pass stages:
//!
//! 1. the [`Tokenizer`] turns text into positioned [`Token`]s, ending with
//!    one `EndOfInput` token;
//! 2. the [`Parser`] builds a [`Node`] tree by recursive descent;
//! 3. the materializer ([`to_mapping`], [`to_sequence`], [`to_value`])
//!    turns the tree into [`JsonValue`] data.
//!
//! Every error is a [`ParseError`] carrying an [`ErrorKind`], a message,
//! the offending text, and a `[start, end)` span in code points.
//!
//! ## Quick Start
//!
//! ```
//! use jsontree::{parse, to_mapping, JsonValue, NodeKind};
//!
//! let root = parse(r#"{"msg": "hello", "age": 20}"#).unwrap();
//! assert_eq!(root.kind(), NodeKind::Object);
//!
//! let map = to_mapping(&root).unwrap();
//! assert_eq!(map["msg"], JsonValue::String("hello".to_string()));
//! assert_eq!(map["age"], JsonValue::Number(20.0));
//! ```
//!
//! ## Errors
//!
//! ```
//! use jsontree::{parse, ErrorKind, Span, TokenKind};
//!
//! let err = parse(r#"{"msg": "hello""#).unwrap_err();
//! assert_eq!(err.kind, ErrorKind::Syntax);
//! assert_eq!(err.expected, vec![TokenKind::RightBrace]);
//! assert_eq!(err.found, Some(TokenKind::EndOfInput));
//! assert_eq!(err.span, Span::new(15, 16));
//! ```

/// Contains the primary `ParseError` type for the library.
pub mod error;
/// Size and strictness limits for a parse.
pub mod limits;
/// Lowers a `Node` tree into `JsonValue` data.
pub mod materialize;
/// The `Node` value tree.
pub mod node;
/// The recursive-descent `Parser`.
pub mod parser;
/// The `Token` record, `TokenKind`, and `Span`.
pub mod token;
/// The tokenizer (lexer).
pub mod tokenizer;
/// Debug rendering of a `Node` tree.
pub mod tree;
/// The `JsonValue` enum.
pub mod value;

pub use error::{ErrorKind, ParseError, Result};
pub use limits::Limits;
pub use materialize::{to_mapping, to_sequence, to_value};
pub use node::{Node, NodeKind};
pub use parser::{parse_tokens, Parser};
pub use token::{Span, Token, TokenKind};
pub use tokenizer::Tokenizer;
pub use tree::Tree;
pub use value::{JsonValue, Mapping, Sequence};

use tracing::{debug, instrument};

fn check_size(input: &str, limits: &Limits) -> Result<()> {
    if input.len() > limits.max_input_bytes {
        return Err(ParseError::new(
            ErrorKind::InputTooLarge,
            format!(
                "input is {} bytes, the limit is {}",
                input.len(),
                limits.max_input_bytes
            ),
            "",
            Span::new(0, 0),
        ));
    }
    Ok(())
}

/// Tokenizes `input` with the default `Limits`.
///
/// # Errors
/// The first lexical error in the input.
///
/// # Examples
/// ```
/// use jsontree::{tokenize, TokenKind};
///
/// let kinds: Vec<_> = tokenize("[true]").unwrap().iter().map(|t| t.kind()).collect();
/// assert_eq!(
///     kinds,
///     vec![TokenKind::LeftBracket, TokenKind::True, TokenKind::RightBracket, TokenKind::EndOfInput]
/// );
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    tokenize_with_limits(input, &Limits::default())
}

#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn tokenize_with_limits(input: &str, limits: &Limits) -> Result<Vec<Token>> {
    check_size(input, limits)?;
    let tokens = Tokenizer::with_limits(input, limits).collect::<Result<Vec<_>>>()?;
    debug!(tokens = tokens.len(), "tokenized input");
    Ok(tokens)
}

/// Tokenizes and parses `input` with the default `Limits`.
///
/// # Errors
/// The first lexical error, or else the first syntax error.
pub fn parse(input: &str) -> Result<Node> {
    parse_with_limits(input, &Limits::default())
}

#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn parse_with_limits(input: &str, limits: &Limits) -> Result<Node> {
    let tokens = tokenize_with_limits(input, limits)?;
    parse_tokens(&tokens, limits)
}

/// Parses `input` and materializes the root, whichever container it is.
pub fn from_str(input: &str) -> Result<JsonValue> {
    to_value(&parse(input)?)
}
