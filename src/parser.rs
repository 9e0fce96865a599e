//! Contains the recursive-descent `Parser`.
//!
//! The parser walks the token sequence produced by the `Tokenizer` with a
//! single forward-moving cursor and builds a `Node` tree per the grammar:
//!
//! ```text
//! Json    := Object | Array
//! Object  := '{' Member? '}'
//! Member  := Pair (',' Pair)*
//! Pair    := String ':' Value
//! Array   := '[' Element? ']'
//! Element := Value (',' Value)*
//! Value   := String | Number | True | False | Null | Object | Array
//! ```
//!
//! Every structural mismatch is fatal: the parse stops at the first
//! `SyntaxError` and no partial tree is returned.

use crate::error::{ErrorKind, ParseError, Result};
use crate::limits::Limits;
use crate::node::Node;
use crate::token::{Span, Token, TokenKind};
use tracing::debug;

/// The recursive-descent parser.
///
/// Borrows the token sequence; the `Node` tree it returns is owned by the
/// caller and shares nothing with the tokens.
pub struct Parser<'t> {
    tokens: &'t [Token],
    /// Index of the current token.
    pos: usize,
    /// Current nesting depth of objects and arrays.
    depth: usize,
    limits: Limits,
    /// Stands in for the current token once the cursor runs off the end of
    /// a sequence that is missing its `EndOfInput` marker.
    end: Token,
}

impl<'t> Parser<'t> {
    /// Creates a new `Parser` with the default `Limits`.
    pub fn new(tokens: &'t [Token]) -> Self {
        Self::with_limits(tokens, Limits::default())
    }

    /// Creates a new `Parser` that enforces `limits`.
    pub fn with_limits(tokens: &'t [Token], limits: Limits) -> Self {
        let end_at = tokens.last().map_or(0, |last| match last.kind {
            TokenKind::EndOfInput => last.span.start,
            _ => last.span.end,
        });
        Parser {
            tokens,
            pos: 0,
            depth: 0,
            limits,
            end: Token::new(TokenKind::EndOfInput, "", Span::new(end_at, end_at + 1)),
        }
    }

    /// Index of the token under the cursor.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Parses a complete document. The root must be an object or an array
    /// and must be followed by `EndOfInput`.
    pub fn parse(&mut self) -> Result<Node> {
        let root = match self.current().kind {
            TokenKind::LeftBrace => self.parse_object()?,
            TokenKind::LeftBracket => self.parse_array()?,
            _ => {
                return Err(self.unexpected(&[TokenKind::LeftBrace, TokenKind::LeftBracket]));
            }
        };
        if self.current().kind != TokenKind::EndOfInput {
            return Err(self.unexpected(&[TokenKind::EndOfInput]));
        }
        debug!(root = %root.kind(), children = root.len(), "parsed document");
        Ok(root)
    }

    /// The token under the cursor. Does not consume.
    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.end)
    }

    /// The token after the current one. Does not consume.
    pub fn peek_next(&self) -> &Token {
        self.tokens.get(self.pos + 1).unwrap_or(&self.end)
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|pos| self.tokens.get(pos))
    }

    /// Consumes the current token and returns it.
    fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it has the given kind.
    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current().kind == kind {
            Ok(self.bump())
        } else {
            Err(self.unexpected(&[kind]))
        }
    }

    /// Creates a `SyntaxError` located at the current token.
    fn unexpected(&self, expected: &[TokenKind]) -> ParseError {
        let found = self.current();
        let error = ParseError::syntax(expected, found.kind, found.lexeme.clone(), found.span);
        debug!(span = %error.span, message = %error.message, "syntax error");
        error
    }

    /// Enters one level of nesting at `open`.
    fn enter(&mut self, open: &Token) -> Result<()> {
        self.depth += 1;
        if self.depth > self.limits.max_depth {
            return Err(ParseError::new(
                ErrorKind::DepthLimitExceeded,
                format!("nesting exceeds the maximum depth of {}", self.limits.max_depth),
                open.lexeme.clone(),
                open.span,
            ));
        }
        Ok(())
    }

    fn parse_object(&mut self) -> Result<Node> {
        let open = self.expect(TokenKind::LeftBrace)?;
        self.enter(&open)?;

        let members = match self.current().kind {
            TokenKind::String => self.parse_members()?,
            TokenKind::RightBrace => Vec::new(),
            _ => return Err(self.unexpected(&[TokenKind::String, TokenKind::RightBrace])),
        };

        let close = self.expect(TokenKind::RightBrace)?;
        self.depth -= 1;
        Ok(Node::object(members, Span::new(open.span.start, close.span.end)))
    }

    /// `Pair (',' Pair)*`
    fn parse_members(&mut self) -> Result<Vec<Node>> {
        let mut members = vec![self.parse_pair()?];
        while self.current().kind == TokenKind::Comma {
            self.bump();
            if self.limits.allow_trailing_commas && self.current().kind != TokenKind::String {
                break;
            }
            members.push(self.parse_pair()?);
        }
        Ok(members)
    }

    /// `String ':' Value`
    fn parse_pair(&mut self) -> Result<Node> {
        let key = self.expect(TokenKind::String)?;
        self.expect(TokenKind::Colon)?;
        let value = self
            .parse_value()?
            .ok_or_else(|| self.unexpected(&TokenKind::VALUE_START))?;
        Ok(Node::pair(&key, value))
    }

    fn parse_array(&mut self) -> Result<Node> {
        let open = self.expect(TokenKind::LeftBracket)?;
        self.enter(&open)?;

        let elements = self.parse_elements()?;

        let close = self.expect(TokenKind::RightBracket)?;
        self.depth -= 1;
        Ok(Node::array(elements, Span::new(open.span.start, close.span.end)))
    }

    /// `Value (',' Value)*`, or nothing when the first token starts no value.
    fn parse_elements(&mut self) -> Result<Vec<Node>> {
        let mut elements = Vec::new();
        let Some(first) = self.parse_value()? else {
            return Ok(elements);
        };
        elements.push(first);

        while self.current().kind == TokenKind::Comma {
            self.bump();
            match self.parse_value()? {
                Some(element) => elements.push(element),
                None if self.limits.allow_trailing_commas => break,
                None => return Err(self.unexpected(&TokenKind::VALUE_START)),
            }
        }
        Ok(elements)
    }

    /// Parses a value if the current token starts one. Returns `Ok(None)`
    /// without consuming anything otherwise.
    fn parse_value(&mut self) -> Result<Option<Node>> {
        match self.current().kind {
            kind if kind.is_scalar() => Ok(Some(Node::value(self.bump()))),
            TokenKind::LeftBrace => self.parse_object().map(Some),
            TokenKind::LeftBracket => self.parse_array().map(Some),
            _ => Ok(None),
        }
    }
}

/// Parses an already tokenized document.
pub fn parse_tokens(tokens: &[Token], limits: &Limits) -> Result<Node> {
    Parser::with_limits(tokens, *limits).parse()
}
