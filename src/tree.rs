//! A read-only, indented rendering of a `Node` tree for debugging.
//!
//! ```text
//! Object
//!   Pair "msg"
//!     "hello" (string)
//!   Pair "members"
//!     Array
//!       "tanaka" (string)
//!       20 (number)
//! ```

use crate::node::{Node, NodeKind};
use crate::token::{Token, TokenKind};
use std::fmt;

/// The indentation string for one level of nesting (two spaces).
const INDENT: &str = "  ";

/// Displays a `Node` tree, one node per line. Created by `Node::tree`.
pub struct Tree<'a> {
    root: &'a Node,
}

impl Node {
    /// Returns a `Display` adapter that renders this subtree.
    pub fn tree(&self) -> Tree<'_> {
        Tree { root: self }
    }

    /// Writes the rendering of this subtree into `w`.
    pub fn write_tree<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        write_node(self, w, 0)
    }
}

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(self.root, f, 0)
    }
}

fn write_node<W: fmt::Write>(node: &Node, w: &mut W, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    match node.kind() {
        NodeKind::Object | NodeKind::Array if node.is_empty() => {
            writeln!(w, "{indent}{} (empty)", node.kind())
        }
        NodeKind::Object | NodeKind::Array => {
            writeln!(w, "{indent}{}", node.kind())?;
            write_children(node, w, depth)
        }
        NodeKind::Pair => {
            writeln!(w, "{indent}Pair \"{}\"", node.key().unwrap_or_default())?;
            write_children(node, w, depth)
        }
        NodeKind::Value => match node.leaf() {
            Some(token) => writeln!(w, "{indent}{} ({})", Leaf(token), type_name(token.kind())),
            None => writeln!(w, "{indent}<missing token>"),
        },
    }
}

fn write_children<W: fmt::Write>(node: &Node, w: &mut W, depth: usize) -> fmt::Result {
    for child in node.children() {
        write_node(child, w, depth + 1)?;
    }
    Ok(())
}

fn type_name(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::String => "string",
        TokenKind::Number => "number",
        TokenKind::True | TokenKind::False => "boolean",
        TokenKind::Null => "null",
        _ => "unknown",
    }
}

/// A scalar token shown by its decoded value.
struct Leaf<'a>(&'a Token);

impl fmt::Display for Leaf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.0;
        match token.kind() {
            TokenKind::String => write!(f, "\"{}\"", token.lexeme()),
            TokenKind::Number => match token.as_f64() {
                Ok(n) => write!(f, "{n}"),
                Err(_) => f.write_str(token.lexeme()),
            },
            _ => f.write_str(token.lexeme()),
        }
    }
}
