//! The value tree built by the parser.
//!
//! A `Node` is an owned recursive structure: parents own their children and
//! there are no back-references. Nodes are only constructed by the parser,
//! so the shape invariants below always hold for a tree handed to a caller:
//!
//! * an `Object`'s children are all `Pair`s, in source order;
//! * a `Pair` has a key and exactly one child, its value;
//! * an `Array`'s children are `Object`, `Array`, or `Value` nodes;
//! * a `Value` has a leaf token and no children.

use crate::token::{Span, Token};
use std::fmt;

/// The kind of a `Node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `{ ... }`; children are `Pair`s.
    Object,
    /// A `"key": value` member of an object.
    Pair,
    /// `[ ... ]`; children are values.
    Array,
    /// A scalar leaf: string, number, boolean, or null.
    Value,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A typed element of the value tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Node>,
    key: Option<String>,
    leaf: Option<Token>,
    span: Span,
}

impl Node {
    pub(crate) fn object(members: Vec<Node>, span: Span) -> Self {
        debug_assert!(members.iter().all(|m| m.kind == NodeKind::Pair));
        Node {
            kind: NodeKind::Object,
            children: members,
            key: None,
            leaf: None,
            span,
        }
    }

    pub(crate) fn array(elements: Vec<Node>, span: Span) -> Self {
        debug_assert!(elements.iter().all(|e| e.kind != NodeKind::Pair));
        Node {
            kind: NodeKind::Array,
            children: elements,
            key: None,
            leaf: None,
            span,
        }
    }

    /// A pair spans from its key token to the end of its value.
    pub(crate) fn pair(key: &Token, value: Node) -> Self {
        let span = Span::new(key.span.start, value.span.end);
        Node {
            kind: NodeKind::Pair,
            children: vec![value],
            key: Some(key.lexeme.clone()),
            leaf: None,
            span,
        }
    }

    pub(crate) fn value(leaf: Token) -> Self {
        debug_assert!(leaf.kind.is_scalar());
        Node {
            kind: NodeKind::Value,
            children: Vec::new(),
            key: None,
            span: leaf.span,
            leaf: Some(leaf),
        }
    }

    /// The node's kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Members of an `Object`, elements of an `Array`, or the single value
    /// of a `Pair`. Empty for `Value` nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// The key of a `Pair` node.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The scalar token wrapped by a `Value` node.
    pub fn leaf(&self) -> Option<&Token> {
        self.leaf.as_ref()
    }

    /// Source span covered by this node, delimiters included.
    pub fn span(&self) -> Span {
        self.span
    }

    /// The value child of a `Pair` node.
    pub fn value_node(&self) -> Option<&Node> {
        match self.kind {
            NodeKind::Pair => self.children.first(),
            _ => None,
        }
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the node has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` for `Object` nodes.
    pub fn is_object(&self) -> bool {
        self.kind == NodeKind::Object
    }

    /// Returns `true` for `Array` nodes.
    pub fn is_array(&self) -> bool {
        self.kind == NodeKind::Array
    }

    /// Looks up the value of `key` in an `Object`. With duplicate keys the
    /// last pair wins, matching materialization.
    pub fn get(&self, key: &str) -> Option<&Node> {
        if self.kind != NodeKind::Object {
            return None;
        }
        self.children
            .iter()
            .rev()
            .find(|pair| pair.key() == Some(key))
            .and_then(Node::value_node)
    }

    /// Returns the `index`th element of an `Array`.
    pub fn index(&self, index: usize) -> Option<&Node> {
        match self.kind {
            NodeKind::Array => self.children.get(index),
            _ => None,
        }
    }
}
