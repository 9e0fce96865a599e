//! Lowers a `Node` tree into plain `JsonValue` data.
//!
//! Materialization is a pure walk over a borrowed tree; the result shares
//! nothing with it. Duplicate object keys are not an error: the last value
//! wins and the key keeps the position of its first occurrence.

use crate::error::{ErrorKind, ParseError, Result};
use crate::node::{Node, NodeKind};
use crate::token::TokenKind;
use crate::value::{JsonValue, Mapping, Sequence};

/// Materializes an `Object` root into a mapping.
///
/// # Errors
/// A `Usage` error if `node` is not an `Object`.
pub fn to_mapping(node: &Node) -> Result<Mapping> {
    if node.kind() != NodeKind::Object {
        return Err(wrong_root(node, NodeKind::Object));
    }
    let mut map = Mapping::with_capacity(node.len());
    for pair in node.children() {
        let (key, value) = lower_pair(pair)?;
        map.insert(key.to_string(), value);
    }
    Ok(map)
}

/// Materializes an `Array` root into a sequence.
///
/// # Errors
/// A `Usage` error if `node` is not an `Array`.
pub fn to_sequence(node: &Node) -> Result<Sequence> {
    if node.kind() != NodeKind::Array {
        return Err(wrong_root(node, NodeKind::Array));
    }
    node.children().iter().map(to_value).collect()
}

/// Materializes any value-producing node (`Object`, `Array`, or `Value`).
pub fn to_value(node: &Node) -> Result<JsonValue> {
    match node.kind() {
        NodeKind::Object => to_mapping(node).map(JsonValue::Object),
        NodeKind::Array => to_sequence(node).map(JsonValue::Array),
        NodeKind::Value => lower_leaf(node),
        NodeKind::Pair => Err(ParseError::usage(
            "a Pair node is not a value; materialize its parent Object",
            node.span(),
        )),
    }
}

fn lower_pair(pair: &Node) -> Result<(&str, JsonValue)> {
    match (pair.key(), pair.value_node()) {
        (Some(key), Some(value)) => Ok((key, to_value(value)?)),
        _ => Err(ParseError::usage(
            format!("Object member is a {} node, not a Pair", pair.kind()),
            pair.span(),
        )),
    }
}

fn lower_leaf(node: &Node) -> Result<JsonValue> {
    let Some(token) = node.leaf() else {
        return Err(ParseError::usage("Value node has no token", node.span()));
    };
    match token.kind() {
        TokenKind::True => Ok(JsonValue::Boolean(true)),
        TokenKind::False => Ok(JsonValue::Boolean(false)),
        TokenKind::Null => Ok(JsonValue::Null),
        TokenKind::Number => token.as_f64().map(JsonValue::Number),
        TokenKind::String => Ok(JsonValue::String(token.lexeme().to_string())),
        other => Err(ParseError::new(
            ErrorKind::Usage,
            format!("a {other} token cannot be a value"),
            token.lexeme(),
            token.span(),
        )),
    }
}

fn wrong_root(node: &Node, wanted: NodeKind) -> ParseError {
    ParseError::usage(
        format!("root is {}, not {wanted}", node.kind()),
        node.span(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn mapping(input: &str) -> Mapping {
        to_mapping(&parse(input).unwrap()).unwrap()
    }

    #[test]
    fn test_scalars() {
        let map = mapping(r#"{"s": "hi", "n": -2.5, "t": true, "f": false, "z": null}"#);
        assert_eq!(map["s"], JsonValue::String("hi".to_string()));
        assert_eq!(map["n"], JsonValue::Number(-2.5));
        assert_eq!(map["t"], JsonValue::Boolean(true));
        assert_eq!(map["f"], JsonValue::Boolean(false));
        assert_eq!(map["z"], JsonValue::Null);
    }

    #[test]
    fn test_integers_become_floats() {
        let map = mapping(r#"{"age": 20}"#);
        assert_eq!(map["age"], JsonValue::Number(20.0));
    }

    #[test]
    fn test_strings_are_not_unescaped() {
        let map = mapping(r#"{"path": "a\"b\\n"}"#);
        assert_eq!(map["path"].as_str(), Some(r#"a\"b\\n"#));
    }

    #[test]
    fn test_duplicate_keys_last_write_wins() {
        let map = mapping(r#"{"a": 1, "b": 2, "a": 3}"#);
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], JsonValue::Number(3.0));
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_sequence_preserves_order() {
        let root = parse(r#"["tanaka", ["x"], {}, 1]"#).unwrap();
        let seq = to_sequence(&root).unwrap();
        assert_eq!(
            seq,
            vec![
                JsonValue::String("tanaka".to_string()),
                JsonValue::Array(vec![JsonValue::String("x".to_string())]),
                JsonValue::Object(Mapping::new()),
                JsonValue::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_wrong_root_is_usage_error() {
        let object = parse(r#"{"a": 1}"#).unwrap();
        let err = to_sequence(&object).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Usage);
        assert_eq!(err.message, "root is Object, not Array");

        let array = parse("[1]").unwrap();
        assert_eq!(to_mapping(&array).unwrap_err().kind, ErrorKind::Usage);
    }

    #[test]
    fn test_pair_is_not_a_value() {
        let object = parse(r#"{"a": 1}"#).unwrap();
        let err = to_value(&object.children()[0]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Usage);
        assert_eq!(to_value(object.get("a").unwrap()).unwrap(), JsonValue::Number(1.0));
    }
}
