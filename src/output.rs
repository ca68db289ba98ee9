//! Rendering of parse trees.
//!
//! Two views of the same tree:
//!
//! - **Outline** via [`to_outline()`] - one `type:value` per line, children
//!   indented two spaces below their operator
//! - **Condition JSON** via [`tree_to_json()`] - the canonical condition
//!   object the tree was parsed from, with all insignificant formatting gone
//!
//! # Examples
//!
//! ```
//! use condition_lang::{lexer::tokenize, output::{to_json, to_outline}, Parser};
//!
//! let tokens = tokenize(r#"{ "$is" : { "deletedAt" : null } }"#).unwrap();
//! let tree = Parser::new().parse(&tokens).unwrap();
//!
//! assert_eq!(to_json(&tree).unwrap(), r#"{"$is":{"deletedAt":null}}"#);
//! assert_eq!(
//!     to_outline(&tree),
//!     "null-comparison-operator:$is\n  column:deletedAt\n  null:null\n"
//! );
//! ```

use std::str::FromStr;

use serde_json::{Map, Number, Value};

use crate::ast::{NodeRef, ParseTree, TokenType, TokenValue};

pub struct OutlinePrinter {
    indent_width: usize,
}

impl OutlinePrinter {
    pub fn new(indent_width: usize) -> Self {
        OutlinePrinter { indent_width }
    }

    pub fn print(&self, tree: &ParseTree) -> String {
        let mut result = String::new();
        self.print_node(tree.root(), 0, &mut result);
        result
    }

    fn print_node(&self, node: NodeRef<'_>, level: usize, out: &mut String) {
        out.push_str(&self.indent(level));
        out.push_str(&node.token().to_string());
        out.push('\n');
        for child in node.children() {
            self.print_node(child, level + 1, out);
        }
    }

    fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}

impl Default for OutlinePrinter {
    fn default() -> Self {
        OutlinePrinter::new(2)
    }
}

/// Indented outline of the tree, one node per line.
pub fn to_outline(tree: &ParseTree) -> String {
    OutlinePrinter::default().print(tree)
}

/// Rebuild the condition object a tree describes.
///
/// Tokenizing and parsing the result yields an identical tree. Numbers keep
/// every digit of their lexeme.
///
/// # Errors
///
/// Fails if a number cannot be represented as a JSON number.
pub fn tree_to_json(tree: &ParseTree) -> Result<Value, serde_json::Error> {
    node_to_json(tree.root())
}

/// Compact condition JSON.
pub fn to_json(tree: &ParseTree) -> Result<String, serde_json::Error> {
    tree_to_json(tree).map(|value| value.to_string())
}

/// Condition JSON with two-space indentation.
pub fn to_json_pretty(tree: &ParseTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&tree_to_json(tree)?)
}

fn node_to_json(node: NodeRef<'_>) -> Result<Value, serde_json::Error> {
    let token = node.token();

    let value = match token.token_type {
        TokenType::BooleanOperator => {
            let conditions = node.children().map(node_to_json).collect::<Result<_, _>>()?;
            single_entry(token.value.to_string(), Value::Array(conditions))
        }
        TokenType::ComparisonOperator | TokenType::NullComparisonOperator => {
            let operand = match node.child(1) {
                Some(leaf) => leaf_to_json(leaf)?,
                None => Value::Null,
            };
            single_entry(token.value.to_string(), column_pair(node, operand))
        }
        TokenType::InComparisonOperator => {
            let values = node.children().skip(1).map(leaf_to_json).collect::<Result<_, _>>()?;
            let pair = column_pair(node, Value::Array(values));
            single_entry(token.value.to_string(), pair)
        }
        _ => leaf_to_json(node)?,
    };
    Ok(value)
}

fn column_pair(operator: NodeRef<'_>, value: Value) -> Value {
    let column = operator
        .child(0)
        .map(|c| c.token().value.to_string())
        .unwrap_or_default();
    single_entry(column, value)
}

fn single_entry(key: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key, value);
    Value::Object(map)
}

// With `arbitrary_precision` the decimal string is stored verbatim.
fn leaf_to_json(node: NodeRef<'_>) -> Result<Value, serde_json::Error> {
    Ok(match &node.token().value {
        TokenValue::Text(s) => Value::String(s.clone()),
        TokenValue::Number(n) => Value::Number(Number::from_str(&n.to_string())?),
        TokenValue::Null | TokenValue::Punct(_) => Value::Null,
    })
}
