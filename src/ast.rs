//! # Condition Language - Tokens and Parse Tree
//!
//! This module defines the vocabulary shared by the tokenizer, the parser and
//! anything that consumes a parsed condition (e.g. a WHERE clause compiler).
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Token categories, lexemes and the [`Token`] record
//! - **[operators]** - The operator lexeme table (`$eq`, `$in`, `$is`, `$and`, ...)
//! - **[tree]** - The arena-backed [`ParseTree`] built by the parser
//!
//! ## Condition Shape
//!
//! Every condition is a single-key object whose key is an operator:
//!
//! ```text
//! {"$eq": {"name": ":name"}}
//! {"$in": {"id": [1, 2, 3]}}
//! {"$is": {"deletedAt": null}}
//! {"$and": [{"$eq": {"a": ":x"}}, {"$gt": {"b": 5}}]}
//! ```
//!
//! ## Tree Shape
//!
//! Structural characters never reach the tree. Operators become internal
//! nodes and operands become their children, in sentence order:
//!
//! ```text
//!        __$eq__
//!       /       \
//!    name      :name
//! ```
pub mod operators;
pub mod tokens;
pub mod tree;

pub use operators::{BoolOp, ComparisonOp, InOp, NullOp, Operator};
pub use tokens::{Punct, Token, TokenType, TokenValue};
pub use tree::{NodeId, NodeRef, ParseNode, ParseTree, PreOrder};
