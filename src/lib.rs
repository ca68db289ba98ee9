pub mod ast;
pub mod cli;
pub mod lexer;
pub mod output;
pub mod parser;

pub use ast::{NodeId, NodeRef, Operator, ParseTree, Punct, Token, TokenType, TokenValue};
pub use lexer::{LexError, Lexer, tokenize, tokenize_value};
pub use output::{to_json, to_json_pretty, to_outline, tree_to_json};
pub use parser::{ConditionSyntaxError, Expected, Parser, parse};
