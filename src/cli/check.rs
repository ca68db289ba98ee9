//! Validate condition sentences

use tracing::info;

use super::CliError;
use crate::ast::Token;
use crate::lexer::tokenize;
use crate::output::{to_json, to_json_pretty, to_outline};
use crate::Parser;

/// What a successful check reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Show {
    /// Only confirm the condition is valid
    #[default]
    Summary,
    /// The raw token stream, without parsing
    Tokens,
    /// Indented outline of the parse tree
    Tree,
    /// The canonical condition JSON
    Json,
}

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The condition, as JSON text
    pub condition: String,
    pub show: Show,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid { nodes: usize },
    Tokens(Vec<Token>),
    Tree(String),
    Json(String),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let condition = options.condition.trim();
    if condition.is_empty() {
        return Err(CliError::NoInput);
    }

    let tokens = tokenize(condition)?;
    if options.show == Show::Tokens {
        return Ok(CheckResult::Tokens(tokens));
    }

    let tree = Parser::new().parse(&tokens)?;
    info!(tokens = tokens.len(), nodes = tree.len(), "condition is valid");

    Ok(match options.show {
        Show::Tree => CheckResult::Tree(to_outline(&tree)),
        Show::Json if options.pretty => CheckResult::Json(to_json_pretty(&tree)?),
        Show::Json => CheckResult::Json(to_json(&tree)?),
        Show::Summary | Show::Tokens => CheckResult::SyntaxValid { nodes: tree.len() },
    })
}
