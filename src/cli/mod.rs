//! CLI support for condition-lang
//!
//! Provides programmatic access to the `cond` commands so other tools can
//! validate conditions without shelling out.

mod check;
mod docs;

pub use check::{CheckOptions, CheckResult, Show, execute_check};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Tokenizer error: {0}")]
    Lex(#[from] crate::LexError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] crate::ConditionSyntaxError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("No condition provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,

    #[error("Unknown category: '{0}'\nRun 'cond docs' to see available categories.")]
    UnknownCategory(String),
}
