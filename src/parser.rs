//! Recursive descent parser for condition sentences.
//!
//! The grammar every sentence must follow:
//!
//! ```text
//! <condition>         ::= "{" <comparison> | <null-comparison> | <in-comparison> | <logical-condition> "}"
//! <comparison>        ::= <comparison-operator> ":" "{" <column> ":" <value> "}"
//! <null-comparison>   ::= <null-comparison-operator> ":" "{" <column> ":" <nullable> "}"
//! <in-comparison>     ::= <in-comparison-operator> ":" "{" <column> ":" "[" <value> {"," <value>} "]" "}"
//! <logical-condition> ::= <boolean-operator> ":" "[" <condition> {"," <condition>} "]"
//! <nullable>          ::= null | <parameter>
//! <value>             ::= <parameter> | <column> | <number>
//! ```

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use crate::ast::tree::TreeBuilder;
use crate::ast::{ParseTree, Punct, Token, TokenType};

const PAIR_PARTS: &[TokenType] = &[
    TokenType::ComparisonOperator,
    TokenType::NullComparisonOperator,
    TokenType::InComparisonOperator,
    TokenType::BooleanOperator,
];

const NULLABLE: &[TokenType] = &[TokenType::Null, TokenType::Parameter];

const VALUE: &[TokenType] = &[TokenType::Parameter, TokenType::Column, TokenType::Number];

/// What the parser would have accepted at the failing position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A specific structural character
    Punct(Punct),
    /// A single token category
    Type(TokenType),
    /// Any of several token categories
    OneOf(&'static [TokenType]),
    /// The end of the sentence
    Eol,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Punct(p) => write!(f, "{}", p),
            Expected::Type(t) => write!(f, "<{}>", t),
            Expected::OneOf(types) => {
                let names: Vec<&str> = types.iter().map(TokenType::as_str).collect();
                write!(f, "[{}]", names.join(" | "))
            }
            Expected::Eol => f.write_str("EOL"),
        }
    }
}

/// A grammar violation, located by token index.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionSyntaxError {
    /// The token at `index` does not fit the active production.
    #[error("At index {index}.  Expected {expected} but found type {} with value {}.", .found.token_type, .found.value)]
    Unexpected {
        index: usize,
        found: Token,
        expected: Expected,
    },

    /// The sentence ended while a production still needed input.
    #[error("At index {index}.  Expected {expected} but encountered the end of the sentence prematurely.")]
    PrematureEnd { index: usize, expected: Expected },

    /// The top-level condition completed but tokens remain.
    #[error("At index {index}.  Expected EOL but found type {} with value {}.", .found.token_type, .found.value)]
    TrailingInput { index: usize, found: Token },
}

impl ConditionSyntaxError {
    /// Position of the first offending token (the token count on premature end).
    pub fn index(&self) -> usize {
        match self {
            ConditionSyntaxError::Unexpected { index, .. }
            | ConditionSyntaxError::PrematureEnd { index, .. }
            | ConditionSyntaxError::TrailingInput { index, .. } => *index,
        }
    }

    /// What would have been accepted at [`index`](Self::index).
    pub fn expected(&self) -> Expected {
        match self {
            ConditionSyntaxError::Unexpected { expected, .. }
            | ConditionSyntaxError::PrematureEnd { expected, .. } => *expected,
            ConditionSyntaxError::TrailingInput { .. } => Expected::Eol,
        }
    }

    /// The offending token, `None` when the sentence ran out.
    pub fn found(&self) -> Option<&Token> {
        match self {
            ConditionSyntaxError::Unexpected { found, .. }
            | ConditionSyntaxError::TrailingInput { found, .. } => Some(found),
            ConditionSyntaxError::PrematureEnd { .. } => None,
        }
    }

    /// True when the sentence ran out before the grammar was satisfied.
    pub fn is_premature_end(&self) -> bool {
        matches!(self, ConditionSyntaxError::PrematureEnd { .. })
    }
}

type ParseResult<T> = Result<T, ConditionSyntaxError>;

/// Condition parser.
///
/// Holds no state between calls; every [`Parser::parse`] starts from a fresh
/// cursor, so one parser can serve any number of threads.
///
/// ```
/// use condition_lang::{lexer::tokenize, Parser};
///
/// let tokens = tokenize(r#"{"$in": {"id": [1, 2, 3]}}"#).unwrap();
/// let tree = Parser::new().parse(&tokens).unwrap();
///
/// assert_eq!(tree.root().token().to_string(), "in-comparison-operator:$in");
/// assert_eq!(tree.root().children().len(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parse a complete token sentence into a tree.
    ///
    /// # Errors
    ///
    /// Returns a [`ConditionSyntaxError`] at the first token that violates
    /// the grammar, when the sentence ends early, or when tokens remain after
    /// the top-level condition.
    pub fn parse(&self, tokens: &[Token]) -> ParseResult<ParseTree> {
        debug!(tokens = tokens.len(), "parsing condition");

        let mut state = ParseState::new(tokens);
        let result = state.condition().and_then(|()| state.finish());

        match &result {
            Ok(tree) => debug!(nodes = tree.len(), "condition parsed"),
            Err(e) => debug!(error = %e, "condition rejected"),
        }
        result
    }
}

/// Convenience wrapper around [`Parser::parse`].
pub fn parse(tokens: &[Token]) -> ParseResult<ParseTree> {
    Parser::new().parse(tokens)
}

/// Cursor and tree under construction for a single parse call.
struct ParseState<'a> {
    tokens: &'a [Token],
    index: usize,
    builder: TreeBuilder,
}

impl<'a> ParseState<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        ParseState {
            tokens,
            index: 0,
            builder: TreeBuilder::new(),
        }
    }

    fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn error(&self, expected: Expected) -> ConditionSyntaxError {
        match self.current() {
            Some(token) => ConditionSyntaxError::Unexpected {
                index: self.index,
                found: token.clone(),
                expected,
            },
            None => ConditionSyntaxError::PrematureEnd {
                index: self.index,
                expected,
            },
        }
    }

    fn check_punct(&self, p: Punct) -> bool {
        self.current().is_some_and(|t| t.is_punct(p))
    }

    /// Structural characters are verified and dropped.
    fn expect_punct(&mut self, p: Punct) -> ParseResult<()> {
        if !self.check_punct(p) {
            return Err(self.error(Expected::Punct(p)));
        }
        self.advance();
        Ok(())
    }

    /// The current token must be of `token_type`; it becomes a tree node.
    fn match_type(&mut self, token_type: TokenType) -> ParseResult<()> {
        match self.current() {
            Some(token) if token.token_type == token_type => {
                trace!(index = self.index, token = %token, "consumed");
                self.builder.add(token.clone());
                self.advance();
                Ok(())
            }
            _ => Err(self.error(Expected::Type(token_type))),
        }
    }

    /// Dispatch point: the current token's type must be one of `types`.
    fn peek_one_of(&self, types: &'static [TokenType]) -> ParseResult<TokenType> {
        match self.current() {
            Some(token) if types.contains(&token.token_type) => Ok(token.token_type),
            _ => Err(self.error(Expected::OneOf(types))),
        }
    }

    fn finish(self) -> ParseResult<ParseTree> {
        if let Some(token) = self.current() {
            return Err(ConditionSyntaxError::TrailingInput {
                index: self.index,
                found: token.clone(),
            });
        }

        self.builder
            .build()
            .ok_or(ConditionSyntaxError::PrematureEnd {
                index: self.index,
                expected: Expected::OneOf(PAIR_PARTS),
            })
    }

    // <condition> ::= "{" <comparison> | <null-comparison> | <in-comparison> | <logical-condition> "}"
    fn condition(&mut self) -> ParseResult<()> {
        self.expect_punct(Punct::LBrace)?;

        match self.peek_one_of(PAIR_PARTS)? {
            TokenType::ComparisonOperator => self.comparison()?,
            TokenType::NullComparisonOperator => self.null_comparison()?,
            TokenType::InComparisonOperator => self.in_comparison()?,
            _ => self.logical_condition()?,
        }

        self.expect_punct(Punct::RBrace)
    }

    // <comparison> ::= <comparison-operator> ":" "{" <column> ":" <value> "}"
    fn comparison(&mut self) -> ParseResult<()> {
        self.match_type(TokenType::ComparisonOperator)?;
        self.expect_punct(Punct::Colon)?;
        self.expect_punct(Punct::LBrace)?;
        self.match_type(TokenType::Column)?;
        self.expect_punct(Punct::Colon)?;
        self.value()?;
        self.expect_punct(Punct::RBrace)
    }

    // <null-comparison> ::= <null-comparison-operator> ":" "{" <column> ":" <nullable> "}"
    fn null_comparison(&mut self) -> ParseResult<()> {
        self.match_type(TokenType::NullComparisonOperator)?;
        self.expect_punct(Punct::Colon)?;
        self.expect_punct(Punct::LBrace)?;
        self.match_type(TokenType::Column)?;
        self.expect_punct(Punct::Colon)?;
        self.nullable()?;
        self.expect_punct(Punct::RBrace)
    }

    // <in-comparison> ::= <in-comparison-operator> ":" "{" <column> ":" "[" <value> {"," <value>} "]" "}"
    fn in_comparison(&mut self) -> ParseResult<()> {
        self.match_type(TokenType::InComparisonOperator)?;
        self.expect_punct(Punct::Colon)?;
        self.expect_punct(Punct::LBrace)?;
        self.match_type(TokenType::Column)?;
        self.expect_punct(Punct::Colon)?;
        self.expect_punct(Punct::LBracket)?;
        self.value()?;
        while self.check_punct(Punct::Comma) {
            self.advance();
            self.value()?;
        }
        self.expect_punct(Punct::RBracket)?;
        self.expect_punct(Punct::RBrace)
    }

    // <logical-condition> ::= <boolean-operator> ":" "[" <condition> {"," <condition>} "]"
    fn logical_condition(&mut self) -> ParseResult<()> {
        self.match_type(TokenType::BooleanOperator)?;
        self.expect_punct(Punct::Colon)?;
        self.expect_punct(Punct::LBracket)?;

        // Each nested condition leaves the insertion point on its own
        // operator; climb back so the next sibling hangs off this one.
        self.condition()?;
        self.builder.rise();
        while self.check_punct(Punct::Comma) {
            self.advance();
            self.condition()?;
            self.builder.rise();
        }

        self.expect_punct(Punct::RBracket)
    }

    // <nullable> ::= null | <parameter>
    fn nullable(&mut self) -> ParseResult<()> {
        let token_type = self.peek_one_of(NULLABLE)?;
        self.match_type(token_type)
    }

    // <value> ::= <parameter> | <column> | <number>
    fn value(&mut self) -> ParseResult<()> {
        let token_type = self.peek_one_of(VALUE)?;
        self.match_type(token_type)
    }
}
