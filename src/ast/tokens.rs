use std::fmt;

use rust_decimal::Decimal;

use crate::ast::Operator;

/// The closed set of token categories a condition sentence is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Operators
    /// Binary comparison between a column and a value
    ///
    /// # Examples
    /// ```text
    /// $eq  $neq  $lt  $lte  $gt  $gte  $like  $notlike
    /// ```
    ComparisonOperator,

    /// Membership test against a bracketed list of values
    ///
    /// # Examples
    /// ```text
    /// $in  $notIn
    /// ```
    InComparisonOperator,

    /// Null test, the right-hand side is `null` or a parameter
    ///
    /// # Examples
    /// ```text
    /// $is  $isnt
    /// ```
    NullComparisonOperator,

    /// Logical connective over a bracketed list of conditions
    ///
    /// # Examples
    /// ```text
    /// $and  $or
    /// ```
    BooleanOperator,

    // Operands
    /// Any string naming a table column
    ///
    /// # Examples
    /// ```text
    /// "name"
    /// "users.createdAt"
    /// ```
    Column,

    /// A string prefixed with `:`, bound later by the query layer
    ///
    /// # Examples
    /// ```text
    /// ":name"
    /// ":minAge"
    /// ```
    Parameter,

    /// Numeric literal
    Number,

    /// The `null` literal
    Null,

    /// Structural character: `{`, `}`, `[`, `]`, `:`, `,`
    Punctuation,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::ComparisonOperator => "comparison-operator",
            TokenType::InComparisonOperator => "in-comparison-operator",
            TokenType::NullComparisonOperator => "null-comparison-operator",
            TokenType::BooleanOperator => "boolean-operator",
            TokenType::Column => "column",
            TokenType::Parameter => "parameter",
            TokenType::Number => "number",
            TokenType::Null => "null",
            TokenType::Punctuation => "punctuation",
        }
    }

    /// Operator categories become internal nodes of the parse tree.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenType::ComparisonOperator
                | TokenType::InComparisonOperator
                | TokenType::NullComparisonOperator
                | TokenType::BooleanOperator
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Punct {
    /// Left brace, opens a condition or a column/value pair
    LBrace,
    /// Right brace
    RBrace,
    /// Left bracket, opens a value or condition list
    LBracket,
    /// Right bracket
    RBracket,
    /// Colon between a key and what it maps to
    Colon,
    /// Comma between list elements
    Comma,
}

impl Punct {
    pub fn as_char(&self) -> char {
        match self {
            Punct::LBrace => '{',
            Punct::RBrace => '}',
            Punct::LBracket => '[',
            Punct::RBracket => ']',
            Punct::Colon => ':',
            Punct::Comma => ',',
        }
    }

    pub fn from_char(c: char) -> Option<Punct> {
        match c {
            '{' => Some(Punct::LBrace),
            '}' => Some(Punct::RBrace),
            '[' => Some(Punct::LBracket),
            ']' => Some(Punct::RBracket),
            ':' => Some(Punct::Colon),
            ',' => Some(Punct::Comma),
            _ => None,
        }
    }
}

impl fmt::Display for Punct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The lexeme a token carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenValue {
    /// Operator, column and parameter lexemes
    Text(String),
    /// Exact numeric literal
    Number(Decimal),
    /// The `null` literal
    Null,
    /// A structural character
    Punct(Punct),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Text(s) => f.write_str(s),
            TokenValue::Number(n) => write!(f, "{}", n),
            TokenValue::Null => f.write_str("null"),
            TokenValue::Punct(p) => write!(f, "{}", p),
        }
    }
}

/// A single lexical unit of a condition sentence.
///
/// Tokens are produced once by a tokenizer and only read by the parser.
///
/// # Examples
///
/// ```
/// use condition_lang::ast::{Punct, Token, TokenType};
///
/// let column = Token::column("name");
/// assert_eq!(column.token_type, TokenType::Column);
/// assert!(!column.terminal);
/// assert_eq!(column.to_string(), "column:name");
///
/// assert!(Token::punct(Punct::Comma).terminal);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub token_type: TokenType,
    pub value: TokenValue,
    /// Structural tokens shape the sentence but never reach the tree.
    pub terminal: bool,
}

impl Token {
    pub fn new(token_type: TokenType, value: TokenValue) -> Self {
        Token {
            terminal: token_type == TokenType::Punctuation,
            token_type,
            value,
        }
    }

    pub fn operator(op: Operator) -> Self {
        Token::new(op.token_type(), TokenValue::Text(op.as_str().to_string()))
    }

    pub fn column(name: impl Into<String>) -> Self {
        Token::new(TokenType::Column, TokenValue::Text(name.into()))
    }

    /// `name` includes the leading `:`.
    pub fn parameter(name: impl Into<String>) -> Self {
        Token::new(TokenType::Parameter, TokenValue::Text(name.into()))
    }

    pub fn number(n: impl Into<Decimal>) -> Self {
        Token::new(TokenType::Number, TokenValue::Number(n.into()))
    }

    pub fn null() -> Self {
        Token::new(TokenType::Null, TokenValue::Null)
    }

    pub fn punct(p: Punct) -> Self {
        Token::new(TokenType::Punctuation, TokenValue::Punct(p))
    }

    /// True only for a punctuation token carrying `p`.
    ///
    /// A column literally named `","` is not a comma.
    pub fn is_punct(&self, p: Punct) -> bool {
        self.token_type == TokenType::Punctuation && self.value == TokenValue::Punct(p)
    }

    /// The operator this token names, if it is an operator token.
    pub fn as_operator(&self) -> Option<Operator> {
        match (&self.value, self.token_type.is_operator()) {
            (TokenValue::Text(s), true) => Operator::from_lexeme(s),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.token_type, self.value)
    }
}
