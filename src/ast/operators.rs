use std::fmt;

use crate::ast::TokenType;

/// Binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Equal (`$eq`)
    Eq,
    /// Not equal (`$neq`)
    Neq,
    /// Less than (`$lt`)
    Lt,
    /// Less than or equal (`$lte`)
    Lte,
    /// Greater than (`$gt`)
    Gt,
    /// Greater than or equal (`$gte`)
    Gte,
    /// Pattern match (`$like`)
    Like,
    /// Negated pattern match (`$notlike`)
    NotLike,
}

/// Set membership operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InOp {
    /// `$in`
    In,
    /// `$notIn`
    NotIn,
}

/// Null checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullOp {
    /// `$is`
    Is,
    /// `$isnt`
    Isnt,
}

/// Logical connectives over a list of sub-conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    /// `$and`
    And,
    /// `$or`
    Or,
}

/// Any operator lexeme the grammar accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Comparison(ComparisonOp),
    In(InOp),
    Null(NullOp),
    Boolean(BoolOp),
}

const ALL: [Operator; 14] = [
    Operator::Comparison(ComparisonOp::Eq),
    Operator::Comparison(ComparisonOp::Neq),
    Operator::Comparison(ComparisonOp::Lt),
    Operator::Comparison(ComparisonOp::Lte),
    Operator::Comparison(ComparisonOp::Gt),
    Operator::Comparison(ComparisonOp::Gte),
    Operator::Comparison(ComparisonOp::Like),
    Operator::Comparison(ComparisonOp::NotLike),
    Operator::In(InOp::In),
    Operator::In(InOp::NotIn),
    Operator::Null(NullOp::Is),
    Operator::Null(NullOp::Isnt),
    Operator::Boolean(BoolOp::And),
    Operator::Boolean(BoolOp::Or),
];

impl Operator {
    /// Every operator, grouped by category.
    pub fn all() -> &'static [Operator] {
        &ALL
    }

    /// Look up an operator by its exact (case-sensitive) lexeme.
    ///
    /// ```
    /// use condition_lang::ast::{Operator, InOp};
    ///
    /// assert_eq!(Operator::from_lexeme("$notIn"), Some(Operator::In(InOp::NotIn)));
    /// assert_eq!(Operator::from_lexeme("$notin"), None);
    /// ```
    pub fn from_lexeme(lexeme: &str) -> Option<Operator> {
        ALL.iter().copied().find(|op| op.as_str() == lexeme)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Comparison(op) => match op {
                ComparisonOp::Eq => "$eq",
                ComparisonOp::Neq => "$neq",
                ComparisonOp::Lt => "$lt",
                ComparisonOp::Lte => "$lte",
                ComparisonOp::Gt => "$gt",
                ComparisonOp::Gte => "$gte",
                ComparisonOp::Like => "$like",
                ComparisonOp::NotLike => "$notlike",
            },
            Operator::In(InOp::In) => "$in",
            Operator::In(InOp::NotIn) => "$notIn",
            Operator::Null(NullOp::Is) => "$is",
            Operator::Null(NullOp::Isnt) => "$isnt",
            Operator::Boolean(BoolOp::And) => "$and",
            Operator::Boolean(BoolOp::Or) => "$or",
        }
    }

    /// The token category a lexer assigns to this operator.
    pub fn token_type(&self) -> TokenType {
        match self {
            Operator::Comparison(_) => TokenType::ComparisonOperator,
            Operator::In(_) => TokenType::InComparisonOperator,
            Operator::Null(_) => TokenType::NullComparisonOperator,
            Operator::Boolean(_) => TokenType::BooleanOperator,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
