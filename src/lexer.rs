//! Tokenizer for JSON condition text.
//!
//! Strings are classified by their content: a known `$` lexeme is an
//! operator, a leading `:` marks a parameter, anything else is a column.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::trace;

use crate::ast::{Operator, Punct, Token, TokenType, TokenValue};

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?").expect("valid number regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("Unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("Invalid escape sequence '{sequence}' at position {position}")]
    InvalidEscape { sequence: String, position: usize },

    #[error("Invalid number '{lexeme}' at position {position}")]
    InvalidNumber { lexeme: String, position: usize },

    #[error("Unknown operator '{lexeme}' at position {position}")]
    UnknownOperator { lexeme: String, position: usize },

    #[error("Unsupported literal '{literal}' at position {position} (conditions have no boolean values)")]
    UnsupportedLiteral { literal: String, position: usize },
}

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if matches!(ch, ' ' | '\t' | '\n' | '\r') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_hex4(&mut self, escape_start: usize) -> Result<u32, LexError> {
        let digits = self.input.get(self.position..self.position + 4);
        let code = digits.and_then(|d| {
            d.chars()
                .all(|c| c.is_ascii_hexdigit())
                .then(|| u32::from_str_radix(d, 16).ok())
                .flatten()
        });

        match code {
            Some(code) => {
                self.position += 4;
                Ok(code)
            }
            None => Err(LexError::InvalidEscape {
                sequence: self.input[escape_start..].chars().take(6).collect(),
                position: escape_start,
            }),
        }
    }

    fn read_unicode_escape(&mut self, escape_start: usize) -> Result<char, LexError> {
        let invalid = |lexer: &Self| LexError::InvalidEscape {
            sequence: lexer.input[escape_start..lexer.position].to_string(),
            position: escape_start,
        };

        let high = self.read_hex4(escape_start)?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high).ok_or_else(|| invalid(self));
        }

        // Surrogate pair: the low half must follow immediately.
        if !self.input[self.position..].starts_with("\\u") {
            return Err(invalid(self));
        }
        self.position += 2;
        let low = self.read_hex4(escape_start)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(invalid(self));
        }
        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)).ok_or_else(|| invalid(self))
    }

    fn read_string(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_start = self.position;
                    self.advance();
                    let escaped = self.current_char().ok_or(LexError::UnterminatedString {
                        position: start,
                    })?;
                    self.advance();
                    match escaped {
                        '"' => result.push('"'),
                        '\\' => result.push('\\'),
                        '/' => result.push('/'),
                        'b' => result.push('\u{0008}'),
                        'f' => result.push('\u{000C}'),
                        'n' => result.push('\n'),
                        'r' => result.push('\r'),
                        't' => result.push('\t'),
                        'u' => result.push(self.read_unicode_escape(escape_start)?),
                        other => {
                            return Err(LexError::InvalidEscape {
                                sequence: format!("\\{}", other),
                                position: escape_start,
                            });
                        }
                    }
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedString { position: start })
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let input = self.input;
        let start = self.position;
        let lexeme = match NUMBER.find(&input[start..]) {
            Some(m) => m.as_str(),
            None => {
                return Err(LexError::UnexpectedChar {
                    ch: self.current_char().unwrap_or('-'),
                    position: start,
                });
            }
        };
        self.position += lexeme.len();

        let parsed = if lexeme.contains(['e', 'E']) {
            Decimal::from_scientific(&lexeme.to_ascii_lowercase())
        } else {
            Decimal::from_str(lexeme)
        };

        parsed
            .map(Token::number)
            .map_err(|_| LexError::InvalidNumber {
                lexeme: lexeme.to_string(),
                position: start,
            })
    }

    fn classify_string(text: String, position: usize) -> Result<Token, LexError> {
        if text.starts_with('$') {
            return Operator::from_lexeme(&text)
                .map(Token::operator)
                .ok_or(LexError::UnknownOperator {
                    lexeme: text,
                    position,
                });
        }

        if text.starts_with(':') {
            Ok(Token::new(TokenType::Parameter, TokenValue::Text(text)))
        } else {
            Ok(Token::new(TokenType::Column, TokenValue::Text(text)))
        }
    }

    /// Produce the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();
        let position = self.position;

        let token = match self.current_char() {
            None => return Ok(None),
            Some(ch) if Punct::from_char(ch).is_some() => {
                self.advance();
                Punct::from_char(ch).map(Token::punct)
            }
            Some('"') => {
                let text = self.read_string()?;
                Some(Self::classify_string(text, position)?)
            }
            Some(ch) if ch == '-' || ch.is_ascii_digit() => Some(self.read_number()?),
            Some(ch) if ch.is_alphabetic() => {
                let word = self.read_word();
                match word.as_str() {
                    "null" => Some(Token::null()),
                    "true" | "false" => {
                        return Err(LexError::UnsupportedLiteral {
                            literal: word,
                            position,
                        });
                    }
                    _ => return Err(LexError::UnexpectedChar { ch, position }),
                }
            }
            Some(ch) => return Err(LexError::UnexpectedChar { ch, position }),
        };

        if let Some(token) = &token {
            trace!(position, token = %token, "lexed token");
        }
        Ok(token)
    }

    /// Consume the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Tokenize JSON condition text.
///
/// ```
/// use condition_lang::lexer::tokenize;
///
/// let tokens = tokenize(r#"{"$eq": {"name": ":name"}}"#).unwrap();
/// assert_eq!(tokens.len(), 9);
/// assert_eq!(tokens[1].to_string(), "comparison-operator:$eq");
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

/// Tokenize an already-parsed JSON condition object.
pub fn tokenize_value(value: &serde_json::Value) -> Result<Vec<Token>, LexError> {
    tokenize(&value.to_string())
}
