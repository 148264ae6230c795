//! Expression tokenizer
//!
//! The lexer is permissive: any text that does not match an operand, a
//! logical keyword or a parenthesis is skipped. Structural checks happen in
//! the parser.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Condition such as "age > 30", kept as written
    Operand(String),
    And,
    Or,
    OpenParen,
    CloseParen,
}

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\w+\s*(?:>=|<=|>|<|=)\s*'[^']+'",
        r"|\w+\s*(?:>=|<=|>|<|=)\s*-?\d+(?:\.\d+)?",
        r"|\bAND\b|\bOR\b|\(|\)",
    ))
    .expect("token pattern is a valid regex")
});

/// Split expression text into tokens.
///
/// Returns `None` when nothing recognisable was found.
pub fn tokenize(text: &str) -> Option<Vec<Token>> {
    let tokens: Vec<Token> = TOKEN_PATTERN
        .find_iter(text)
        .map(|m| match m.as_str() {
            "AND" => Token::And,
            "OR" => Token::Or,
            "(" => Token::OpenParen,
            ")" => Token::CloseParen,
            operand => Token::Operand(operand.to_string()),
        })
        .collect();

    tracing::debug!(count = tokens.len(), "tokenized expression");

    if tokens.is_empty() {
        None
    } else {
        Some(tokens)
    }
}
