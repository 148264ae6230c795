//! Operand condition splitting
//!
//! An operand node stores its condition as raw text; it is split into key,
//! comparator and literal when evaluated.

use crate::error::{Result, RuleEngineError};
use std::fmt;
use std::str::FromStr;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// Greater than (>)
    Greater,
    /// Less than (<)
    Less,
    /// Greater than or equal (>=)
    GreaterEqual,
    /// Less than or equal (<=)
    LessEqual,
    /// Equal (=)
    Equal,
}

impl Comparator {
    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::Greater => ">",
            Comparator::Less => "<",
            Comparator::GreaterEqual => ">=",
            Comparator::LessEqual => "<=",
            Comparator::Equal => "=",
        }
    }

    /// Apply an ordering comparator to two numbers. `Equal` compares exactly.
    #[inline]
    pub fn compare(self, left: f64, right: f64) -> bool {
        match self {
            Comparator::Greater => left > right,
            Comparator::Less => left < right,
            Comparator::GreaterEqual => left >= right,
            Comparator::LessEqual => left <= right,
            Comparator::Equal => left == right,
        }
    }
}

impl FromStr for Comparator {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            ">" => Ok(Comparator::Greater),
            "<" => Ok(Comparator::Less),
            ">=" => Ok(Comparator::GreaterEqual),
            "<=" => Ok(Comparator::LessEqual),
            "=" => Ok(Comparator::Equal),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Text(String),
}

impl Literal {
    fn parse(raw: &str) -> Literal {
        if let Some(inner) = raw
            .strip_prefix('\'')
            .and_then(|rest| rest.strip_suffix('\''))
        {
            return Literal::Text(inner.to_string());
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Literal::Number(n),
            _ => Literal::Text(raw.to_string()),
        }
    }
}

/// Characters that can make up a comparator
fn is_comparator_char(c: char) -> bool {
    matches!(c, '<' | '>' | '=' | '!')
}

/// A condition split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct Condition<'a> {
    pub key: &'a str,
    pub comparator: Comparator,
    pub literal: Literal,
}

impl<'a> Condition<'a> {
    /// Split at the first run of comparator characters.
    ///
    /// A run that is not one of `>=`, `<=`, `>`, `<`, `=` (for example `!=`
    /// or `=>`) is an invalid operator, as is a condition with no run at all.
    pub fn parse(condition: &'a str) -> Result<Condition<'a>> {
        let start = condition.find(is_comparator_char).ok_or_else(|| {
            RuleEngineError::InvalidOperator {
                operator: String::new(),
                condition: condition.to_string(),
            }
        })?;
        let rest = &condition[start..];
        let len = rest
            .find(|c: char| !is_comparator_char(c))
            .unwrap_or(rest.len());
        let symbol = &rest[..len];

        let comparator =
            symbol
                .parse::<Comparator>()
                .map_err(|_| RuleEngineError::InvalidOperator {
                    operator: symbol.to_string(),
                    condition: condition.to_string(),
                })?;

        Ok(Condition {
            key: condition[..start].trim(),
            comparator,
            literal: Literal::parse(rest[len..].trim()),
        })
    }
}
