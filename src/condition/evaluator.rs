//! Expression evaluator

use crate::attribute::{AttributeValue, Attributes};
use crate::condition::ast::AstNode;
use crate::condition::operand::{Comparator, Condition, Literal};
use crate::error::{Result, RuleEngineError};

/// Evaluate an optional tree. An absent tree is never satisfied.
pub fn evaluate(ast: Option<&AstNode>, attributes: &Attributes) -> Result<bool> {
    match ast {
        Some(ast) => check(ast, attributes),
        None => Ok(false),
    }
}

/// Evaluate an AST against an attribute set.
///
/// Both children of an operator are always evaluated, so an invalid
/// condition is reported regardless of where it sits in the tree.
pub fn check(ast: &AstNode, attributes: &Attributes) -> Result<bool> {
    match ast {
        AstNode::Operand { value } => check_operand(value, attributes),
        AstNode::Operator { value, left, right } => {
            let left = check(left, attributes)?;
            let right = check(right, attributes)?;
            Ok(value.apply(left, right))
        }
    }
}

fn check_operand(condition: &str, attributes: &Attributes) -> Result<bool> {
    let cond = Condition::parse(condition)?;

    let Some(actual) = attributes.get(cond.key) else {
        tracing::warn!(key = cond.key, condition, "attribute not found, condition is false");
        return Ok(false);
    };

    match (cond.comparator, &cond.literal, actual) {
        (Comparator::Equal, Literal::Text(expected), AttributeValue::Text(actual)) => {
            Ok(actual == expected)
        }
        (Comparator::Equal, Literal::Number(expected), AttributeValue::Number(actual)) => {
            Ok(actual == expected)
        }
        (Comparator::Equal, literal, actual) => Err(type_mismatch(
            condition,
            cond.key,
            literal_type(literal),
            actual,
        )),

        (op, Literal::Number(expected), AttributeValue::Number(actual)) => {
            Ok(op.compare(*actual, *expected))
        }
        (_, Literal::Text(text), _) => Err(RuleEngineError::InvalidLiteral {
            literal: text.clone(),
            condition: condition.to_string(),
        }),
        (_, Literal::Number(_), actual) => {
            Err(type_mismatch(condition, cond.key, "number", actual))
        }
    }
}

fn literal_type(literal: &Literal) -> &'static str {
    match literal {
        Literal::Number(_) => "number",
        Literal::Text(_) => "text",
    }
}

fn type_mismatch(
    condition: &str,
    key: &str,
    expected: &'static str,
    found: &AttributeValue,
) -> RuleEngineError {
    RuleEngineError::TypeMismatch {
        condition: condition.to_string(),
        key: key.to_string(),
        expected,
        found: found.type_name(),
    }
}
