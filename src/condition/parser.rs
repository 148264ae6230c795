//! Expression parser
//!
//! Two-stack operator-precedence (shunting-yard) parsing over the token
//! stream. AND binds tighter than OR and both are left-associative.

use crate::condition::ast::{AstNode, LogicalOp};
use crate::condition::tokenizer::{tokenize, Token};
use crate::error::{Result, RuleEngineError};
use smallvec::SmallVec;

/// Parse expression text into an AST
pub fn parse(text: &str) -> Result<AstNode> {
    let tokens =
        tokenize(text).ok_or_else(|| RuleEngineError::EmptyExpression(text.to_string()))?;

    let ast = parse_tokens(&tokens)?
        .ok_or_else(|| RuleEngineError::EmptyExpression(text.to_string()))?;

    tracing::debug!(expression = text, operands = ast.operand_count(), "parsed expression");
    Ok(ast)
}

/// Entry on the operator stack
#[derive(Debug, Clone, Copy, PartialEq)]
enum StackOp {
    OpenParen,
    Logical(LogicalOp),
}

/// Build a tree from tokens. An empty token slice yields `Ok(None)`.
pub fn parse_tokens(tokens: &[Token]) -> Result<Option<AstNode>> {
    if tokens.is_empty() {
        return Ok(None);
    }

    let mut output: Vec<AstNode> = Vec::with_capacity(tokens.len() / 2 + 1);
    let mut operators: SmallVec<[StackOp; 8]> = SmallVec::new();
    // Alternation state: an operand or "(" must come next
    let mut expect_operand = true;

    for (pos, token) in tokens.iter().enumerate() {
        match token {
            Token::Operand(condition) => {
                if !expect_operand {
                    return Err(malformed(pos, format!("unexpected condition {:?}", condition)));
                }
                output.push(AstNode::operand(condition.as_str()));
                expect_operand = false;
            }
            Token::OpenParen => {
                if !expect_operand {
                    return Err(malformed(pos, "unexpected \"(\"".to_string()));
                }
                operators.push(StackOp::OpenParen);
            }
            Token::CloseParen => {
                if expect_operand {
                    return Err(malformed(pos, "expected a condition before \")\"".to_string()));
                }
                loop {
                    match operators.pop() {
                        Some(StackOp::OpenParen) => break,
                        Some(StackOp::Logical(op)) => reduce(&mut output, op)?,
                        None => return Err(malformed(pos, "unmatched \")\"".to_string())),
                    }
                }
            }
            Token::And | Token::Or => {
                let incoming = if *token == Token::And {
                    LogicalOp::And
                } else {
                    LogicalOp::Or
                };
                if expect_operand {
                    return Err(malformed(
                        pos,
                        format!("{} is missing its left operand", incoming),
                    ));
                }
                while let Some(&StackOp::Logical(top)) = operators.last() {
                    if top.precedence() < incoming.precedence() {
                        break;
                    }
                    operators.pop();
                    reduce(&mut output, top)?;
                }
                operators.push(StackOp::Logical(incoming));
                expect_operand = true;
            }
        }
    }

    if expect_operand {
        return Err(RuleEngineError::MalformedExpression(
            "expression ends where a condition was expected".to_string(),
        ));
    }

    while let Some(entry) = operators.pop() {
        match entry {
            StackOp::Logical(op) => reduce(&mut output, op)?,
            StackOp::OpenParen => {
                return Err(RuleEngineError::MalformedExpression(
                    "unclosed \"(\"".to_string(),
                ))
            }
        }
    }

    let root = output.pop();
    if !output.is_empty() {
        return Err(RuleEngineError::MalformedExpression(format!(
            "expected a single root, found {}",
            output.len() + 1
        )));
    }

    Ok(root)
}

/// Pop two operands and push them back as one operator node. The first
/// popped entry becomes the right child.
fn reduce(output: &mut Vec<AstNode>, op: LogicalOp) -> Result<()> {
    let right = output.pop();
    let left = output.pop();
    match (left, right) {
        (Some(left), Some(right)) => {
            output.push(AstNode::operator(op, left, right));
            Ok(())
        }
        _ => Err(RuleEngineError::MalformedExpression(format!(
            "{} is missing an operand",
            op
        ))),
    }
}

fn malformed(pos: usize, message: String) -> RuleEngineError {
    RuleEngineError::MalformedExpression(format!("token {}: {}", pos + 1, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(s: &str) -> AstNode {
        AstNode::operand(s)
    }

    #[test]
    fn test_parse_simple_condition() {
        assert_eq!(parse("age > 30").unwrap(), leaf("age > 30"));
    }

    #[test]
    fn test_parse_and_condition() {
        let ast = parse("age > 30 AND department = 'HR'").unwrap();
        assert_eq!(
            ast,
            AstNode::and(leaf("age > 30"), leaf("department = 'HR'"))
        );
    }

    #[test]
    fn test_parse_operator_precedence() {
        // a OR b AND c parses as a OR (b AND c)
        let ast = parse("a=1 OR b=2 AND c=3").unwrap();
        assert_eq!(
            ast,
            AstNode::or(leaf("a=1"), AstNode::and(leaf("b=2"), leaf("c=3")))
        );

        let ast = parse("a=1 AND b=2 OR c=3").unwrap();
        assert_eq!(
            ast,
            AstNode::or(AstNode::and(leaf("a=1"), leaf("b=2")), leaf("c=3"))
        );
    }

    #[test]
    fn test_parse_parentheses_override_precedence() {
        let ast = parse("(a=1 OR b=2) AND c=3").unwrap();
        assert_eq!(
            ast,
            AstNode::and(AstNode::or(leaf("a=1"), leaf("b=2")), leaf("c=3"))
        );
    }

    #[test]
    fn test_parse_left_associative() {
        let ast = parse("a=1 AND b=2 AND c=3").unwrap();
        assert_eq!(
            ast,
            AstNode::and(AstNode::and(leaf("a=1"), leaf("b=2")), leaf("c=3"))
        );

        let ast = parse("a=1 OR b=2 OR c=3").unwrap();
        assert_eq!(
            ast,
            AstNode::or(AstNode::or(leaf("a=1"), leaf("b=2")), leaf("c=3"))
        );
    }

    #[test]
    fn test_parse_nested_parentheses() {
        let ast = parse("((age > 30 AND department = 'Sales') OR (age < 25 AND department = 'Marketing')) AND (salary > 50000 OR experience > 5)").unwrap();
        assert_eq!(
            ast,
            AstNode::and(
                AstNode::or(
                    AstNode::and(leaf("age > 30"), leaf("department = 'Sales'")),
                    AstNode::and(leaf("age < 25"), leaf("department = 'Marketing'")),
                ),
                AstNode::or(leaf("salary > 50000"), leaf("experience > 5")),
            )
        );
    }

    #[test]
    fn test_parse_redundant_parentheses() {
        assert_eq!(parse("((age > 30))").unwrap(), leaf("age > 30"));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "a=1 OR (b=2 AND c=3) OR d=4";
        assert_eq!(parse(text).unwrap(), parse(text).unwrap());
    }

    #[test]
    fn test_missing_left_operand() {
        let err = parse("AND age > 30").unwrap_err();
        assert!(matches!(err, RuleEngineError::MalformedExpression(_)));
    }

    #[test]
    fn test_missing_right_operand() {
        let err = parse("age > 30 OR").unwrap_err();
        assert!(matches!(err, RuleEngineError::MalformedExpression(_)));
    }

    #[test]
    fn test_adjacent_operands() {
        let err = parse("a=1 b=2").unwrap_err();
        assert!(matches!(err, RuleEngineError::MalformedExpression(_)));

        // Postfix order must not sneak through
        let err = parse("a=1 b=2 OR").unwrap_err();
        assert!(matches!(err, RuleEngineError::MalformedExpression(_)));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert!(matches!(
            parse("(a=1 AND b=2").unwrap_err(),
            RuleEngineError::MalformedExpression(_)
        ));
        assert!(matches!(
            parse("a=1 AND b=2)").unwrap_err(),
            RuleEngineError::MalformedExpression(_)
        ));
        assert!(matches!(
            parse("()").unwrap_err(),
            RuleEngineError::MalformedExpression(_)
        ));
    }

    #[test]
    fn test_no_tokens_is_empty_expression() {
        assert!(matches!(
            parse("not an expression").unwrap_err(),
            RuleEngineError::EmptyExpression(_)
        ));
        assert!(matches!(
            parse("").unwrap_err(),
            RuleEngineError::EmptyExpression(_)
        ));
    }

    #[test]
    fn test_parse_tokens_empty() {
        assert_eq!(parse_tokens(&[]).unwrap(), None);
    }

    #[test]
    fn test_deeply_nested() {
        let depth = 64;
        let text = format!("{}a=1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&text).unwrap(), leaf("a=1"));
    }
}
