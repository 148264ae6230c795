//! Abstract Syntax Tree for rule expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// AST node for rule expressions
///
/// Serialises to the persisted document shape
/// `{"type": "operand", "value": "age > 30"}` /
/// `{"type": "operator", "value": "AND", "left": {..}, "right": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AstNode {
    /// Single condition like "age > 30"
    Operand { value: String },
    /// AND / OR over two subtrees
    Operator {
        value: LogicalOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
}

/// Logical operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// Binding strength: AND binds tighter than OR
    #[inline]
    pub fn precedence(self) -> u8 {
        match self {
            LogicalOp::And => 1,
            LogicalOp::Or => 0,
        }
    }

    #[inline]
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            LogicalOp::And => left && right,
            LogicalOp::Or => left || right,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AstNode {
    pub fn operand(condition: impl Into<String>) -> Self {
        AstNode::Operand {
            value: condition.into(),
        }
    }

    pub fn operator(op: LogicalOp, left: AstNode, right: AstNode) -> Self {
        AstNode::Operator {
            value: op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn and(left: AstNode, right: AstNode) -> Self {
        Self::operator(LogicalOp::And, left, right)
    }

    pub fn or(left: AstNode, right: AstNode) -> Self {
        Self::operator(LogicalOp::Or, left, right)
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, AstNode::Operand { .. })
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        match self {
            AstNode::Operand { .. } => 1,
            AstNode::Operator { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    /// Number of operand leaves
    pub fn operand_count(&self) -> usize {
        match self {
            AstNode::Operand { .. } => 1,
            AstNode::Operator { left, right, .. } => left.operand_count() + right.operand_count(),
        }
    }

    /// Operand conditions in left-to-right order
    pub fn operands(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.operand_count());
        self.collect_operands(&mut out);
        out
    }

    fn collect_operands<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            AstNode::Operand { value } => out.push(value),
            AstNode::Operator { left, right, .. } => {
                left.collect_operands(out);
                right.collect_operands(out);
            }
        }
    }
}

/// Renders expression text that parses back to the same tree. Operator
/// children are always parenthesised.
impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Operand { value } => f.write_str(value),
            AstNode::Operator { value, left, right } => {
                write_child(f, left)?;
                write!(f, " {} ", value)?;
                write_child(f, right)
            }
        }
    }
}

fn write_child(f: &mut fmt::Formatter<'_>, child: &AstNode) -> fmt::Result {
    if child.is_operand() {
        write!(f, "{}", child)
    } else {
        write!(f, "({})", child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> AstNode {
        // (age > 30 AND department = 'HR') OR salary > 50000
        AstNode::or(
            AstNode::and(
                AstNode::operand("age > 30"),
                AstNode::operand("department = 'HR'"),
            ),
            AstNode::operand("salary > 50000"),
        )
    }

    #[test]
    fn test_persisted_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "operator",
                "value": "OR",
                "left": {
                    "type": "operator",
                    "value": "AND",
                    "left": { "type": "operand", "value": "age > 30" },
                    "right": { "type": "operand", "value": "department = 'HR'" }
                },
                "right": { "type": "operand", "value": "salary > 50000" }
            })
        );
    }

    #[test]
    fn test_deserialize_persisted_shape() {
        let node: AstNode = serde_json::from_value(json!({
            "type": "operator",
            "value": "AND",
            "left": { "type": "operand", "value": "a = 1" },
            "right": { "type": "operand", "value": "b = 2" }
        }))
        .unwrap();
        assert_eq!(
            node,
            AstNode::and(AstNode::operand("a = 1"), AstNode::operand("b = 2"))
        );

        // An operator node without children is not a valid tree
        let missing_child = serde_json::from_value::<AstNode>(json!({
            "type": "operator",
            "value": "OR",
            "left": { "type": "operand", "value": "a = 1" }
        }));
        assert!(missing_child.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            sample().to_string(),
            "(age > 30 AND department = 'HR') OR salary > 50000"
        );
    }

    #[test]
    fn test_shape_helpers() {
        let ast = sample();
        assert_eq!(ast.depth(), 3);
        assert_eq!(ast.operand_count(), 3);
        assert_eq!(
            ast.operands(),
            vec!["age > 30", "department = 'HR'", "salary > 50000"]
        );
    }

    #[test]
    fn test_logical_op() {
        assert!(LogicalOp::And.precedence() > LogicalOp::Or.precedence());
        assert!(LogicalOp::And.apply(true, true));
        assert!(!LogicalOp::And.apply(true, false));
        assert!(LogicalOp::Or.apply(false, true));
        assert!(!LogicalOp::Or.apply(false, false));
        assert_eq!(LogicalOp::Or.to_string(), "OR");
    }
}
