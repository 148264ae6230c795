//! Folding several trees into one

use crate::condition::ast::{AstNode, LogicalOp};

/// Combine trees with AND into a left-leaning chain
/// `(((T1 AND T2) AND T3) ...)`.
///
/// No trees yields `None`; a single tree is returned unchanged.
pub fn combine<I>(trees: I) -> Option<AstNode>
where
    I: IntoIterator<Item = AstNode>,
{
    combine_with(LogicalOp::And, trees)
}

/// Combine trees with the given operator, left-leaning, in iteration order
pub fn combine_with<I>(op: LogicalOp, trees: I) -> Option<AstNode>
where
    I: IntoIterator<Item = AstNode>,
{
    trees
        .into_iter()
        .reduce(|combined, next| AstNode::operator(op, combined, next))
}
