//! Persisted rules and the storage seam

mod store;

pub use store::*;

use crate::attribute::Attributes;
use crate::condition::{combine, evaluate, AstNode};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Identifier assigned by a rule store
pub type RuleId = u64;

/// Expression text paired with its parsed tree.
///
/// Serialises as `{"id": .., "ruleString": .., "ast": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: RuleId,
    pub rule_string: String,
    pub ast: AstNode,
}

/// Evaluate every rule as one combined AND tree.
///
/// An empty rule list is never satisfied.
pub fn evaluate_rules(rules: &[Rule], attributes: &Attributes) -> Result<bool> {
    let combined = combine(rules.iter().map(|rule| rule.ast.clone()));
    let result = evaluate(combined.as_ref(), attributes)?;
    tracing::debug!(rules = rules.len(), result, "evaluated combined rules");
    Ok(result)
}
