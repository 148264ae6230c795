//! Rule Engine Core - boolean eligibility rules over named attributes
//!
//! Expressions such as `age > 30 AND department = 'HR'` are tokenized,
//! parsed into a tree with AND binding tighter than OR, stored as rules and
//! evaluated against attribute sets, one rule at a time or all together.
//!
//! ```
//! use rule_engine_core::{Attributes, EngineConfig, RuleEngine};
//!
//! let engine = RuleEngine::new(EngineConfig::default()).unwrap();
//! engine.create_rule("age > 30 AND department = 'HR'").unwrap();
//!
//! let subject = Attributes::new().with("age", 35).with("department", "HR");
//! assert!(engine.evaluate(&subject).unwrap().eligible);
//! ```

pub mod attribute;
pub mod condition;
pub mod config;
pub mod engine;
pub mod error;
pub mod rule;

pub use crate::attribute::{AttributeValue, Attributes};
pub use crate::condition::{check, combine, evaluate, parse, tokenize, AstNode, LogicalOp, Token};
pub use crate::config::{EngineConfig, ErrorPolicy, MatchMode};
pub use crate::engine::{Evaluation, RuleEngine, RuleFailure};
pub use crate::error::{Result, RuleEngineError};
pub use crate::rule::{evaluate_rules, InMemoryRuleStore, Rule, RuleId, RuleStore};

/// Parse expression text into a tree, failing on text that yields no
/// expression or a malformed one
pub fn create_rule_ast(text: &str) -> Result<AstNode> {
    condition::parse(text)
}

/// Parse a JSON attribute object and evaluate one tree against it
pub fn evaluate_json(ast: &AstNode, attributes_json: &str) -> Result<bool> {
    let attributes = Attributes::from_json(attributes_json)?;
    condition::check(ast, &attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end() {
        let ast = create_rule_ast("age > 30 AND department = 'HR'").unwrap();
        assert!(evaluate_json(&ast, r#"{"age": 40, "department": "HR"}"#).unwrap());
        assert!(!evaluate_json(&ast, r#"{"age": 40, "department": "IT"}"#).unwrap());
        assert!(!evaluate_json(&ast, r#"{}"#).unwrap());
    }

    #[test]
    fn test_evaluate_json_rejects_bad_attributes() {
        let ast = create_rule_ast("age > 30").unwrap();
        assert!(matches!(
            evaluate_json(&ast, r#"{"age": true}"#),
            Err(RuleEngineError::Serialization(_))
        ));
    }
}
