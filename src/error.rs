//! Error types for the rule engine

use thiserror::Error;

/// Main error type for the rule engine
#[derive(Error, Debug)]
pub enum RuleEngineError {
    /// The text contained nothing the tokenizer recognises
    #[error("Could not build an expression from this text: {0:?}")]
    EmptyExpression(String),

    #[error("Malformed expression: {0}")]
    MalformedExpression(String),

    #[error("Invalid operator {operator:?} in condition {condition:?}")]
    InvalidOperator { operator: String, condition: String },

    #[error("Invalid literal {literal:?} in condition {condition:?}")]
    InvalidLiteral { literal: String, condition: String },

    #[error("Type mismatch in condition {condition:?}: attribute {key:?} is {found}, expected {expected}")]
    TypeMismatch {
        condition: String,
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Rule not found: {0}")]
    RuleNotFound(u64),

    #[error("Rule ids exhausted: no id after {0}")]
    RuleIdsExhausted(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl RuleEngineError {
    /// True for failures raised while evaluating a tree, as opposed to
    /// failures to build one.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            RuleEngineError::InvalidOperator { .. }
                | RuleEngineError::InvalidLiteral { .. }
                | RuleEngineError::TypeMismatch { .. }
        )
    }
}

/// Result type alias for the rule engine
pub type Result<T> = std::result::Result<T, RuleEngineError>;
