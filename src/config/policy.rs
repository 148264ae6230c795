//! Evaluation policy settings

use serde::{Deserialize, Serialize};

/// How the results of several stored rules combine into one judgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Every rule must hold (the rules are combined with AND)
    #[default]
    All,
    /// At least one rule must hold
    Any,
}

/// What happens when one rule fails to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPolicy {
    /// The whole evaluation fails with that rule's error
    #[default]
    Abort,
    /// The rule counts as not satisfied and the error is recorded
    TreatAsFalse,
}

impl MatchMode {
    /// Parse from user input, case-insensitive
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(MatchMode::All),
            "any" => Some(MatchMode::Any),
            _ => None,
        }
    }
}
