//! Evaluation results

use crate::config::MatchMode;
use crate::error::RuleEngineError;
use crate::rule::RuleId;

/// A rule that could not be evaluated and was counted as not satisfied
#[derive(Debug)]
pub struct RuleFailure {
    pub rule_id: RuleId,
    pub error: RuleEngineError,
}

/// Outcome of evaluating the stored rules against one attribute set
#[derive(Debug)]
pub struct Evaluation {
    pub mode: MatchMode,
    /// The overall yes/no judgement
    pub eligible: bool,
    /// Rules that held, in store order
    pub matched: Vec<RuleId>,
    /// Rules skipped under `ErrorPolicy::TreatAsFalse`
    pub failed: Vec<RuleFailure>,
    /// Number of rules considered
    pub total: usize,
}

impl Evaluation {
    pub(crate) fn new(mode: MatchMode, total: usize) -> Self {
        Self {
            mode,
            eligible: false,
            matched: Vec::with_capacity(total),
            failed: Vec::new(),
            total,
        }
    }

    /// Fix the overall judgement from the per-rule results.
    ///
    /// With no rules there is nothing to satisfy, so the subject is not
    /// eligible in either mode.
    pub(crate) fn finish(mut self) -> Self {
        self.eligible = match self.mode {
            MatchMode::All => self.total > 0 && self.matched.len() == self.total,
            MatchMode::Any => !self.matched.is_empty(),
        };
        self
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_mode() {
        let mut eval = Evaluation::new(MatchMode::All, 2);
        eval.matched.push(1);
        assert!(!eval.finish().eligible);

        let mut eval = Evaluation::new(MatchMode::All, 2);
        eval.matched.extend([1, 2]);
        assert!(eval.finish().eligible);
    }

    #[test]
    fn test_any_mode() {
        let mut eval = Evaluation::new(MatchMode::Any, 3);
        eval.matched.push(3);
        assert!(eval.finish().eligible);

        assert!(!Evaluation::new(MatchMode::Any, 3).finish().eligible);
    }

    #[test]
    fn test_no_rules_is_not_eligible() {
        assert!(!Evaluation::new(MatchMode::All, 0).finish().eligible);
        assert!(!Evaluation::new(MatchMode::Any, 0).finish().eligible);
    }

    #[test]
    fn test_failures_mark_incomplete() {
        let mut eval = Evaluation::new(MatchMode::Any, 1);
        assert!(eval.is_complete());
        eval.failed.push(RuleFailure {
            rule_id: 1,
            error: RuleEngineError::InvalidOperator {
                operator: "!=".to_string(),
                condition: "a != 1".to_string(),
            },
        });
        assert!(!eval.is_complete());
    }
}
