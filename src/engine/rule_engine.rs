//! Main rule engine

use crate::attribute::Attributes;
use crate::condition::{check, combine, combine_with, AstNode, ExpressionCache, LogicalOp};
use crate::config::{EngineConfig, ErrorPolicy, MatchMode};
use crate::engine::{Evaluation, RuleFailure};
use crate::error::{Result, RuleEngineError};
use crate::rule::{InMemoryRuleStore, Rule, RuleId, RuleStore};

/// Creates rules from expression text and evaluates stored rules against
/// attribute sets. Safe to share between threads.
pub struct RuleEngine<S: RuleStore = InMemoryRuleStore> {
    config: EngineConfig,
    store: S,
    cache: ExpressionCache,
}

impl RuleEngine<InMemoryRuleStore> {
    /// Engine backed by an empty in-memory store
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_store(config, InMemoryRuleStore::new())
    }
}

impl<S: RuleStore> RuleEngine<S> {
    pub fn with_store(config: EngineConfig, store: S) -> Result<Self> {
        config.validate()?;
        let cache = ExpressionCache::with_capacity(config.cache_capacity);
        Ok(Self {
            config,
            store,
            cache,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse expression text and persist it as a new rule.
    ///
    /// Nothing is stored when the text does not parse.
    pub fn create_rule(&self, rule_string: &str) -> Result<Rule> {
        let ast = self.cache.get_or_parse(rule_string)?;
        let rule = self.store.insert(rule_string.to_string(), ast)?;
        tracing::info!(id = rule.id, rule = rule_string, "created rule");
        Ok(rule)
    }

    /// All stored rules in creation order
    pub fn rules(&self) -> Vec<Rule> {
        self.store.list()
    }

    pub fn rule(&self, id: RuleId) -> Result<Rule> {
        self.store.get(id).ok_or(RuleEngineError::RuleNotFound(id))
    }

    /// Every stored rule folded into one AND tree, or `None` when the store
    /// is empty
    pub fn combined_ast(&self) -> Option<AstNode> {
        combine(self.store.list().into_iter().map(|rule| rule.ast))
    }

    /// Every stored rule folded into one OR tree, the single-tree form of
    /// `MatchMode::Any`
    pub fn any_ast(&self) -> Option<AstNode> {
        combine_with(
            LogicalOp::Or,
            self.store.list().into_iter().map(|rule| rule.ast),
        )
    }

    /// Evaluate the stored rules with the configured match mode
    pub fn evaluate(&self, attributes: &Attributes) -> Result<Evaluation> {
        self.evaluate_with(self.config.match_mode, attributes)
    }

    /// Evaluate the stored rules with an explicit match mode.
    ///
    /// In `All` mode the judgement equals evaluating [`Self::combined_ast`].
    /// Under `ErrorPolicy::Abort` the first rule that fails to evaluate
    /// fails the whole call.
    pub fn evaluate_with(&self, mode: MatchMode, attributes: &Attributes) -> Result<Evaluation> {
        let rules = self.store.list();
        let mut evaluation = Evaluation::new(mode, rules.len());

        for rule in &rules {
            match check(&rule.ast, attributes) {
                Ok(true) => evaluation.matched.push(rule.id),
                Ok(false) => {}
                Err(error) => match self.config.error_policy {
                    ErrorPolicy::TreatAsFalse if error.is_evaluation_error() => {
                        tracing::warn!(id = rule.id, %error, "rule failed to evaluate, counted as false");
                        evaluation.failed.push(RuleFailure {
                            rule_id: rule.id,
                            error,
                        });
                    }
                    _ => return Err(error),
                },
            }
        }

        let evaluation = evaluation.finish();
        tracing::debug!(
            ?mode,
            eligible = evaluation.eligible,
            matched = evaluation.matched.len(),
            total = evaluation.total,
            "evaluated rules"
        );
        Ok(evaluation)
    }

    /// Evaluate a single stored rule
    pub fn evaluate_rule(&self, id: RuleId, attributes: &Attributes) -> Result<bool> {
        let rule = self.rule(id)?;
        check(&rule.ast, attributes)
    }

    /// Parse (cached) and evaluate expression text without storing it
    pub fn evaluate_expression(&self, text: &str, attributes: &Attributes) -> Result<bool> {
        let ast = self.cache.get_or_parse(text)?;
        check(&ast, attributes)
    }
}

impl Default for RuleEngine<InMemoryRuleStore> {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            store: InMemoryRuleStore::new(),
            cache: ExpressionCache::default(),
        }
    }
}
