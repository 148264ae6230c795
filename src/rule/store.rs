//! Rule storage

use crate::condition::AstNode;
use crate::error::{Result, RuleEngineError};
use crate::rule::{Rule, RuleId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Storage seam for rules. Implementations assign identifiers and must list
/// rules in insertion order, since that order fixes the combined tree shape.
pub trait RuleStore: Send + Sync {
    /// Persist a parsed rule and return it with its new identifier
    fn insert(&self, rule_string: String, ast: AstNode) -> Result<Rule>;

    fn get(&self, id: RuleId) -> Option<Rule>;

    /// All rules in insertion order
    fn list(&self) -> Vec<Rule>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(default)]
    next_id: RuleId,
    rules: Vec<Rule>,
}

/// Process-local rule store
#[derive(Debug, Default)]
pub struct InMemoryRuleStore {
    inner: RwLock<Snapshot>,
}

impl InMemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialise all rules as JSON
    pub fn snapshot_json(&self) -> Result<String> {
        let inner = self.inner.read();
        Ok(serde_json::to_string(&*inner)?)
    }

    /// Restore a store written by [`InMemoryRuleStore::snapshot_json`].
    ///
    /// The id counter is moved past the largest stored id.
    pub fn from_snapshot_json(json: &str) -> Result<Self> {
        let mut snapshot: Snapshot = serde_json::from_str(json)?;
        let max_id = snapshot.rules.iter().map(|r| r.id).max().unwrap_or(0);
        snapshot.next_id = snapshot.next_id.max(max_id);
        tracing::debug!(rules = snapshot.rules.len(), "restored rule store");
        Ok(Self {
            inner: RwLock::new(snapshot),
        })
    }
}

impl RuleStore for InMemoryRuleStore {
    fn insert(&self, rule_string: String, ast: AstNode) -> Result<Rule> {
        let mut inner = self.inner.write();
        let last_id = inner.next_id;
        inner.next_id = last_id
            .checked_add(1)
            .ok_or(RuleEngineError::RuleIdsExhausted(last_id))?;
        let rule = Rule {
            id: inner.next_id,
            rule_string,
            ast,
        };
        inner.rules.push(rule.clone());
        Ok(rule)
    }

    fn get(&self, id: RuleId) -> Option<Rule> {
        self.inner.read().rules.iter().find(|r| r.id == id).cloned()
    }

    fn list(&self) -> Vec<Rule> {
        self.inner.read().rules.clone()
    }

    fn len(&self) -> usize {
        self.inner.read().rules.len()
    }
}
