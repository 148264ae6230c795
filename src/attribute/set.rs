//! Attribute set supplied per evaluation call

use crate::attribute::AttributeValue;
use crate::error::Result;
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Flat mapping from attribute name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    values: HashMap<String, AttributeValue, RandomState>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object such as `{"age": 35, "department": "HR"}`.
    ///
    /// Values other than numbers and strings are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build from an already decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Insert or replace an attribute, builder style
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) {
        self.values.insert(key.into(), value.into());
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.values.get(key)
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_lookup() {
        let attrs = Attributes::new().with("age", 35).with("department", "HR");

        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("age"), Some(&AttributeValue::Number(35.0)));
        assert_eq!(
            attrs.get("department"),
            Some(&AttributeValue::Text("HR".to_string()))
        );
        assert!(!attrs.contains("salary"));
    }

    #[test]
    fn test_from_json() {
        let attrs = Attributes::from_json(r#"{"age": 40, "department": "IT"}"#).unwrap();
        assert_eq!(attrs.get("age").and_then(|v| v.as_number()), Some(40.0));
        assert_eq!(attrs.get("department").and_then(|v| v.as_text()), Some("IT"));
    }

    #[test]
    fn test_from_json_rejects_unsupported_types() {
        assert!(Attributes::from_value(json!({ "active": true })).is_err());
        assert!(Attributes::from_value(json!({ "tags": ["a"] })).is_err());
        assert!(Attributes::from_value(json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_from_iterator() {
        let attrs: Attributes = vec![("salary", 50000), ("experience", 3)]
            .into_iter()
            .collect();
        assert_eq!(attrs.get("experience"), Some(&AttributeValue::Number(3.0)));

        let mut keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["experience", "salary"]);
        assert!(!attrs.is_empty());
        assert!(Attributes::new().is_empty());
    }
}
