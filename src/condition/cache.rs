//! Expression parsing cache - keyed by expression text with fast hashing

use crate::attribute::Attributes;
use crate::condition::ast::AstNode;
use crate::condition::parser;
use crate::error::Result;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Default number of expressions kept by a cache
pub const DEFAULT_CACHE_CAPACITY: usize = 2048;

/// Cache of parsed trees keyed by their source text.
///
/// Once `capacity` entries are stored, further expressions are parsed on
/// every call instead of being inserted.
#[derive(Debug)]
pub struct ExpressionCache {
    entries: RwLock<AHashMap<String, AstNode>>,
    capacity: usize,
}

impl ExpressionCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(AHashMap::with_capacity(capacity.min(DEFAULT_CACHE_CAPACITY))),
            capacity,
        }
    }

    /// Get or parse an expression, using the cache for repeated text
    #[inline]
    pub fn get_or_parse(&self, text: &str) -> Result<AstNode> {
        // Fast path: check read lock first
        {
            let entries = self.entries.read();
            if let Some(ast) = entries.get(text) {
                tracing::debug!(expression = text, "expression cache hit");
                return Ok(ast.clone());
            }
        }

        // Slow path: parse and cache
        let ast = parser::parse(text)?;

        {
            let mut entries = self.entries.write();
            if entries.len() < self.capacity {
                entries.insert(text.to_string(), ast.clone());
            }
        }

        Ok(ast)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ExpressionCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }
}

/// Process-wide cache used by the free functions below
static SHARED_CACHE: Lazy<ExpressionCache> = Lazy::new(ExpressionCache::default);

/// Get or parse an expression through the shared cache
#[inline]
pub fn get_or_parse(text: &str) -> Result<AstNode> {
    SHARED_CACHE.get_or_parse(text)
}

/// Parse (cached) and evaluate an expression in one call
#[inline]
pub fn check_expression(text: &str, attributes: &Attributes) -> Result<bool> {
    let ast = get_or_parse(text)?;
    crate::condition::evaluator::check(&ast, attributes)
}

/// Clear the shared cache (useful for testing)
pub fn clear_cache() {
    SHARED_CACHE.clear();
}

/// Number of expressions in the shared cache
pub fn cache_size() -> usize {
    SHARED_CACHE.len()
}
