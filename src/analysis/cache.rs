use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{RepoAnalysis, RepoKey};

/// Manages caching of completed analysis results
pub struct ResultCache {
    cache: HashMap<RepoKey, Arc<RepoAnalysis>>,
}

impl ResultCache {
    /// Create a new result cache
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Store a result, replacing any previous entry for the key
    pub fn store(&mut self, key: RepoKey, result: Arc<RepoAnalysis>) {
        self.cache.insert(key, result);
    }

    /// Retrieve a result from the cache
    pub fn get(&self, key: &RepoKey) -> Option<Arc<RepoAnalysis>> {
        self.cache.get(key).cloned()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}
