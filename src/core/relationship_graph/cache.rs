//! Graph Cache
//!
//! The engine is a pure function, so callers that re-render often can memoize
//! it. [`GraphCache`] keys computed graphs by a SHA-256 of the serialized
//! character list and keeps the most recently used ones.
//!
//! # Usage
//!
//! ```rust,ignore
//! use oc_relgraph::{CacheConfig, GraphCache, RelationshipGraphEngine};
//!
//! let cache = GraphCache::new(RelationshipGraphEngine::default(), CacheConfig::default());
//!
//! let graph = cache.get_or_compute(&characters);
//! // Same input -> same Arc, no recomputation
//! let again = cache.get_or_compute(&characters);
//! ```

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::engine::RelationshipGraphEngine;
use super::types::{Character, RelationshipGraph};

/// Default number of cached graphs.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of graphs kept; least recently used are evicted.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

struct CacheState {
    entries: LruCache<String, Arc<RelationshipGraph>>,
    hits: u64,
    misses: u64,
}

/// Content-addressed memo cache around a [`RelationshipGraphEngine`].
pub struct GraphCache {
    engine: RelationshipGraphEngine,
    state: Mutex<CacheState>,
}

/// Hex SHA-256 over the serialized characters, in input order.
pub fn content_key(characters: &[Character]) -> String {
    let mut hasher = Sha256::new();
    for character in characters {
        match serde_json::to_vec(character) {
            Ok(bytes) => hasher.update(&bytes),
            Err(e) => {
                log::warn!("Hashing character {} by id only: {}", character.id, e);
                hasher.update(character.id.as_bytes());
            }
        }
        hasher.update(b"|"); // Separator between records
    }
    hex::encode(hasher.finalize())
}

impl GraphCache {
    pub fn new(engine: RelationshipGraphEngine, config: CacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            engine,
            state: Mutex::new(CacheState {
                entries: LruCache::new(capacity),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn engine(&self) -> &RelationshipGraphEngine {
        &self.engine
    }

    /// Return the cached graph for `characters`, computing it on a miss.
    ///
    /// The computation runs outside the lock; concurrent misses on the same
    /// input may compute twice and the last result is kept.
    pub fn get_or_compute(&self, characters: &[Character]) -> Arc<RelationshipGraph> {
        let key = content_key(characters);

        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(graph) = state.entries.get(&key).cloned() {
                state.hits += 1;
                return graph;
            }
            state.misses += 1;
        }

        log::debug!("Graph cache miss for {}", &key[..12]);
        let graph = Arc::new(self.engine.compute(characters));

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.entries.put(key, Arc::clone(&graph));
        graph
    }

    /// Drop every cached graph. Counters are kept.
    pub fn invalidate_all(&self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .clear();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
        }
    }
}
