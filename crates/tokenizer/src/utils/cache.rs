//! Chunk cache for repeated pre-tokenized text.
//!
//! Common words come out of pre-tokenization over and over; caching their
//! token IDs skips the merge loop on every repeat. The set of distinct chunks
//! in practice is bounded, so entries are never evicted.

use crate::Result;
use ahash::AHashMap;
use compact_str::CompactString;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// Thread-safe chunk -> token IDs cache.
///
/// Lookups take a shared lock. On a miss the chunk is encoded outside the
/// lock and inserted only if no other thread got there first, so a race costs
/// duplicate work but never changes a cached value.
#[derive(Debug, Default)]
pub struct ChunkCache {
    /// The cache storing chunk -> encoded tokens
    entries: RwLock<AHashMap<CompactString, Arc<[u32]>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ChunkCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new cache with room for `capacity` chunks before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(AHashMap::with_capacity(capacity)),
            ..Self::default()
        }
    }

    /// Get cached encoding or compute using the provided function.
    ///
    /// # Arguments
    /// * `chunk` - The pre-tokenized chunk
    /// * `encoder` - Function to compute the encoding if not cached
    pub fn get_or_encode<F>(&self, chunk: &str, encoder: F) -> Result<Arc<[u32]>>
    where
        F: FnOnce(&str) -> Result<Vec<u32>>,
    {
        if let Some(cached) = self.read().get(chunk) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Arc::clone(cached));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        log::trace!("chunk cache miss for {:?}", chunk);

        // Errors are not cached.
        let encoded: Arc<[u32]> = encoder(chunk)?.into();

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let stored = entries
            .entry(CompactString::new(chunk))
            .or_insert(encoded);

        Ok(Arc::clone(stored))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, AHashMap<CompactString, Arc<[u32]>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clear all entries and reset the hit/miss counters.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Get the number of entries in the cache.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of entries
    pub entries: usize,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to run the encoder
    pub misses: u64,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache, `None` before any lookup.
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.hits + self.misses;
        (total > 0).then(|| self.hits as f64 / total as f64)
    }
}
