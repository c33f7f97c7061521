//! Append-only cache of parsed models
//!
//! Models are immutable once loaded, so entries are never invalidated by
//! age or file modification. The only way to drop an entry is an explicit
//! [`ModelCache::clear`].
//!
//! Copyright (c) 2025 Formcast Team
//! Licensed under the Apache-2.0 license

use crate::definition::LeafSchema;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

/// Cached model with its origin
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub schema: Arc<LeafSchema>,
    pub cached_at: SystemTime,
    /// File the model was read from
    pub file_path: PathBuf,
}

impl CacheEntry {
    pub fn new(schema: Arc<LeafSchema>, file_path: PathBuf) -> Self {
        Self {
            schema,
            cached_at: SystemTime::now(),
            file_path,
        }
    }

    pub fn age(&self) -> Option<Duration> {
        self.cached_at.elapsed().ok()
    }
}

/// Configuration for cache behavior
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// When false every lookup reads the model file again
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Name-keyed model cache
#[derive(Debug, Default)]
pub struct ModelCache {
    entries: HashMap<String, CacheEntry>,
    config: CacheConfig,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up a model, counting the hit or miss
    pub fn get(&self, name: &str) -> Option<Arc<LeafSchema>> {
        if !self.config.enabled {
            return None;
        }

        match self.entries.get(name) {
            Some(entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(Arc::clone(&entry.schema))
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert unless the name is already cached.
    ///
    /// Returns the schema that is cached afterwards, which is the earlier
    /// entry when two loaders raced on the same name.
    pub fn insert(&mut self, name: &str, schema: Arc<LeafSchema>, file_path: PathBuf) -> Arc<LeafSchema> {
        if !self.config.enabled {
            return schema;
        }

        let entry = self
            .entries
            .entry(name.to_string())
            .or_insert_with(|| CacheEntry::new(schema, file_path));
        Arc::clone(&entry.schema)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entry(&self, name: &str) -> Option<&CacheEntry> {
        self.entries.get(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            enabled: self.config.enabled,
        }
    }
}

/// Cache statistics for monitoring and debugging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub enabled: bool,
}

impl CacheStats {
    /// Share of lookups answered from the cache, as a percentage
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            (self.hits as f64 / lookups as f64) * 100.0
        }
    }
}
