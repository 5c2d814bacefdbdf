//! Query Cache
//!
//! Remembers listing pages and the statistics snapshot between reads and
//! forgets them when a mutation (upload, delete) makes them stale.
//!
//! Each scope carries a version counter that increases on every
//! invalidation. Reactive front-ends key their fetches on the version so that
//! bumping it is what triggers the refetch.

use std::collections::HashMap;

use crate::filters::SearchFilters;
use crate::model::{FileRecord, Paginated, StorageStats};

/// Cached query families
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheScope {
    Files,
    Stats,
}

/// Key of one listing page
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileQuery {
    pub filters: SearchFilters,
    pub page: u32,
}

impl FileQuery {
    pub fn new(filters: SearchFilters, page: u32) -> Self {
        Self {
            filters,
            page: page.max(1),
        }
    }
}

/// In-memory cache of listing pages and statistics
#[derive(Debug, Default)]
pub struct QueryCache {
    files: HashMap<FileQuery, Paginated<FileRecord>>,
    stats: Option<StorageStats>,
    files_version: u64,
    stats_version: u64,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self, query: &FileQuery) -> Option<&Paginated<FileRecord>> {
        self.files.get(query)
    }

    pub fn store_files(&mut self, query: FileQuery, page: Paginated<FileRecord>) {
        self.files.insert(query, page);
    }

    pub fn stats(&self) -> Option<&StorageStats> {
        self.stats.as_ref()
    }

    pub fn store_stats(&mut self, stats: StorageStats) {
        self.stats = Some(stats);
    }

    /// Forget everything in `scope` and bump its version
    pub fn invalidate(&mut self, scope: CacheScope) {
        match scope {
            CacheScope::Files => {
                self.files.clear();
                self.files_version += 1;
            }
            CacheScope::Stats => {
                self.stats = None;
                self.stats_version += 1;
            }
        }
        tracing::debug!(?scope, "cache invalidated");
    }

    /// Uploads and deletes change both the listing and the statistics.
    pub fn invalidate_after_mutation(&mut self) {
        self.invalidate(CacheScope::Files);
        self.invalidate(CacheScope::Stats);
    }

    pub fn version(&self, scope: CacheScope) -> u64 {
        match scope {
            CacheScope::Files => self.files_version,
            CacheScope::Stats => self.stats_version,
        }
    }

    /// Whether a response fetched under `version` still describes `scope`.
    /// Answers that arrive after a later invalidation must be dropped.
    pub fn is_current(&self, scope: CacheScope, version: u64) -> bool {
        self.version(scope) == version
    }

    pub fn cached_pages(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_and_hit() {
        let mut cache = QueryCache::new();
        let query = FileQuery::new(SearchFilters::default(), 0);
        assert_eq!(query.page, 1);
        assert!(cache.files(&query).is_none());

        cache.store_files(query.clone(), Paginated::empty());
        assert!(cache.files(&query).is_some());

        let other = FileQuery::new(SearchFilters::default(), 2);
        assert!(cache.files(&other).is_none());
    }

    #[test]
    fn test_mutation_invalidates_both_scopes() {
        let mut cache = QueryCache::new();
        cache.store_files(FileQuery::new(SearchFilters::default(), 1), Paginated::empty());
        cache.store_stats(StorageStats::default());

        cache.invalidate_after_mutation();

        assert_eq!(cache.cached_pages(), 0);
        assert!(cache.stats().is_none());
        assert_eq!(cache.version(CacheScope::Files), 1);
        assert_eq!(cache.version(CacheScope::Stats), 1);
    }

    #[test]
    fn test_scoped_invalidation() {
        let mut cache = QueryCache::new();
        cache.store_stats(StorageStats::default());
        cache.invalidate(CacheScope::Files);
        assert!(cache.stats().is_some());
        assert_eq!(cache.version(CacheScope::Stats), 0);
    }

    #[test]
    fn test_response_from_before_mutation_is_stale() {
        let mut cache = QueryCache::new();
        let polled_at = cache.version(CacheScope::Stats);

        // Upload lands while the poll is in flight
        cache.invalidate_after_mutation();
        let refetched_at = cache.version(CacheScope::Stats);

        assert!(!cache.is_current(CacheScope::Stats, polled_at));
        assert!(cache.is_current(CacheScope::Stats, refetched_at));
        assert!(!cache.is_current(CacheScope::Files, polled_at));
    }
}
