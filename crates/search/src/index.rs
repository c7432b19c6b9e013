//! SearchIndex: the ranked feature-search entry point
//!
//! Composes the candidate source, ranking, collapsing, and a bounded
//! least-recently-used result cache keyed by `(dataset, raw query)`. A cache
//! hit returns the finished rows without rebuilding the candidate space or
//! re-running the ranking passes; candidate-space construction cost is
//! amortized by this cache, not by a separate space cache.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use cellarium_core::{DatasetHandle, Error, Result, SearchLimits};

use crate::candidate::{CandidateSource, Species};
use crate::collapse::{collapse_native, collapse_orthology, RankedResult};
use crate::orthology::OrthologySet;
use crate::ranking::rank_candidates;

type CacheKey = (DatasetHandle, String);

/// Ranked feature search over dynamically built symbol spaces
///
/// # Thread Safety
///
/// Safe under concurrent invocation. The cache lock is held only around
/// lookups and inserts; two callers racing on the same uncached key may both
/// build the candidate space, which is an accepted benign race.
pub struct SearchIndex {
    source: Arc<dyn CandidateSource>,
    orthology: Arc<OrthologySet>,
    cache: Mutex<LruCache<CacheKey, Arc<Vec<RankedResult>>>>,
}

impl SearchIndex {
    /// Create an index over a candidate source and loaded alias tables
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the configured cache capacity is zero.
    pub fn new(
        source: Arc<dyn CandidateSource>,
        orthology: Arc<OrthologySet>,
        limits: &SearchLimits,
    ) -> Result<Self> {
        let capacity = NonZeroUsize::new(limits.cache_capacity).ok_or_else(|| {
            Error::InvalidConfig("search cache capacity must be non-zero".to_string())
        })?;
        Ok(SearchIndex {
            source,
            orthology,
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    /// Resolve a raw query against a dataset
    ///
    /// The query may carry a namespace marker; it is stripped before
    /// matching. Empty and entirely non-matching queries yield an empty
    /// result, never an error.
    pub fn search(&self, dataset: &DatasetHandle, query: &str) -> Result<Arc<Vec<RankedResult>>> {
        let key = (dataset.clone(), query.to_string());
        if let Some(hit) = self.cache.lock().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let rows = Arc::new(self.search_uncached(dataset, query)?);
        self.cache.lock().put(key, Arc::clone(&rows));
        Ok(rows)
    }

    fn search_uncached(&self, dataset: &DatasetHandle, query: &str) -> Result<Vec<RankedResult>> {
        let (species, term) = Species::split_marker(query);
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let space = self.source.build(dataset, species)?;
        let ranked = rank_candidates(&space, term);
        debug!(
            dataset = %dataset,
            query = term,
            matches = ranked.len(),
            "feature query matched"
        );

        let rows = match self.orthology.table_for(species) {
            None => collapse_native(&ranked),
            Some(table) => {
                let source_label = match species {
                    Species::Human => "Human",
                    _ => "Mouse",
                };
                collapse_orthology(&ranked, table, source_label)
            }
        };
        Ok(rows)
    }

    /// Number of memoized queries currently held
    pub fn cached_queries(&self) -> usize {
        self.cache.lock().len()
    }
}
