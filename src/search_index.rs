//! Query-time façade: binds a [`SimilarityFunction`] + threshold to a
//! [`PrefixIndex`] built over a static collection of transformed sets, and
//! answers [`SearchIndex::query`].

use tracing::debug;

use crate::error::{Result, SetSimError};
use crate::prefix_index::{PostingEntry, PrefixIndex};
use crate::similarity::SimilarityFunction;

/// A single hit returned by [`SearchIndex::query`]: the matched set's index
/// into the indexed collection, and its exact similarity to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchResult {
    pub x: usize,
    pub similarity: f64,
}

/// Prefix-filter + position-filter + length-filter search index over a
/// static collection of transformed sets.
pub struct SearchIndex<'a> {
    sets: &'a [Vec<u32>],
    function: SimilarityFunction,
    threshold: f64,
    index: PrefixIndex,
}

impl<'a> SearchIndex<'a> {
    /// Build a search index over `sets` for `function_name` at `threshold`.
    ///
    /// Rejects an empty collection, an out-of-range threshold, or an
    /// unrecognized function name at construction time — there are no
    /// deferred validation errors once the index exists.
    pub fn new(sets: &'a [Vec<u32>], function_name: &str, threshold: f64) -> Result<Self> {
        if sets.is_empty() {
            return Err(SetSimError::EmptyInput);
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SetSimError::ThresholdOutOfRange(threshold));
        }
        let function = SimilarityFunction::parse(function_name)?;

        let mut index = PrefixIndex::new();
        for (i, set) in sets.iter().enumerate() {
            let prefix_size = function.prefix_size(set.len(), threshold, /* indexing = */ true);
            for (j, &token) in set.iter().take(prefix_size).enumerate() {
                index.insert(
                    token,
                    PostingEntry {
                        set_id: i,
                        position: j,
                        owner_size: set.len(),
                    },
                );
            }
        }
        index.sort_by_owner_size();

        debug!(
            sets = sets.len(),
            function = function.name(),
            threshold,
            "built SearchIndex"
        );

        Ok(Self {
            sets,
            function,
            threshold,
            index,
        })
    }

    /// Probe the index for every indexed set whose similarity to `s` is at
    /// least the index's threshold. No duplicates; order is "first
    /// candidate discovered, after dedup", which is ascending candidate id
    /// order (candidates are sorted before exact-scoring).
    pub fn query(&self, s: &[u32]) -> Vec<SearchResult> {
        if s.is_empty() {
            return Vec::new();
        }
        let prefix_size = self.function.prefix_size(s.len(), self.threshold, false);
        let prefix = &s[..prefix_size.min(s.len())];

        let mut candidates: Vec<usize> = Vec::new();
        for (p1, &token) in prefix.iter().enumerate() {
            for entry in self.admissible_postings(token, s.len()) {
                if self
                    .function
                    .position_filter(s, &self.sets[entry.set_id], p1, entry.position, self.threshold)
                {
                    candidates.push(entry.set_id);
                }
            }
        }

        candidates.sort_unstable();
        let mut results = Vec::with_capacity(candidates.len());
        let mut prev: Option<usize> = None;
        for x in candidates {
            if prev == Some(x) {
                continue;
            }
            prev = Some(x);
            let sim = self.function.sim(s, &self.sets[x]);
            if sim >= self.threshold {
                results.push(SearchResult { x, similarity: sim });
            }
        }
        results
    }

    /// Restrict `token`'s posting list (sorted ascending by `owner_size`) to
    /// the length-filter-admissible slice via two binary searches, instead
    /// of a linear scan over the whole list.
    fn admissible_postings(&self, token: u32, query_len: usize) -> &[PostingEntry] {
        let list = self.index.postings(token);
        let (min_size, max_size) = self.function.candidate_size_bounds(query_len, self.threshold);
        let start = list.partition_point(|e| e.owner_size < min_size);
        let end = match max_size {
            Some(max) => list.partition_point(|e| e.owner_size <= max),
            None => list.len(),
        };
        &list[start..end]
    }
}

/// Convenience constructor mirroring the language-independent public API
/// named in spec.md §6: `NewSearchIndex(sets, function_name, threshold)`.
pub fn new_search_index<'a>(
    sets: &'a [Vec<u32>],
    function_name: &str,
    threshold: f64,
) -> Result<SearchIndex<'a>> {
    SearchIndex::new(sets, function_name, threshold)
}
