//! Pure numeric primitives shared by [`crate::search_index::SearchIndex`] and
//! [`crate::all_pairs`]: sorted-set intersection size, Jaccard and
//! Containment similarity, the overlap thresholds that size a prefix, and the
//! position filter that prunes candidates before an exact similarity is ever
//! computed.
//!
//! The source this crate is ported from looked up these four operations in
//! keyed `map[string]func(...)` tables at runtime. Here they are a tagged
//! [`SimilarityFunction`] enum dispatched statically through match arms; the
//! string name only matters at the public boundary (`SearchIndex::new`,
//! `all_pairs`), where [`SimilarityFunction::parse`] is the single place that
//! can fail with [`SetSimError::UnknownSimilarityFunction`].

use crate::error::SetSimError;

/// One of the two similarity regimes this crate supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityFunction {
    Jaccard,
    Containment,
}

impl SimilarityFunction {
    /// Parse the canonical string form (`"jaccard"` or `"containment"`).
    pub fn parse(name: &str) -> Result<Self, SetSimError> {
        match name {
            "jaccard" => Ok(Self::Jaccard),
            "containment" => Ok(Self::Containment),
            other => Err(SetSimError::UnknownSimilarityFunction(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Jaccard => "jaccard",
            Self::Containment => "containment",
        }
    }

    /// Exact similarity of `a` to `b` on ascending, duplicate-free integer
    /// sequences (duplicates are tolerated; they just inflate the effective
    /// length the same way the source implementation does).
    pub fn sim(self, a: &[u32], b: &[u32]) -> f64 {
        match self {
            Self::Jaccard => jaccard(a, b),
            Self::Containment => containment(a, b),
        }
    }

    /// Minimum overlap a query of size `n` requires against any candidate at
    /// threshold `t`.
    pub fn overlap_query_threshold(self, n: usize, t: f64) -> usize {
        match self {
            Self::Jaccard => jaccard_overlap_threshold(n, t),
            Self::Containment => containment_overlap_threshold(n, t),
        }
    }

    /// Minimum overlap a set of size `n` must contribute to be indexed.
    pub fn overlap_index_threshold(self, n: usize, t: f64) -> usize {
        match self {
            Self::Jaccard => jaccard_overlap_threshold(n, t),
            // Containment's numerator is the query's size, so every indexed
            // set must contribute *all* of its tokens: the index prefix is
            // the whole set, i.e. index-threshold = 1.
            Self::Containment => 1,
        }
    }

    /// Given an overlap threshold, the number of leading (rarest-first)
    /// tokens of a set of size `n` that must be indexed / probed.
    pub fn prefix_size(self, n: usize, t: f64, indexing: bool) -> usize {
        let overlap = if indexing {
            self.overlap_index_threshold(n, t)
        } else {
            self.overlap_query_threshold(n, t)
        };
        // `(n + 1) - overlap`, not `n - overlap + 1`: the latter underflows
        // when `n == 0` and `overlap == 1` (an empty indexed set or query
        // prefix, `overlap` is always >= 1). Both orderings agree for every
        // valid `n`/`overlap` since `overlap <= n + 1` always holds.
        (n + 1) - overlap
    }

    /// Conservative `[min, max]` bound on candidate set sizes that could
    /// possibly reach similarity `t` against a query of size `n`, used by
    /// `SearchIndex`'s length filter to binary-search a posting list sorted
    /// by `owner_size` down to a contiguous admissible slice. The bound is
    /// intentionally loose (rounds outward) — it only restricts which
    /// entries get position-filtered and exact-scored, never which results
    /// are ultimately returned.
    pub fn candidate_size_bounds(self, n: usize, t: f64) -> (usize, Option<usize>) {
        if t <= 0.0 {
            return (0, None);
        }
        let min_size = ((n as f64) * t).floor() as usize;
        match self {
            // sim <= min(n,m)/max(n,m) bounds m within [t*n, n/t].
            Self::Jaccard => {
                let max_size = ((n as f64) / t).ceil() as usize;
                (min_size, Some(max_size))
            }
            // overlap <= m, and overlap must reach t*n, so m >= t*n; no
            // upper bound (an arbitrarily large candidate can still
            // contain all of a smaller query).
            Self::Containment => (min_size, None),
        }
    }

    /// Position-filter pruning predicate: is it still possible, given the
    /// positions `pa`/`pb` at which a shared prefix token was found, for `a`
    /// and `b` to reach similarity `t`?
    pub fn position_filter(self, a: &[u32], b: &[u32], pa: usize, pb: usize, t: f64) -> bool {
        let remaining = min(a.len() - pa, b.len() - pb) as f64;
        match self {
            Self::Jaccard => remaining / (max(a.len(), b.len()) as f64) >= t,
            Self::Containment => remaining / (a.len() as f64) >= t,
        }
    }
}

#[inline]
fn min(a: usize, b: usize) -> usize {
    if a < b {
        a
    } else {
        b
    }
}

#[inline]
fn max(a: usize, b: usize) -> usize {
    if a > b {
        a
    } else {
        b
    }
}

/// Sorted-merge intersection size of two ascending integer sequences. O(|a|+|b|).
pub fn intersection_size(a: &[u32], b: &[u32]) -> usize {
    let (mut i, mut j) = (0, 0);
    let mut overlap = 0;
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                overlap += 1;
                i += 1;
                j += 1;
            }
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
        }
    }
    overlap
}

/// `|a ∩ b| / (|a| + |b| - |a ∩ b|)`. Both empty ⇒ 0, not 1 — this matches
/// the source and keeps the function total without a division by zero.
fn jaccard(a: &[u32], b: &[u32]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let overlap = intersection_size(a, b);
    overlap as f64 / (a.len() + b.len() - overlap) as f64
}

/// Containment of `a` in `b`: `|a ∩ b| / |a|`. `|a| = 0` ⇒ 0.
fn containment(a: &[u32], b: &[u32]) -> f64 {
    if a.is_empty() {
        return 0.0;
    }
    intersection_size(a, b) as f64 / a.len() as f64
}

fn jaccard_overlap_threshold(n: usize, t: f64) -> usize {
    // Truncation toward zero, not rounding — non-integral n*t must round
    // down or the prefix filter would miss valid candidates.
    max(1, (n as f64 * t) as usize)
}

fn containment_overlap_threshold(n: usize, t: f64) -> usize {
    max(1, (n as f64 * t) as usize)
}
