//! Builds a global frequency-ordered integer dictionary from raw token sets
//! and emits each set as an ascending integer sequence.
//!
//! This is what makes the prefix filter in [`crate::search_index`] and
//! [`crate::all_pairs`] prune aggressively: rarer tokens get smaller integers,
//! so the ascending prefix of a transformed set is exactly its rarest,
//! most-selective tokens.

use std::collections::HashMap;
use std::hash::Hash;

/// Mapping from raw token to integer token (its rank in ascending global
/// frequency). Immutable once built.
#[derive(Debug, Clone)]
pub struct Dictionary<T: Eq + Hash + Ord + Clone> {
    order: HashMap<T, u32>,
}

impl<T: Eq + Hash + Ord + Clone> Dictionary<T> {
    /// Map a raw set through the dictionary, dropping unknown tokens and
    /// sorting the result ascending. Unlike [`frequency_order_transform`],
    /// this does not deduplicate either — a caller passing a set with
    /// repeated known tokens gets repeats back, consistent with the
    /// dictionary's own construction.
    pub fn transform(&self, raw_set: &[T]) -> Vec<u32> {
        let mut out: Vec<u32> = raw_set
            .iter()
            .filter_map(|tok| self.order.get(tok).copied())
            .collect();
        out.sort_unstable();
        out
    }

    /// Rank assigned to `token`, if it appeared in the source collection.
    pub fn rank(&self, token: &T) -> Option<u32> {
        self.order.get(token).copied()
    }

    /// Number of distinct tokens in the dictionary.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Run the frequency-order transform described in §4.2: count token
/// occurrences across `raw_sets`, rank distinct tokens ascending by
/// frequency (ties broken by ascending raw-token order, for reproducible
/// output), then re-emit each raw set as an ascending, duplicate-preserving
/// sequence of integer tokens.
///
/// Duplicates within a single raw set are intentionally **not** removed —
/// this mirrors the upstream behavior this crate is ported from. Callers
/// that need strict set semantics must pre-deduplicate their raw sets.
pub fn frequency_order_transform<T: Eq + Hash + Ord + Clone>(
    raw_sets: &[Vec<T>],
) -> (Vec<Vec<u32>>, Dictionary<T>) {
    let mut counts: HashMap<T, usize> = HashMap::new();
    for raw_set in raw_sets {
        for tok in raw_set {
            *counts.entry(tok.clone()).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<(T, usize)> = counts.into_iter().collect();
    entries.sort_by(|(tok_a, freq_a), (tok_b, freq_b)| freq_a.cmp(freq_b).then_with(|| tok_a.cmp(tok_b)));

    let mut order = HashMap::with_capacity(entries.len());
    for (rank, (tok, _freq)) in entries.into_iter().enumerate() {
        order.insert(tok, rank as u32);
    }
    let dict = Dictionary { order };

    let sets = raw_sets
        .iter()
        .map(|raw_set| {
            let mut mapped: Vec<u32> = raw_set.iter().map(|tok| dict.order[tok]).collect();
            mapped.sort_unstable();
            mapped
        })
        .collect();

    (sets, dict)
}
