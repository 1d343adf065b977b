//! Inverted-list index from token to posting list, the data structure both
//! [`crate::search_index::SearchIndex`] and [`crate::all_pairs`] probe and
//! populate. Pure data structure: it has no notion of similarity functions
//! or thresholds, only `insert` and `postings`.

use std::collections::HashMap;

/// One occurrence of a token in an indexed set's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostingEntry {
    /// Index into the owning collection (the set-id).
    pub set_id: usize,
    /// 0-based offset of the token within the owner set's prefix.
    pub position: usize,
    /// Size of the owner set (used by `SearchIndex` for the length filter).
    pub owner_size: usize,
}

/// Sparse `token -> posting list` map. Only tokens that appear in at least
/// one indexed prefix are keyed.
#[derive(Debug, Clone, Default)]
pub struct PrefixIndex {
    postings: HashMap<u32, Vec<PostingEntry>>,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self {
            postings: HashMap::new(),
        }
    }

    /// Append an entry to `token`'s posting list, in insertion order.
    pub fn insert(&mut self, token: u32, entry: PostingEntry) {
        self.postings.entry(token).or_default().push(entry);
    }

    /// Read-only view of `token`'s posting list, or an empty slice if the
    /// token was never indexed.
    pub fn postings(&self, token: u32) -> &[PostingEntry] {
        self.postings.get(&token).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sort every posting list ascending by `owner_size`, enabling the
    /// length filter to binary-search a contiguous size-admissible slice.
    /// `SearchIndex` calls this once after the build pass; `AllPairs` never
    /// calls it because insertion order is already length-ascending there.
    pub fn sort_by_owner_size(&mut self) {
        for list in self.postings.values_mut() {
            list.sort_by_key(|e| e.owner_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postings_preserve_insertion_order() {
        let mut idx = PrefixIndex::new();
        idx.insert(7, PostingEntry { set_id: 0, position: 0, owner_size: 3 });
        idx.insert(7, PostingEntry { set_id: 1, position: 0, owner_size: 5 });
        let list = idx.postings(7);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].set_id, 0);
        assert_eq!(list[1].set_id, 1);
    }

    #[test]
    fn unknown_token_yields_empty_slice() {
        let idx = PrefixIndex::new();
        assert!(idx.postings(42).is_empty());
    }

    #[test]
    fn sort_by_owner_size_orders_within_bucket() {
        let mut idx = PrefixIndex::new();
        idx.insert(1, PostingEntry { set_id: 0, position: 0, owner_size: 9 });
        idx.insert(1, PostingEntry { set_id: 1, position: 0, owner_size: 2 });
        idx.insert(1, PostingEntry { set_id: 2, position: 0, owner_size: 5 });
        idx.sort_by_owner_size();
        let sizes: Vec<usize> = idx.postings(1).iter().map(|e| e.owner_size).collect();
        assert_eq!(sizes, vec![2, 5, 9]);
    }
}
