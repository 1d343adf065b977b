//! # ssjoin
//!
//! Prefix-filtered set-similarity search: given a collection of sets over a
//! token universe, find every indexed set whose Jaccard or Containment
//! similarity to a query set exceeds a threshold ([`SearchIndex`]), or
//! enumerate every above-threshold pair within the collection itself
//! ([`all_pairs`]). Both paths prune candidate pairs with a prefix filter,
//! a position filter, and a length filter before ever computing an exact
//! similarity, which is what keeps them tractable on collections with tens
//! of millions of sets — naive pairwise comparison is O(N²).
//!
//! ## Core Concepts
//!
//! - [`transform::frequency_order_transform`]: turns raw token sets into
//!   ascending integer sequences, ranked so the rarest (most selective)
//!   tokens sort first. Prefix-filter correctness depends on every indexed
//!   set agreeing on this order, so it's the one transform every set must go
//!   through before it can be indexed or queried.
//! - [`similarity::SimilarityFunction`]: the two supported regimes
//!   (`Jaccard`, `Containment`), each with its own overlap thresholds and
//!   position filter.
//! - [`prefix_index::PrefixIndex`]: the inverted `token -> postings` map both
//!   [`SearchIndex`] and [`all_pairs`] build and probe.
//! - [`SearchIndex`]: build once against a static collection, then `query`
//!   any number of times.
//! - [`all_pairs`]: a one-shot streaming self-join; builds its index lazily
//!   while probing it, in one pass over the collection sorted by set size.
//!
//! ## Example
//!
//! ```
//! use ssjoin::{transform::frequency_order_transform, SearchIndex};
//!
//! let raw_sets = vec![
//!     vec!["a", "b", "c"],
//!     vec!["b", "c", "d"],
//!     vec!["x", "y", "z"],
//! ];
//! let (sets, _dict) = frequency_order_transform(&raw_sets);
//!
//! let index = SearchIndex::new(&sets, "jaccard", 0.3).unwrap();
//! let hits = index.query(&sets[0]);
//! assert!(hits.iter().any(|h| h.x == 0)); // self-match
//! ```
//!
//! ## Non-goals
//!
//! No persistence, no incremental index updates (the index is built once
//! from a static collection), no distributed execution, no approximate
//! similarity (LSH/MinHash), no weighted-set variants, no similarity
//! functions beyond Jaccard and Containment.

pub mod all_pairs;
pub mod error;
pub mod io;
pub mod prefix_index;
pub mod search_index;
pub mod similarity;
pub mod transform;

pub use all_pairs::{all_pairs, AllPairsIter, Pair, ThreadedPairs};
pub use error::{Result, SetSimError};
pub use search_index::{new_search_index, SearchIndex, SearchResult};
pub use similarity::SimilarityFunction;
pub use transform::{frequency_order_transform, Dictionary};
