//! Streaming self-join: emits every pair of indexed sets whose similarity
//! exceeds a threshold, by building the prefix index lazily while probing
//! it, processing sets in ascending order of size (the All-Pair-Binary
//! algorithm from Bayardo et al., "Scaling Up All Pairs Similarity Search").
//!
//! [`all_pairs`] validates eagerly (empty input, out-of-range threshold,
//! unknown function name) and returns a lazy [`AllPairsIter`] — nothing runs
//! until the caller starts pulling. [`AllPairsIter::spawn_threaded`] moves
//! the same loop onto a background thread connected by a bounded
//! `std::sync::mpsc` channel, mirroring the single-producer-goroutine shape
//! of the implementation this crate is ported from, using only `std`.

use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::JoinHandle;

use tracing::debug;

use crate::error::{Result, SetSimError};
use crate::prefix_index::{PostingEntry, PrefixIndex};
use crate::similarity::SimilarityFunction;

/// A pair of indexed sets with `x > y`, and their exact similarity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair {
    pub x: usize,
    pub y: usize,
    pub similarity: f64,
}

/// Validate inputs and return a lazy iterator over every pair above
/// `threshold`. No work happens until the iterator is pulled.
pub fn all_pairs<'a>(
    sets: &'a [Vec<u32>],
    function_name: &str,
    threshold: f64,
) -> Result<AllPairsIter<'a>> {
    if sets.is_empty() {
        return Err(SetSimError::EmptyInput);
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(SetSimError::ThresholdOutOfRange(threshold));
    }
    let function = SimilarityFunction::parse(function_name)?;

    let mut order: Vec<usize> = (0..sets.len()).collect();
    order.sort_by_key(|&i| sets[i].len());

    debug!(sets = sets.len(), function = function.name(), threshold, "starting AllPairs");

    Ok(AllPairsIter {
        sets,
        function,
        threshold,
        order,
        cursor: 0,
        index: PrefixIndex::new(),
        pending: Vec::new(),
    })
}

/// Single-threaded, pull-based stream of [`Pair`]s. Each call to `next`
/// advances through the remaining candidate queue or, once drained, pulls
/// the next `x1` from the size-ascending order and probes/inserts it.
///
/// Dropping the iterator mid-stream simply stops the loop; there is no
/// background work to cancel in this mode.
pub struct AllPairsIter<'a> {
    sets: &'a [Vec<u32>],
    function: SimilarityFunction,
    threshold: f64,
    order: Vec<usize>,
    cursor: usize,
    index: PrefixIndex,
    pending: Vec<Pair>,
}

impl<'a> AllPairsIter<'a> {
    /// Run the producer loop on a background thread, returning a
    /// [`ThreadedPairs`] receiver end. The bounded channel capacity is the
    /// only suspension point: the producer blocks only when the consumer
    /// hasn't drained, and dropping the receiver unblocks and terminates it
    /// promptly (no work continues after the consumer walks away).
    pub fn spawn_threaded(self, channel_capacity: usize) -> ThreadedPairs
    where
        'a: 'static,
    {
        let (tx, rx) = mpsc::sync_channel(channel_capacity);
        let handle = std::thread::spawn(move || {
            let mut iter = self;
            while let Some(pair) = iter.next() {
                if tx.send(pair).is_err() {
                    // Consumer dropped the receiver; stop producing.
                    return;
                }
            }
        });
        ThreadedPairs {
            rx: Some(rx),
            handle: Some(handle),
        }
    }

    fn process_next_x1(&mut self) {
        let x1 = self.order[self.cursor];
        self.cursor += 1;
        let s1 = &self.sets[x1];

        let query_prefix = self.function.prefix_size(s1.len(), self.threshold, false);
        let mut candidates: Vec<usize> = Vec::new();
        for (p1, &token) in s1.iter().take(query_prefix).enumerate() {
            for entry in self.index.postings(token) {
                if self.function.position_filter(
                    s1,
                    &self.sets[entry.set_id],
                    p1,
                    entry.position,
                    self.threshold,
                ) {
                    candidates.push(entry.set_id);
                }
            }
        }

        candidates.sort_unstable();
        let mut prev: Option<usize> = None;
        for x2 in candidates {
            if prev == Some(x2) {
                continue;
            }
            prev = Some(x2);
            let sim = self.function.sim(s1, &self.sets[x2]);
            if sim < self.threshold {
                continue;
            }
            let (x, y) = if x1 > x2 { (x1, x2) } else { (x2, x1) };
            self.pending.push(Pair { x, y, similarity: sim });
        }

        let index_prefix = self.function.prefix_size(s1.len(), self.threshold, true);
        for (j, &token) in s1.iter().take(index_prefix).enumerate() {
            self.index.insert(
                token,
                PostingEntry {
                    set_id: x1,
                    position: j,
                    owner_size: s1.len(),
                },
            );
        }
    }
}

impl<'a> Iterator for AllPairsIter<'a> {
    type Item = Pair;

    fn next(&mut self) -> Option<Pair> {
        loop {
            if let Some(pair) = self.pending.pop() {
                // `pending` is filled in discovery order (ascending
                // candidate id within one x1's probe); pop from the front
                // to preserve emission order (spec.md §4.5).
                return Some(pair);
            }
            if self.cursor >= self.order.len() {
                return None;
            }
            self.process_next_x1();
            // `pending` was just filled in ascending order; reverse once so
            // `pop` (which takes from the back) yields ascending order.
            self.pending.reverse();
        }
    }
}

/// Producer running on a background thread, yielding [`Pair`]s through a
/// bounded channel. Dropping this value drops the receiver first, which
/// causes the producer's next `send` to fail and the thread to exit, and
/// only then joins the thread — so no producer work outlives this value and
/// `drop` never blocks on a thread waiting for a receiver we're still
/// holding.
pub struct ThreadedPairs {
    rx: Option<Receiver<Pair>>,
    handle: Option<JoinHandle<()>>,
}

impl Iterator for ThreadedPairs {
    type Item = Pair;

    fn next(&mut self) -> Option<Pair> {
        self.rx.as_ref()?.recv().ok()
    }
}

impl Drop for ThreadedPairs {
    fn drop(&mut self) {
        self.rx.take(); // unblocks a producer stuck on a full channel
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
