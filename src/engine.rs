// SPDX-License-Identifier: MIT
//! The single-threaded bucketed sorted-set engine
//!
//! This is the "hard part" the specification (§2) describes: the in-memory
//! layout, bucket-balancing invariants, and the locate/insert/remove/
//! rank/slice algorithms. It is deliberately not `Sync`-aware; the
//! concurrency wrapper in [crate::concurrency] is the only thing that
//! shares an `Engine` across callers.

use std::num::NonZeroUsize;

use crate::bucket::{Bucket, Insertion as BucketInsertion, Removal as BucketRemoval};
use crate::config::Configuration;


/// Outcome of [Engine::insert], with the item's global index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Inserted(usize),
    Duplicate(usize),
}

/// Outcome of [Engine::remove]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed(usize),
    Absent,
}

/// The ordered sequence of [Bucket]s backing a [SortedSet](super::SortedSet)
///
/// Maintains invariants S1–S4 of the specification across every operation:
/// buckets are kept in ascending order by content, no two buckets overlap,
/// `size` always equals the sum of bucket lengths, and every bucket stays
/// at or under `max_bucket_size` between operations.
#[derive(Debug)]
pub(crate) struct Engine<T> {
    buckets: Vec<Bucket<T>>,
    max_bucket_size: NonZeroUsize,
    size: usize,
}

impl<T: Ord + Clone> Engine<T> {
    /// Create an empty engine: a single empty bucket, per the lifecycle
    /// rule in §3 ("a set is created empty (one empty bucket)").
    pub(crate) fn new(config: &Configuration) -> Self {
        let mut buckets = Vec::with_capacity(config.initial_capacity.max(1));
        buckets.push(Bucket::with_capacity(config.max_bucket_size.get()));

        Self { buckets, max_bucket_size: config.max_bucket_size, size: 0 }
    }

    /// Build an engine directly from buckets worth of already-sorted,
    /// deduplicated items (§4.2.5, proper-enumerable path)
    ///
    /// # Time complexity
    ///
    /// O(N): one pass chunking `items` into `max_bucket_size`-sized
    /// buckets.
    pub(crate) fn from_sorted_unique(items: Vec<T>, max_bucket_size: NonZeroUsize) -> Self {
        let size = items.len();
        let chunk = max_bucket_size.get();

        let mut buckets: Vec<_> = items
            .chunks(chunk)
            .map(|c| Bucket::from_sorted(c.to_vec()))
            .collect();

        if buckets.is_empty() {
            buckets.push(Bucket::with_capacity(chunk));
        }

        Self { buckets, max_bucket_size, size }
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn max_bucket_size(&self) -> NonZeroUsize {
        self.max_bucket_size
    }

    /// Locate the bucket that owns (or would own) `item` (§4.2.1)
    ///
    /// Equivalent to the "first bucket whose last element is ≥ item" scan
    /// described by the specification, realized as a binary search over
    /// the bucket vector (buckets are sorted by trailing element, so this
    /// is valid), which the Design Notes (§9) explicitly permit in place
    /// of a literal linear scan.
    ///
    /// # Time complexity
    ///
    /// O(log(N/B)) with N the total item count and B the bucket size.
    fn locate(&self, item: &T) -> usize {
        match self.buckets.binary_search_by(|bucket| bucket.item_compare(item)) {
            Ok(idx) => idx,
            Err(idx) => idx.min(self.buckets.len() - 1),
        }
    }

    /// Sum of the lengths of every bucket strictly before `bucket_idx`
    fn prefix_rank(&self, bucket_idx: usize) -> usize {
        self.buckets[..bucket_idx].iter().map(Bucket::len).sum()
    }

    /// Insert `item`, splitting the owning bucket if it overflows (§4.2.2)
    ///
    /// # Time complexity
    ///
    /// O(log(N/B) + log B) for locate and the in-bucket insert, plus an
    /// amortized O(B) for the split this may trigger.
    pub(crate) fn insert(&mut self, item: T) -> Insertion {
        let bucket_idx = self.locate(&item);
        let prefix = self.prefix_rank(bucket_idx);

        match self.buckets[bucket_idx].insert(item) {
            BucketInsertion::Duplicate(local) => Insertion::Duplicate(prefix + local),
            BucketInsertion::Inserted(local) => {
                self.size += 1;

                if self.buckets[bucket_idx].is_overfull(self.max_bucket_size.get()) {
                    let upper_half = self.buckets[bucket_idx].split();
                    self.buckets.insert(bucket_idx + 1, upper_half);
                }

                Insertion::Inserted(prefix + local)
            }
        }
    }

    /// Remove `item` if present (§4.2.3)
    ///
    /// Drops the owning bucket if it becomes empty and is not the sole
    /// remaining bucket; buckets are never merged on underflow (§9).
    ///
    /// # Time complexity
    ///
    /// O(log(N/B) + log B) for locate and the in-bucket removal, plus
    /// O(N/B) in the rare case a bucket is dropped (shifting the bucket
    /// vector), which is cheap since the bucket vector itself is small.
    pub(crate) fn remove(&mut self, item: &T) -> Removal {
        let bucket_idx = self.locate(item);
        let prefix = self.prefix_rank(bucket_idx);

        match self.buckets[bucket_idx].remove(item) {
            BucketRemoval::Absent => Removal::Absent,
            BucketRemoval::Removed(local) => {
                self.size -= 1;

                if self.buckets.len() > 1 && self.buckets[bucket_idx].is_empty() {
                    self.buckets.remove(bucket_idx);
                }

                Removal::Removed(prefix + local)
            }
        }
    }

    /// Find the global index of `item`, if present (§4.2.4)
    pub(crate) fn find_index(&self, item: &T) -> Option<usize> {
        let bucket_idx = self.locate(item);
        let prefix = self.prefix_rank(bucket_idx);

        match self.buckets[bucket_idx].find(item) {
            crate::bucket::Location::Found(local) => Some(prefix + local),
            crate::bucket::Location::NotFound(_) => None,
        }
    }

    /// Read the item at `index`, walking buckets (§4.2.4)
    ///
    /// # Time complexity
    ///
    /// O(N/B): subtracts bucket lengths until the residual index falls
    /// within a bucket.
    pub(crate) fn at(&self, mut index: usize) -> Option<&T> {
        for bucket in &self.buckets {
            if index < bucket.len() {
                return bucket.at(index);
            }
            index -= bucket.len();
        }
        None
    }

    /// Read up to `count` items starting at `start` (§4.2.4)
    ///
    /// Returns fewer than `count` items (possibly none) if the set does
    /// not have that many items from `start` onward; never panics on an
    /// out-of-range `start`.
    ///
    /// # Time complexity
    ///
    /// O(N/B + count).
    pub(crate) fn slice(&self, mut start: usize, mut count: usize) -> Vec<T> {
        let mut result = Vec::with_capacity(count.min(self.size));
        let mut buckets = self.buckets.iter();

        let mut current = loop {
            let Some(bucket) = buckets.next() else { return result };

            if start < bucket.len() {
                break bucket;
            }
            start -= bucket.len();
        };

        loop {
            if count == 0 {
                return result;
            }

            let available = current.len() - start;
            let take = available.min(count);
            result.extend(current.iter().skip(start).take(take).cloned());
            count -= take;
            start = 0;

            current = match buckets.next() {
                Some(bucket) => bucket,
                None => return result,
            };
        }
    }

    /// The full sorted sequence (§4.2, `to_list`)
    pub(crate) fn to_vec(&self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.size);
        result.extend(self.buckets.iter().flat_map(Bucket::iter).cloned());
        result
    }

    /// Every invariant in §8 item 1–4, used by tests and debug assertions
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        use std::cmp::Ordering;

        assert_eq!(self.size, self.buckets.iter().map(Bucket::len).sum::<usize>(), "S3 violated");
        assert!(!self.buckets.is_empty(), "S invariant: at least one bucket must exist");

        for bucket in &self.buckets {
            assert!(
                bucket.len() <= self.max_bucket_size.get(),
                "S4 violated: bucket with {} items exceeds max {}",
                bucket.len(),
                self.max_bucket_size.get(),
            );
        }

        let mut previous_last: Option<&T> = None;
        for bucket in &self.buckets {
            if let (Some(prev), Some(first)) = (previous_last, bucket.first()) {
                assert_eq!(prev.cmp(first), Ordering::Less, "S1 violated across buckets");
            }

            let items: Vec<_> = bucket.iter().collect();
            for pair in items.windows(2) {
                assert_eq!(pair[0].cmp(pair[1]), Ordering::Less, "B2 violated within a bucket");
            }

            if bucket.last().is_some() {
                previous_last = bucket.last();
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn config(initial_capacity: usize, max_bucket_size: usize) -> Configuration {
        Configuration::new(initial_capacity, max_bucket_size).unwrap()
    }

    #[test]
    fn insert_reports_global_index_and_splits_on_overflow() {
        let mut engine: Engine<i64> = Engine::new(&config(1, 3));

        assert_eq!(engine.insert(1), Insertion::Inserted(0));
        assert_eq!(engine.insert(2), Insertion::Inserted(1));
        assert_eq!(engine.insert(3), Insertion::Inserted(2));
        engine.check_invariants();

        assert_eq!(engine.insert(4), Insertion::Inserted(3));
        assert_eq!(engine.size(), 4);
        engine.check_invariants();

        assert_eq!(engine.insert(2), Insertion::Duplicate(1));
        engine.check_invariants();
    }

    #[test]
    fn remove_drops_empty_non_sole_buckets_only() {
        let mut engine: Engine<i64> = Engine::new(&config(1, 2));
        for item in [1, 2, 3, 4] {
            engine.insert(item);
        }
        engine.check_invariants();

        assert_eq!(engine.remove(&1), Removal::Removed(0));
        assert_eq!(engine.remove(&2), Removal::Removed(0));
        engine.check_invariants();
        assert_eq!(engine.to_vec(), vec![3, 4]);

        assert_eq!(engine.remove(&99), Removal::Absent);
    }

    #[test]
    fn from_sorted_unique_chunks_into_fixed_size_buckets() {
        let engine = Engine::from_sorted_unique(vec![1, 2, 3, 4, 5], config(1, 2).max_bucket_size());
        assert_eq!(engine.size(), 5);
        assert_eq!(engine.to_vec(), vec![1, 2, 3, 4, 5]);
        engine.check_invariants();
    }

    #[test]
    fn slice_and_at_agree_with_to_vec() {
        let mut engine: Engine<i64> = Engine::new(&config(1, 4));
        for item in 0..20 {
            engine.insert(item);
        }

        let all = engine.to_vec();
        for (idx, item) in all.iter().enumerate() {
            assert_eq!(engine.at(idx), Some(item));
        }
        assert_eq!(engine.slice(5, 7), all[5..12].to_vec());
        assert_eq!(engine.at(all.len()), None);
    }
}
