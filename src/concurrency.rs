// SPDX-License-Identifier: MIT
//! The lockable handle wrapping a single shared [Engine]
//!
//! Everything in this module is the "concurrency wrapper" of §4.3: it owns
//! one [Engine] behind a [Mutex] and exposes every engine operation as an
//! atomic action, choosing between blocking and try-acquire semantics per
//! [LockPolicy].

use std::fmt;
use std::sync::{Mutex, TryLockError};

use crate::config::{Configuration, LockPolicy};
use crate::engine::{Engine, Insertion, Removal};
use crate::error::Error;
use crate::validate::Validate;


/// Outcome of [SortedSet::add] and [SortedSet::index_add]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Added {
    /// The item was not previously present and has been inserted
    Inserted,
    /// The item was already present; the set is unchanged
    Duplicate,
}

/// Outcome of [SortedSet::remove]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    /// The item was present and has been erased
    Removed,
    /// The item was not present; the set is unchanged
    Absent,
}

/// A bucketed, sorted, deduplicated set shared safely across callers
///
/// `SortedSet` is the public handle described throughout the
/// specification: a single [Engine] behind a [Mutex], serializing every
/// operation per the chosen [LockPolicy]. Every method here acquires the
/// lock, runs straight-line code against the engine, and releases it —
/// there is no suspension other than the lock acquisition itself (§5).
pub struct SortedSet<T> {
    inner: Mutex<Engine<T>>,
    lock_policy: LockPolicy,
}

impl<T: Ord + Clone + Validate> SortedSet<T> {
    /// Create an empty set under the given configuration
    pub fn new(config: Configuration) -> Self {
        Self { inner: Mutex::new(Engine::new(&config)), lock_policy: config.lock_policy() }
    }

    /// Build a set from an input that is already strictly increasing and
    /// duplicate-free (§4.2.5)
    ///
    /// Returns [Error::InvalidInput] if the precondition is violated, or
    /// [Error::UnsupportedType] if any item is rejected by [Validate].
    /// Validation is O(N); construction itself is then O(N).
    pub fn from_proper_enumerable(items: Vec<T>, config: Configuration) -> Result<Self, Error> {
        items.iter().try_for_each(Validate::validate)?;
        if !is_strictly_increasing(&items) {
            return Err(Error::InvalidInput);
        }

        Ok(Self {
            inner: Mutex::new(Engine::from_sorted_unique(items, config.max_bucket_size())),
            lock_policy: config.lock_policy(),
        })
    }

    /// Build a set from an arbitrary input, sorting and deduplicating it
    /// first (§4.2.5)
    ///
    /// # Time complexity
    ///
    /// O(N log N) for the sort, then O(N) to bucket the result.
    pub fn from_enumerable(mut items: Vec<T>, config: Configuration) -> Result<Self, Error> {
        items.iter().try_for_each(Validate::validate)?;
        items.sort();
        items.dedup();

        Ok(Self {
            inner: Mutex::new(Engine::from_sorted_unique(items, config.max_bucket_size())),
            lock_policy: config.lock_policy(),
        })
    }

    /// Add `item`, reporting whether it was newly inserted
    pub fn add(&self, item: T) -> Result<Added, Error> {
        item.validate()?;

        self.with_lock(|engine| match engine.insert(item) {
            Insertion::Inserted(_) => Added::Inserted,
            Insertion::Duplicate(_) => Added::Duplicate,
        })
    }

    /// Add `item`, reporting its global index alongside whether it was
    /// newly inserted or already present
    pub fn index_add(&self, item: T) -> Result<(usize, Added), Error> {
        item.validate()?;

        self.with_lock(|engine| match engine.insert(item) {
            Insertion::Inserted(idx) => (idx, Added::Inserted),
            Insertion::Duplicate(idx) => (idx, Added::Duplicate),
        })
    }

    /// Remove `item`, reporting whether it was present
    pub fn remove(&self, item: &T) -> Result<Removed, Error> {
        self.with_lock(|engine| match engine.remove(item) {
            Removal::Removed(_) => Removed::Removed,
            Removal::Absent => Removed::Absent,
        })
    }

    /// Remove `item`, reporting its former global index
    ///
    /// Unlike [SortedSet::remove], a missing item is reported as
    /// [Error::NotPresent] rather than as a non-error outcome — this
    /// asymmetry matches the specification's operation surface (§6) and is
    /// recorded in `DESIGN.md`.
    pub fn index_remove(&self, item: &T) -> Result<usize, Error> {
        match self.with_lock(|engine| engine.remove(item))? {
            Removal::Removed(idx) => Ok(idx),
            Removal::Absent => Err(Error::NotPresent),
        }
    }

    /// The number of items currently in the set
    pub fn size(&self) -> Result<usize, Error> {
        self.with_lock(|engine| engine.size())
    }

    /// Read the item at `index`, or [Error::OutOfBounds] if there is none
    pub fn at(&self, index: usize) -> Result<T, Error> {
        self.with_lock(|engine| engine.at(index).cloned())?.ok_or(Error::OutOfBounds)
    }

    /// Read the item at `index`, falling back to `default` if out of range
    pub fn at_or(&self, index: usize, default: T) -> Result<T, Error> {
        Ok(self.with_lock(|engine| engine.at(index).cloned())?.unwrap_or(default))
    }

    /// Read up to `count` items starting at `start`
    ///
    /// Returns the empty sequence if `start` is at or beyond [size](Self::size);
    /// truncates the result if `start + count` would exceed it.
    pub fn slice(&self, start: usize, count: usize) -> Result<Vec<T>, Error> {
        self.with_lock(|engine| engine.slice(start, count))
    }

    /// Find the global index of `item`
    pub fn find_index(&self, item: &T) -> Result<usize, Error> {
        self.with_lock(|engine| engine.find_index(item))?.ok_or(Error::NotPresent)
    }

    /// The full sorted sequence
    pub fn to_list(&self) -> Result<Vec<T>, Error> {
        self.with_lock(|engine| engine.to_vec())
    }

    /// Run `f` against the engine under the configured [LockPolicy]
    fn with_lock<R>(&self, f: impl FnOnce(&mut Engine<T>) -> R) -> Result<R, Error> {
        match self.lock_policy {
            LockPolicy::Blocking => {
                let mut guard = self.inner.lock().expect("sorted set lock poisoned");
                Ok(f(&mut guard))
            }
            LockPolicy::TryAcquire => match self.inner.try_lock() {
                Ok(mut guard) => Ok(f(&mut guard)),
                Err(TryLockError::WouldBlock) => Err(Error::Contended),
                Err(TryLockError::Poisoned(_)) => panic!("sorted set lock poisoned"),
            },
        }
    }
}

impl<T: Ord + Clone + Validate> Default for SortedSet<T> {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

impl<T: Ord + Clone + Validate> fmt::Debug for SortedSet<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Ok(engine) => write!(fmt, "SortedSet({} items)", engine.size()),
            Err(_) => fmt.write_str("SortedSet(<locked>)"),
        }
    }
}

impl<T: Ord + Clone + Validate> IntoIterator for SortedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Consume the set, yielding its items in ascending order
    fn into_iter(self) -> Self::IntoIter {
        self.inner
            .into_inner()
            .expect("sorted set lock poisoned")
            .to_vec()
            .into_iter()
    }
}

fn is_strictly_increasing<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|pair| pair[0] < pair[1])
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_acquire_reports_contention() {
        let config = Configuration::default().with_lock_policy(LockPolicy::TryAcquire);
        let set: SortedSet<i64> = SortedSet::new(config);

        let _guard = set.inner.lock().unwrap();
        assert_eq!(set.add(1), Err(Error::Contended));
    }

    #[test]
    fn blocking_policy_never_reports_contention_from_the_same_thread_sequence() {
        let set: SortedSet<i64> = SortedSet::default();
        assert_eq!(set.add(1), Ok(Added::Inserted));
        assert_eq!(set.add(1), Ok(Added::Duplicate));
    }

    #[test]
    fn into_iter_yields_sorted_items() {
        let set: SortedSet<i64> = SortedSet::default();
        set.add(3).unwrap();
        set.add(1).unwrap();
        set.add(2).unwrap();

        let items: Vec<_> = set.into_iter().collect();
        assert_eq!(items, vec![1, 2, 3]);
    }
}
