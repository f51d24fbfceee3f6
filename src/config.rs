// SPDX-License-Identifier: MIT
//! Set configuration and the lock acquisition policy

use std::num::NonZeroUsize;

use crate::error::Error;


/// Default bucket capacity and initial bucket-vector capacity
///
/// Both default to 500, per the specification this crate implements. At
/// this size the bucket vector stays small (e.g. ~200 entries for 100k
/// items), keeping the locate step (§4.2.1) cheap and cache-friendly.
pub const DEFAULT_BUCKET_SIZE: usize = 500;

/// Lock acquisition policy for a [SortedSet](super::SortedSet)
///
/// The specification (§4.3) admits exactly two policies and requires an
/// implementation to expose the choice rather than hard-code one. This
/// implementation exposes it as a runtime field of [Configuration] rather
/// than as two distinct types, so a single binary can mix both kinds of
/// handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPolicy {
    /// Wait for the lock to become available. No operation reports
    /// contention.
    #[default]
    Blocking,
    /// Fail immediately with [Error::Contended](crate::Error::Contended) if
    /// the lock is already held, leaving retry/backoff to the caller.
    TryAcquire,
}

/// Configuration for a [SortedSet](super::SortedSet)
///
/// Constructed via [Configuration::new] or [Configuration::default] and
/// then refined with the `with_*` builder methods, mirroring the teacher
/// crate's own `set_bucket_size`/`set_bucket_bytesize` builder methods on
/// `Inserter`/`Extender`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Configuration {
    pub(crate) max_bucket_size: NonZeroUsize,
    pub(crate) initial_capacity: usize,
    pub(crate) lock_policy: LockPolicy,
}

impl Configuration {
    /// Create a configuration with explicit capacity and bucket size
    ///
    /// Both `initial_capacity` and `max_bucket_size` must be at least 1;
    /// otherwise [Error::InvalidInput] is returned, per §7.
    pub fn new(initial_capacity: usize, max_bucket_size: usize) -> Result<Self, Error> {
        let max_bucket_size = NonZeroUsize::new(max_bucket_size).ok_or(Error::InvalidInput)?;
        if initial_capacity == 0 {
            return Err(Error::InvalidInput);
        }

        Ok(Self { max_bucket_size, initial_capacity, lock_policy: LockPolicy::default() })
    }

    /// Set the hard per-bucket capacity (Invariant S4)
    pub fn with_max_bucket_size(mut self, max_bucket_size: NonZeroUsize) -> Self {
        self.max_bucket_size = max_bucket_size;
        self
    }

    /// Set the advisory initial bucket-vector capacity
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Set the lock acquisition policy (§4.3)
    pub fn with_lock_policy(mut self, lock_policy: LockPolicy) -> Self {
        self.lock_policy = lock_policy;
        self
    }

    pub fn max_bucket_size(&self) -> NonZeroUsize {
        self.max_bucket_size
    }

    pub fn lock_policy(&self) -> LockPolicy {
        self.lock_policy
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            max_bucket_size: NonZeroUsize::new(DEFAULT_BUCKET_SIZE).expect("nonzero constant"),
            initial_capacity: DEFAULT_BUCKET_SIZE,
            lock_policy: LockPolicy::default(),
        }
    }
}
