// SPDX-License-Identifier: MIT
//! A bucketed, sorted, deduplicated set with positional (index-based) access
//!
//! This crate implements the data structure described for leaderboards,
//! ranked indexes, and any in-memory collection where both order-by-value
//! and order-by-position are required simultaneously: a large collection
//! stays sorted and deduplicated while supporting random access by rank,
//! slicing, and index reporting on every mutation.
//!
//! The crate is organized leaves-first, mirroring the three layers of the
//! design:
//!
//! - `bucket`: a bounded, strictly-increasing run of items (internal;
//!   [SortedSet] is built on top of it).
//! - `engine`: the ordered sequence of buckets, bucket-splitting, locate,
//!   rank, and slicing logic (also internal).
//! - [SortedSet]: the lockable handle callers actually use.
//!
//! Additionally, [Term] gives the set's item value contract (accepted vs.
//! rejected kinds) a concrete, native-Rust shape usable without any
//! host-language binding.
//!
//! # Example
//!
//! ```
//! use bucketed_sorted_set::{Configuration, SortedSet};
//!
//! let set: SortedSet<i64> = SortedSet::new(Configuration::default());
//! set.add(3).unwrap();
//! set.add(1).unwrap();
//! set.add(2).unwrap();
//!
//! assert_eq!(set.to_list().unwrap(), vec![1, 2, 3]);
//! assert_eq!(set.find_index(&2).unwrap(), 1);
//! ```

mod bucket;
mod concurrency;
mod config;
mod engine;
mod error;
mod term;
mod validate;


pub use concurrency::{Added, Removed, SortedSet};
pub use config::{Configuration, LockPolicy, DEFAULT_BUCKET_SIZE};
pub use error::Error;
pub use term::Term;
pub use validate::Validate;
