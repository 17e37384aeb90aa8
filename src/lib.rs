//! An indexable skip list for Rust.
//!
//! This crate provides [`SkipList`], an ordered set of unique values that
//! supports the usual set operations plus expected O(log n) access by
//! position:
//!
//! - [`get`](SkipList::get) - Get the value at a given sorted position
//! - [`remove_at`](SkipList::remove_at) - Remove the value at a given sorted position
//! - [`rank_of`](SkipList::rank_of) - Get the sorted position of a value
//! - Indexing by [`Rank`] - e.g., `list[Rank(0)]` for the smallest value
//!
//! # Example
//!
//! ```
//! use skiprank::{Rank, SkipList};
//!
//! let mut list = SkipList::new(8);
//! for value in [50, 10, 40, 20, 30] {
//!     list.insert(value);
//! }
//!
//! // Duplicates are rejected.
//! assert!(!list.insert(20));
//! assert_eq!(list.len(), 5);
//!
//! // Rank operations (O(log n) expected)
//! assert_eq!(list.get(2), Some(&30));
//! assert_eq!(list.rank_of(&40), Some(3));
//! assert_eq!(list[Rank(0)], 10);
//!
//! assert_eq!(list.remove_at(2), Some(30));
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [10, 20, 40, 50]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Deterministic** - Tower heights come from a seeded per-list generator
//! - **`tracing`** - Optional feature emitting trace events when rows are added or dropped
//!
//! # Implementation
//!
//! Each value lives in a tower of forward links, one per row it occupies. Row
//! 0 holds every value; each higher row holds a random half of the row below.
//! Every link also records its *span*, the number of base-row positions it
//! skips, so a search can count its way to a rank while it descends. Row 0 is
//! doubly linked, which gives O(1) access to the largest value and reverse
//! iteration. Nodes are stored in an arena and addressed by compact handles.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod skip_list;

pub use order_statistic::Rank;
pub use skip_list::{DEFAULT_MAX_LEVEL, DEFAULT_SEED, SkipList};
