//! A weak AVL (WAVL) order-statistic tree for Rust.
//!
//! [`WavlTree`] maps distinct `i32` keys to `String` values in a rank-balanced
//! binary search tree. Every node carries an integer rank; the difference
//! between a node's rank and each child's rank is 1 or 2, leaves have rank 0
//! and absent children count as rank -1. Keeping that invariant needs only a
//! constant amortized number of promotions, demotions and rotations per
//! update, and the height never exceeds `2 log2(n)`.
//!
//! Each node also caches its subtree size, which gives O(log n)
//! order-statistic queries:
//!
//! - [`select`](WavlTree::select) - value at a 1-based sorted position
//! - [`index_of`](WavlTree::index_of) - 1-based sorted position of a key
//!
//! # Example
//!
//! ```
//! use wavl_tree::WavlTree;
//!
//! let mut tree = WavlTree::new();
//! for (key, value) in [(40, "forty"), (10, "ten"), (30, "thirty"), (20, "twenty")] {
//!     tree.insert(key, value).unwrap();
//! }
//!
//! assert_eq!(tree.search(30), Some("thirty"));
//! assert_eq!(tree.size(), 4);
//!
//! // Order statistics (O(log n))
//! assert_eq!(tree.select(2), Some("twenty"));
//! assert_eq!(tree.index_of(40), Some(4));
//!
//! // Mutations report how much rebalancing they did
//! let operations = tree.delete(10).unwrap();
//! assert!(operations <= 6);
//! assert_eq!(tree.keys_to_array(), [20, 30, 40]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Arena storage** - Nodes live in one contiguous arena linked by indices, freed slots are reused
//! - **Inspectable** - [`WavlNode`] exposes ranks and subtree sizes read-only
//!
//! # Logging
//!
//! Rebalancing steps are reported through [`tracing`] at `TRACE` level and
//! completed mutations at `DEBUG` level. The crate installs no subscriber.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
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

mod error;
mod raw;

pub mod wavl_tree;

pub use error::Error;
pub use wavl_tree::{Iter, NodeRef, WavlNode, WavlTree};
