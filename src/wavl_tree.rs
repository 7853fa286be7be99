use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use crate::error::Error;
use crate::raw::{Handle, RawWavlTree};

mod capacity;
mod node_ref;
mod order_statistic;

pub use node_ref::{NodeRef, WavlNode};

/// A rank-balanced ("weak AVL") binary search tree from distinct `i32` keys
/// to `String` values.
///
/// Insertions and deletions rebalance with the WAVL rules: every rank
/// difference between a node and its children is 1 or 2, and leaves have
/// rank 0. Height stays within `2 log2(n)` and the rebalancing work per
/// update is amortized O(1). Each node caches the size of its subtree, so
/// [`select`](WavlTree::select) and [`index_of`](WavlTree::index_of) run in
/// O(log n).
///
/// Mutations report failure through [`Error`] and leave the tree untouched
/// when they fail. On success they return how many elementary rebalancing
/// operations (promotions, demotions and rotations) they performed.
///
/// # Examples
///
/// ```
/// use wavl_tree::{Error, WavlTree};
///
/// let mut tree = WavlTree::new();
/// tree.insert(5, "five").unwrap();
/// tree.insert(3, "three").unwrap();
/// tree.insert(8, "eight").unwrap();
///
/// assert_eq!(tree.search(3), Some("three"));
/// assert_eq!(tree.insert(3, "again"), Err(Error::DuplicateKey(3)));
///
/// assert_eq!(tree.min(), Some("three"));
/// assert_eq!(tree.select(2), Some("five"));
/// assert_eq!(tree.keys_to_array(), [3, 5, 8]);
///
/// tree.delete(5).unwrap();
/// assert_eq!(tree.delete(5), Err(Error::KeyNotFound(5)));
/// assert_eq!(tree.values_to_array(), ["three", "eight"]);
/// ```
///
/// The tree is not synchronized; share it across threads behind a lock.
#[derive(Clone)]
pub struct WavlTree {
    raw: RawWavlTree,
}

impl WavlTree {
    /// Makes a new, empty `WavlTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTree;
    ///
    /// let tree = WavlTree::new();
    /// assert!(tree.empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        WavlTree { raw: RawWavlTree::new() }
    }

    /// Returns the value stored under `key`, or `None` if it is absent.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn search(&self, key: i32) -> Option<&str> {
        self.raw.search(key)
    }

    /// Returns `true` if the tree holds `key`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains_key(&self, key: i32) -> bool {
        self.raw.find(key).is_some()
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns the number of rebalancing operations the insertion needed,
    /// `0` if none.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if `key` is already present; the stored value
    /// is not replaced.
    ///
    /// # Complexity
    ///
    /// O(log n), amortized O(1) rebalancing operations.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::{Error, WavlTree};
    ///
    /// let mut tree = WavlTree::new();
    /// assert_eq!(tree.insert(2, "b"), Ok(0));
    /// // The root is promoted.
    /// assert_eq!(tree.insert(1, "a"), Ok(1));
    /// assert_eq!(tree.insert(1, "z"), Err(Error::DuplicateKey(1)));
    /// assert_eq!(tree.search(1), Some("a"));
    /// ```
    pub fn insert(&mut self, key: i32, value: impl Into<String>) -> Result<usize, Error> {
        self.raw.insert(key, value.into())
    }

    /// Removes `key` and its value.
    ///
    /// Returns the number of rebalancing operations the deletion needed,
    /// `0` if none.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if `key` is absent.
    ///
    /// # Complexity
    ///
    /// O(log n), amortized O(1) rebalancing operations.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::{Error, WavlTree};
    ///
    /// let mut tree: WavlTree = [(1, "a"), (2, "b"), (3, "c")].into_iter().collect();
    /// assert!(tree.delete(2).is_ok());
    /// assert_eq!(tree.delete(99), Err(Error::KeyNotFound(99)));
    /// assert_eq!(tree.keys_to_array(), [1, 3]);
    /// ```
    pub fn delete(&mut self, key: i32) -> Result<usize, Error> {
        self.raw.delete(key)
    }

    /// Returns the value stored under the smallest key.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn min(&self) -> Option<&str> {
        self.raw.min().map(|h| self.raw.value(h))
    }

    /// Returns the value stored under the largest key.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn max(&self) -> Option<&str> {
        self.raw.max().map(|h| self.raw.value(h))
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn min_key(&self) -> Option<i32> {
        self.raw.min().map(|h| self.raw.node(h).key())
    }

    /// Returns the largest key.
    #[must_use]
    pub fn max_key(&self) -> Option<i32> {
        self.raw.max().map(|h| self.raw.node(h).key())
    }

    /// Returns the number of entries in the tree.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree holds no entries.
    #[must_use]
    pub const fn empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of edges on the longest root-to-leaf path, or
    /// `None` for an empty tree.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTree;
    ///
    /// let tree: WavlTree = (1..=15).map(|k| (k, "")).collect();
    /// assert_eq!(tree.height(), Some(3));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
    }

    /// Removes every entry, keeping the allocated storage.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns all keys in increasing order.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn keys_to_array(&self) -> Vec<i32> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns all values, ordered by their keys.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn values_to_array(&self) -> Vec<String> {
        self.iter().map(|(_, value)| String::from(value)).collect()
    }

    /// Gets an iterator over the entries of the tree, sorted by key.
    ///
    /// The iterator starts at the cached minimum and steps with the in-order
    /// successor, so a full pass is O(n).
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTree;
    ///
    /// let tree: WavlTree = [(3, "c"), (1, "a"), (2, "b")].into_iter().collect();
    /// let entries: Vec<_> = tree.iter().collect();
    /// assert_eq!(entries, [(1, "a"), (2, "b"), (3, "c")]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tree: &self.raw,
            next: self.raw.min(),
            remaining: self.raw.len(),
        }
    }
}

impl Default for WavlTree {
    /// Creates an empty `WavlTree`.
    fn default() -> Self {
        WavlTree::new()
    }
}

impl fmt::Debug for WavlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Inserts every pair; pairs whose key is already present are skipped.
impl<S: Into<String>> Extend<(i32, S)> for WavlTree {
    fn extend<I: IntoIterator<Item = (i32, S)>>(&mut self, iter: I) {
        for (key, value) in iter {
            // A duplicate keeps the first value.
            let _ = self.insert(key, value);
        }
    }
}

impl<S: Into<String>> FromIterator<(i32, S)> for WavlTree {
    fn from_iter<I: IntoIterator<Item = (i32, S)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut tree = WavlTree::with_capacity(iter.size_hint().0);
        tree.extend(iter);
        tree
    }
}

impl<'a> IntoIterator for &'a WavlTree {
    type Item = (i32, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// An iterator over the entries of a [`WavlTree`], in key order.
///
/// This `struct` is created by [`WavlTree::iter`].
#[derive(Clone)]
pub struct Iter<'a> {
    tree: &'a RawWavlTree,
    next: Option<Handle>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i32, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.next?;
        self.next = self.tree.successor(handle);
        self.remaining -= 1;
        Some((self.tree.node(handle).key(), self.tree.value(handle)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
