use super::WavlTree;
use crate::raw::RawWavlTree;

impl WavlTree {
    /// Creates an empty tree with room for at least `capacity` entries
    /// before its node storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTree;
    ///
    /// let tree = WavlTree::with_capacity(32);
    /// assert!(tree.empty());
    /// assert!(tree.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        WavlTree {
            raw: RawWavlTree::with_capacity(capacity),
        }
    }

    /// Returns how many entries the tree can hold without reallocating.
    ///
    /// Slots freed by [`delete`](WavlTree::delete) are reused first.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
