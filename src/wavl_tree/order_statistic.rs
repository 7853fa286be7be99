use super::WavlTree;

impl WavlTree {
    /// Returns the value whose key is the `index`-th smallest, counting
    /// from 1.
    ///
    /// Returns `None` when `index` is 0 or larger than [`size`](WavlTree::size).
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTree;
    ///
    /// let tree: WavlTree = [(30, "c"), (10, "a"), (20, "b")].into_iter().collect();
    /// assert_eq!(tree.select(1), Some("a"));
    /// assert_eq!(tree.select(3), Some("c"));
    /// assert_eq!(tree.select(0), None);
    /// assert_eq!(tree.select(4), None);
    /// ```
    #[must_use]
    pub fn select(&self, index: usize) -> Option<&str> {
        self.raw.select(index).map(|h| self.raw.value(h))
    }

    /// Returns the 1-based position of `key` in sorted order, or `None` if
    /// the key is absent.
    ///
    /// `select(index_of(k)?)` is the value stored under `k`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wavl_tree::WavlTree;
    ///
    /// let tree: WavlTree = [(30, "c"), (10, "a"), (20, "b")].into_iter().collect();
    /// assert_eq!(tree.index_of(20), Some(2));
    /// assert_eq!(tree.index_of(25), None);
    /// ```
    #[must_use]
    pub fn index_of(&self, key: i32) -> Option<usize> {
        self.raw.index_of(key)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;

    #[test]
    fn select_walks_every_position() {
        let tree: WavlTree = (0..100).rev().map(|k| (k * 3, format!("v{k}"))).collect();
        for index in 1..=100 {
            let key = i32::try_from(index - 1).unwrap() * 3;
            assert_eq!(tree.select(index).map(String::from), Some(format!("v{}", index - 1)));
            assert_eq!(tree.index_of(key), Some(index));
            assert_eq!(tree.index_of(key + 1), None);
        }
    }

    #[test]
    fn positions_shift_after_delete() {
        let mut tree: WavlTree = (1..=5).map(|k| (k, format!("{k}"))).collect();
        tree.delete(2).unwrap();
        assert_eq!(tree.index_of(3), Some(2));
        assert_eq!(tree.select(2), Some("3"));
        assert_eq!(tree.select(5), None);
    }
}
