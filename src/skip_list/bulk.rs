use alloc::vec::Vec;
use core::borrow::Borrow;

use super::SkipList;

impl<T: Ord> SkipList<T> {
    /// Inserts every value from `values`. Returns how many were newly added;
    /// duplicates, within `values` or against the list, are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::from([1, 2]);
    /// assert_eq!(list.insert_all([2, 3, 4, 3]), 2);
    /// assert_eq!(list.len(), 4);
    /// ```
    pub fn insert_all<I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        values.into_iter().fold(0, |added, value| added + usize::from(self.insert(value)))
    }

    /// Removes every value equal to one in `values`. Returns how many were
    /// actually present.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::from([1, 2, 3, 4]);
    /// assert_eq!(list.remove_all(&[2, 4, 6]), 2);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn remove_all<'q, Q, I>(&mut self, values: I) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord + 'q,
        I: IntoIterator<Item = &'q Q>,
    {
        values.into_iter().fold(0, |removed, value| removed + usize::from(self.remove(value)))
    }

    /// Removes values by position, one index at a time and in the order
    /// given. Each index refers to the list as it stands after the previous
    /// removals. Out-of-range indices are skipped.
    ///
    /// Returns the removed values in removal order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::from([10, 20, 30, 40]);
    /// // Removing rank 0 twice takes the two smallest values.
    /// assert_eq!(list.remove_all_at([0, 0, 9]), [10, 20]);
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn remove_all_at<I>(&mut self, indices: I) -> Vec<T>
    where
        I: IntoIterator<Item = usize>,
    {
        indices.into_iter().filter_map(|index| self.remove_at(index)).collect()
    }
}
