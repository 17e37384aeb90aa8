use core::borrow::Borrow;
use core::ops::Index;

use super::SkipList;
use crate::Rank;

impl<T> SkipList<T> {
    /// Returns the value at zero-based position `index` in sorted order, or
    /// `None` if `index` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let list = SkipList::from([10, 20, 30]);
    /// assert_eq!(list.get(1), Some(&20));
    /// assert!(list.get(3).is_none());
    /// ```
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        let handle = self.raw.search_by_rank(index)?;
        Some(self.raw.node(handle).value())
    }
}

impl<T: Ord> SkipList<T> {
    /// Removes and returns the value at zero-based position `index`, or `None`
    /// if `index` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::from([10, 20, 30, 40, 50]);
    /// assert_eq!(list.remove_at(2), Some(30));
    /// assert_eq!(list.get(2), Some(&40));
    /// assert_eq!(list.remove_at(4), None);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.raw.remove_at(index)
    }

    /// Returns the zero-based rank of `value` in sorted order, or `None` if
    /// the value is not present.
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let list = SkipList::from([10, 20]);
    /// assert_eq!(list.rank_of(&20), Some(1));
    /// assert_eq!(list.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(value).map(|(_, rank)| rank)
    }
}

/// Indexes into the list by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use skiprank::{Rank, SkipList};
///
/// let list = SkipList::from([10, 20, 30]);
/// assert_eq!(list[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for SkipList<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get(rank.0).expect("index out of bounds")
    }
}
