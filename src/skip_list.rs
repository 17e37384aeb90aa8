use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawSkipList};

mod bulk;
mod cursor;
mod order_statistic;

pub use cursor::Cursor;

/// Default ceiling on tower height. Comfortably indexes 2^32 values at `P = 0.5`.
pub const DEFAULT_MAX_LEVEL: usize = 32;

/// Seed used by [`SkipList::new`] and [`SkipList::default`].
pub const DEFAULT_SEED: u64 = 0x5EED_5C1B_1157_0000;

/// An ordered set based on an indexable skip list.
///
/// Values are kept unique and in ascending order. Besides the usual set
/// operations, every element can be reached by its zero-based rank in expected
/// O(log n) time, because each forward link records how many base-row
/// positions it skips.
///
/// Tower heights come from a per-list pseudo-random generator. Lists built with
/// the same seed and fed the same operations have identical shapes.
///
/// It is a logic error for a value to be modified in such a way that its
/// ordering relative to any other value, as determined by the [`Ord`] trait,
/// changes while it is in the list.
///
/// # Examples
///
/// ```
/// use skiprank::SkipList;
///
/// let mut list = SkipList::new(8);
/// list.insert(30);
/// list.insert(10);
/// list.insert(20);
///
/// assert!(list.contains(&20));
/// assert_eq!(list.get(0), Some(&10));
/// assert_eq!(list.rank_of(&30), Some(2));
///
/// assert_eq!(list.remove_at(1), Some(20));
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [10, 30]);
/// ```
pub struct SkipList<T> {
    raw: RawSkipList<T>,
}

/// An iterator over the values of a `SkipList`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`SkipList`].
///
/// # Examples
///
/// ```
/// use skiprank::SkipList;
///
/// let list = SkipList::from([3, 1, 2]);
/// let mut iter = list.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: SkipList::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    raw: &'a RawSkipList<T>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

/// An owning iterator over the values of a `SkipList`, in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`SkipList`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: SkipList#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> SkipList<T> {
    /// Makes a new, empty `SkipList` whose towers never exceed `max_level` rows.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let list: SkipList<i32> = SkipList::new(4);
    /// assert!(list.is_empty());
    /// assert_eq!(list.current_level(), 1);
    /// ```
    #[must_use]
    pub fn new(max_level: usize) -> Self {
        assert!(max_level >= 1, "`SkipList::new()` - `max_level` must be at least 1!");
        Self::with_seed(max_level, DEFAULT_SEED)
    }

    /// Makes a new, empty `SkipList` whose level generator starts from `seed`.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut a = SkipList::with_seed(8, 7);
    /// let mut b = SkipList::with_seed(8, 7);
    /// for i in 0..100 {
    ///     a.insert(i);
    ///     b.insert(i);
    /// }
    /// assert_eq!(a.current_level(), b.current_level());
    /// ```
    #[must_use]
    pub fn with_seed(max_level: usize, seed: u64) -> Self {
        assert!(max_level >= 1, "`SkipList::with_seed()` - `max_level` must be at least 1!");
        SkipList {
            raw: RawSkipList::new(max_level, seed, 0),
        }
    }

    /// Makes a new, empty `SkipList` with room for at least `capacity` values
    /// before its node storage reallocates.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let list: SkipList<i32> = SkipList::with_capacity(8, 16);
    /// assert!(list.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(max_level: usize, capacity: usize) -> Self {
        assert!(max_level >= 1, "`SkipList::with_capacity()` - `max_level` must be at least 1!");
        SkipList {
            raw: RawSkipList::new(max_level, DEFAULT_SEED, capacity),
        }
    }

    /// Returns the number of values the list can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Clears the list, removing all values. The list returns to its
    /// freshly constructed shape, with a single occupied row.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::from([1, 2, 3]);
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.current_level(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of values in the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::new(4);
    /// assert_eq!(list.len(), 0);
    /// list.insert(1);
    /// assert_eq!(list.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[doc(alias = "size")]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the list contains no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of rows currently in use: one more than the highest
    /// row occupied by any tower, or 1 for an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::new(6);
    /// assert_eq!(list.current_level(), 1);
    /// list.extend(0..1000);
    /// assert!((1..=6).contains(&list.current_level()));
    /// ```
    #[must_use]
    pub const fn current_level(&self) -> usize {
        self.raw.level()
    }

    /// Returns the ceiling on tower height this list was built with.
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.raw.max_level()
    }

    /// Returns how many forward links have been followed so far by the
    /// descents of insertions and removals, including those that left the list
    /// unchanged. Useful for observing the expected logarithmic search cost.
    ///
    /// Lookups such as [`contains`](SkipList::contains) and
    /// [`get`](SkipList::get) take `&self` and do not count. The counter
    /// survives [`clear`](SkipList::clear).
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::new(1);
    /// list.insert_all([1, 2, 3]);
    /// let before = list.traversals();
    /// assert!(list.contains(&3));
    /// assert_eq!(list.traversals(), before);
    /// assert!(list.remove(&3));
    /// assert_eq!(list.traversals(), before + 2);
    /// ```
    #[must_use]
    pub fn traversals(&self) -> u64 {
        self.raw.traversals()
    }

    /// Returns the first value in the list, if any. This is the minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::new(4);
    /// assert_eq!(list.first(), None);
    /// list.insert(2);
    /// list.insert(1);
    /// assert_eq!(list.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.node(handle).value())
    }

    /// Returns the last value in the list, if any. This is the maximum.
    ///
    /// # Complexity
    ///
    /// O(1) - the head's back link points at the tail.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.node(handle).value())
    }

    /// Gets an iterator that visits the values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let list = SkipList::from([3, 1, 2]);
    /// let values: Vec<_> = list.iter().rev().copied().collect();
    /// assert_eq!(values, [3, 2, 1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            raw: &self.raw,
            front: self.raw.first().unwrap_or(Handle::HEAD),
            back: self.raw.last().unwrap_or(Handle::HEAD),
            remaining: self.raw.len(),
        }
    }
}

impl<T: Ord> SkipList<T> {
    /// Adds a value to the list.
    ///
    /// Returns whether the value was newly inserted. If an equal value is
    /// already present, `false` is returned and the list is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::new(4);
    /// assert!(list.insert(42));
    /// assert!(!list.insert(42));
    /// assert_eq!(list.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value)
    }

    /// Removes the value equal to `value`. Returns whether it was present.
    ///
    /// The value may be any borrowed form of the list's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the element
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::from([2]);
    /// assert!(list.remove(&2));
    /// assert!(!list.remove(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value).is_some()
    }

    /// Removes and returns the value equal to `value`, if any.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value)
    }

    /// Returns `true` if the list contains a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let list = SkipList::from([1, 2, 3]);
    /// assert!(list.contains(&1));
    /// assert!(!list.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) expected
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(value).is_some()
    }

    /// Finds the value equal to `value` and returns a [`Cursor`] positioned on
    /// it, from which its rank and neighbours can be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let list = SkipList::from([10, 20, 30]);
    /// let cursor = list.find(&20).unwrap();
    /// assert_eq!(cursor.value(), &20);
    /// assert_eq!(cursor.rank(), 1);
    /// assert_eq!(cursor.prev().map(|c| *c.value()), Some(10));
    /// assert!(list.find(&25).is_none());
    /// ```
    pub fn find<Q>(&self, value: &Q) -> Option<Cursor<'_, T>>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (handle, rank) = self.raw.search(value)?;
        Some(Cursor::new(&self.raw, handle, rank))
    }

    /// Removes and returns the first (smallest) value, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let mut list = SkipList::from([2, 1]);
    /// assert_eq!(list.pop_first(), Some(1));
    /// assert_eq!(list.pop_first(), Some(2));
    /// assert_eq!(list.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.raw.remove_at(0)
    }

    /// Removes and returns the last (largest) value, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.raw.len().checked_sub(1)?;
        self.raw.remove_at(last)
    }
}

impl<T: fmt::Debug> fmt::Debug for SkipList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for SkipList<T> {
    fn clone(&self) -> Self {
        SkipList { raw: self.raw.clone() }
    }
}

impl<T> Default for SkipList<T> {
    /// Creates an empty `SkipList` with [`DEFAULT_MAX_LEVEL`] rows.
    fn default() -> Self {
        SkipList::new(DEFAULT_MAX_LEVEL)
    }
}

impl<T: PartialEq> PartialEq for SkipList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SkipList<T> {}

impl<T: Ord> FromIterator<T> for SkipList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = SkipList::default();
        list.extend(iter);
        list
    }
}

impl<T: Ord> Extend<T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for SkipList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for SkipList<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for SkipList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the list's contents in ascending order.
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SkipList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.raw.node(self.front);
        self.front = node.forward(0);
        self.remaining -= 1;
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.raw.node(self.back);
        self.back = node.back();
        self.remaining -= 1;
        Some(node.value())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}
