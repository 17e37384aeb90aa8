use core::fmt;

use crate::raw::{Handle, RawSkipList};

/// A read-only position on one value of a [`SkipList`](crate::SkipList).
///
/// Returned by [`SkipList::find`](crate::SkipList::find). A cursor knows the
/// rank of its value, and can step to either neighbour in O(1): forward along
/// the base row, backward along its back link.
pub struct Cursor<'a, T> {
    raw: &'a RawSkipList<T>,
    node: Handle,
    rank: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(super) fn new(raw: &'a RawSkipList<T>, node: Handle, rank: usize) -> Self {
        debug_assert!(!node.is_head(), "`Cursor::new()` - cursor cannot rest on the head!");
        Cursor { raw, node, rank }
    }

    /// Returns the value under the cursor.
    #[must_use]
    pub fn value(&self) -> &'a T {
        self.raw.node(self.node).value()
    }

    /// Returns the zero-based rank of the value under the cursor.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Returns how many rows the value's tower occupies.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.node(self.node).height()
    }

    /// Returns a cursor on the next smaller value, if any.
    #[must_use]
    pub fn prev(&self) -> Option<Self> {
        let back = self.raw.node(self.node).back();
        if back.is_head() {
            return None;
        }
        Some(Cursor {
            raw: self.raw,
            node: back,
            rank: self.rank - 1,
        })
    }

    /// Returns a cursor on the next larger value, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiprank::SkipList;
    ///
    /// let list = SkipList::from([1, 2, 3]);
    /// let mut cursor = list.find(&1);
    /// let mut seen = Vec::new();
    /// while let Some(c) = cursor {
    ///     seen.push((*c.value(), c.rank()));
    ///     cursor = c.next();
    /// }
    /// assert_eq!(seen, [(1, 0), (2, 1), (3, 2)]);
    /// ```
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        let next = self.raw.node(self.node).forward(0);
        if next.is_head() {
            return None;
        }
        Some(Cursor {
            raw: self.raw,
            node: next,
            rank: self.rank + 1,
        })
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("value", self.value())
            .field("rank", &self.rank)
            .field("height", &self.height())
            .finish()
    }
}
