/// A zero-based rank into the sorted order of a [`SkipList`](crate::SkipList).
///
/// Used to index a list by position rather than by value.
///
/// # Examples
///
/// ```
/// use skiprank::{Rank, SkipList};
///
/// let list = SkipList::from(["b", "a"]);
/// assert_eq!(list[Rank(0)], "a");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
