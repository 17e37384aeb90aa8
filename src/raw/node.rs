use smallvec::{SmallVec, smallvec};

use super::arena::Handle;

/// Towers up to this height are stored inline. With `P = 0.5` that covers
/// roughly 94% of nodes.
pub(crate) const INLINE_HEIGHT: usize = 4;

type Links = SmallVec<[Handle; INLINE_HEIGHT]>;
type Spans = SmallVec<[usize; INLINE_HEIGHT]>;

/// A tower in the skip list.
///
/// `forward[i]` is the next node on row `i` (or [`Handle::HEAD`] at the end of
/// the row) and `span[i]` is how many base-row positions that link advances.
/// Both vectors are sized once, at construction, to the node's height.
#[derive(Clone)]
pub(crate) struct Node<T> {
    // `None` only for the sentinel head.
    value: Option<T>,
    forward: Links,
    span: Spans,
    // Predecessor on the base row. Non-owning.
    back: Handle,
}

impl<T> Node<T> {
    /// Creates the sentinel head: every row is an empty ring of span 1.
    pub(crate) fn sentinel(max_level: usize) -> Self {
        Self {
            value: None,
            forward: smallvec![Handle::HEAD; max_level],
            span: smallvec![1; max_level],
            back: Handle::HEAD,
        }
    }

    /// Creates an unlinked node of the given height. Links and spans are
    /// filled in when the node is spliced into its rows.
    pub(crate) fn new(value: T, height: usize) -> Self {
        debug_assert!(height >= 1, "`Node::new()` - `height` must be at least 1");
        Self {
            value: Some(value),
            forward: smallvec![Handle::HEAD; height],
            span: smallvec![0; height],
            back: Handle::HEAD,
        }
    }

    /// Number of rows this node participates in.
    #[inline]
    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }

    /// Returns the stored value.
    ///
    /// # Panics
    ///
    /// Panics when called on the sentinel head.
    #[inline]
    pub(crate) fn value(&self) -> &T {
        self.value.as_ref().expect("`Node::value()` - the sentinel head has no value!")
    }

    pub(crate) fn into_value(self) -> T {
        self.value.expect("`Node::into_value()` - the sentinel head has no value!")
    }

    #[inline]
    pub(crate) fn forward(&self, level: usize) -> Handle {
        self.forward[level]
    }

    #[inline]
    pub(crate) fn span(&self, level: usize) -> usize {
        self.span[level]
    }

    /// Points row `level` at `next`, covering `span` base-row positions.
    #[inline]
    pub(crate) fn link(&mut self, level: usize, next: Handle, span: usize) {
        self.forward[level] = next;
        self.span[level] = span;
    }

    #[inline]
    pub(crate) fn set_span(&mut self, level: usize, span: usize) {
        self.span[level] = span;
    }

    #[inline]
    pub(crate) fn back(&self) -> Handle {
        self.back
    }

    #[inline]
    pub(crate) fn set_back(&mut self, back: Handle) {
        self.back = back;
    }
}
