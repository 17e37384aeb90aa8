use core::borrow::Borrow;
use core::cmp::Ordering;

use alloc::vec::Vec;
use smallvec::{SmallVec, smallvec};

use super::arena::{Arena, Handle};
use super::level::LevelGenerator;
use super::node::Node;

/// The skip list engine backing `SkipList`.
///
/// Every row is a ring closed by the sentinel head. Positions count base-row
/// steps from the head, so the head sits at position 0 and the element of
/// zero-based rank `r` at position `r + 1`.
#[derive(Clone)]
pub(crate) struct RawSkipList<T> {
    /// Arena storing the head (first slot) and every element node.
    nodes: Arena<Node<T>>,
    /// Number of occupied rows; `1 <= level <= max_level`.
    level: usize,
    /// Number of stored values, excluding the head.
    len: usize,
    levels: LevelGenerator,
    /// Forward steps taken by the descents of mutating operations so far.
    traversals: u64,
}

/// One row of a descent: the last node before the target on that row, and its
/// base-row position.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PathElement {
    pub(crate) node: Handle,
    pub(crate) position: usize,
}

impl PathElement {
    const HEAD: Self = Self {
        node: Handle::HEAD,
        position: 0,
    };
}

/// Predecessors recorded by a descent, indexed by row.
pub(crate) type Path = SmallVec<[PathElement; 32]>;

impl<T> RawSkipList<T> {
    pub(crate) fn new(max_level: usize, seed: u64, capacity: usize) -> Self {
        let levels = LevelGenerator::new(max_level, seed);
        let mut nodes = Arena::with_capacity(capacity.saturating_add(1));
        let head = nodes.alloc(Node::sentinel(max_level));
        debug_assert!(head.is_head());
        Self {
            nodes,
            level: 1,
            len: 0,
            levels,
            traversals: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn level(&self) -> usize {
        self.level
    }

    pub(crate) fn max_level(&self) -> usize {
        self.levels.max_level()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(1)
    }

    pub(crate) fn traversals(&self) -> u64 {
        self.traversals
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// First node on the base row, or `None` when empty.
    pub(crate) fn first(&self) -> Option<Handle> {
        let first = self.head().forward(0);
        (!first.is_head()).then_some(first)
    }

    /// Last node on the base row, found through the head's back link.
    pub(crate) fn last(&self) -> Option<Handle> {
        let last = self.head().back();
        (!last.is_head()).then_some(last)
    }

    /// Resets to the freshly constructed state. The level generator keeps its
    /// position so later heights do not repeat earlier ones.
    pub(crate) fn clear(&mut self) {
        let max_level = self.max_level();
        self.nodes.truncate_to_first();
        *self.nodes.get_mut(Handle::HEAD) = Node::sentinel(max_level);
        self.level = 1;
        self.len = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!(max_level, "skip list cleared");
    }

    /// Moves every value out in ascending order, leaving the list empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut result = Vec::with_capacity(self.len);
        let mut current = self.head().forward(0);
        while !current.is_head() {
            let node = self.nodes.take(current);
            current = node.forward(0);
            result.push(node.into_value());
        }
        self.clear();
        result
    }

    fn head(&self) -> &Node<T> {
        self.nodes.get(Handle::HEAD)
    }

    /// Walks from the head down to the base row. On each row it advances while
    /// `before_target(next, position_of_next)` holds, and records where it
    /// stopped. The path covers the `level` occupied rows only.
    ///
    /// Also returns the number of forward links followed.
    fn descend<F>(&self, mut before_target: F) -> (Path, u64)
    where
        F: FnMut(&Node<T>, usize) -> bool,
    {
        let mut path: Path = smallvec![PathElement::HEAD; self.level];
        let mut current = Handle::HEAD;
        let mut position = 0;
        let mut steps = 0;

        for level in (0..self.level).rev() {
            loop {
                let node = self.nodes.get(current);
                let next = node.forward(level);
                let reached = position + node.span(level);
                if next.is_head() || !before_target(self.nodes.get(next), reached) {
                    break;
                }
                current = next;
                position = reached;
                steps += 1;
            }
            path[level] = PathElement {
                node: current,
                position,
            };
        }

        (path, steps)
    }

    /// Descends to the leftmost position where `key` is or would be stored.
    pub(crate) fn descend_by_key<Q>(&self, key: &Q) -> (Path, u64)
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.descend(|next, _| next.value().borrow() < key)
    }

    /// Descends to the predecessor of the element with zero-based `rank`.
    pub(crate) fn descend_by_rank(&self, rank: usize) -> (Path, u64) {
        self.descend(|_, reached| reached <= rank)
    }

    /// The node immediately after `path`'s base-row predecessor.
    pub(crate) fn candidate(&self, path: &Path) -> Handle {
        self.nodes.get(path[0].node).forward(0)
    }

    /// Returns the node holding `key` and its zero-based rank.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<(Handle, usize)>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (path, _) = self.descend_by_key(key);
        let candidate = self.candidate(&path);
        self.holds(candidate, key).then_some((candidate, path[0].position))
    }

    /// Returns the node at zero-based `rank`.
    pub(crate) fn search_by_rank(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }
        let (path, _) = self.descend_by_rank(rank);
        Some(self.candidate(&path))
    }

    fn holds<Q>(&self, handle: Handle, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        !handle.is_head() && self.nodes.get(handle).value().borrow().cmp(key) == Ordering::Equal
    }
}

impl<T: Ord> RawSkipList<T> {
    /// Inserts `value` unless an equal value is already present.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        let height = self.levels.random_level();
        let (mut path, steps) = self.descend_by_key(&value);
        self.traversals += steps;
        if self.holds(self.candidate(&path), &value) {
            return false;
        }

        if height > self.level {
            let whole_list = self.len + 1;
            let head = self.nodes.get_mut(Handle::HEAD);
            for level in self.level..height {
                head.set_span(level, whole_list);
            }
            path.resize(height, PathElement::HEAD);

            #[cfg(feature = "tracing")]
            tracing::trace!(from = self.level, to = height, len = self.len, "skip list level raised");

            self.level = height;
        }

        let position = path[0].position + 1;
        let handle = self.nodes.alloc(Node::new(value, height));

        for (level, pred) in path.iter().enumerate().take(height) {
            let pred_node = self.nodes.get_mut(pred.node);
            let next = pred_node.forward(level);
            let old_span = pred_node.span(level);
            let gap = position - pred.position;
            pred_node.link(level, handle, gap);
            // The remainder of the old edge now starts at the new node.
            self.nodes.get_mut(handle).link(level, next, old_span + 1 - gap);
        }

        // Taller rows now pass over one more base-row node.
        for (level, pred) in path.iter().enumerate().take(self.level).skip(height) {
            let pred_node = self.nodes.get_mut(pred.node);
            pred_node.set_span(level, pred_node.span(level) + 1);
        }

        let next = self.nodes.get(handle).forward(0);
        self.nodes.get_mut(handle).set_back(path[0].node);
        self.nodes.get_mut(next).set_back(handle);

        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len + 1);
        true
    }

    /// Removes the value equal to `key`, if present.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let (path, steps) = self.descend_by_key(key);
        self.traversals += steps;
        let candidate = self.candidate(&path);
        if !self.holds(candidate, key) {
            return None;
        }
        Some(self.unlink(candidate, &path))
    }

    /// Removes the value at zero-based `rank`, if in range.
    pub(crate) fn remove_at(&mut self, rank: usize) -> Option<T> {
        if rank >= self.len {
            return None;
        }
        let (path, steps) = self.descend_by_rank(rank);
        self.traversals += steps;
        let candidate = self.candidate(&path);
        Some(self.unlink(candidate, &path))
    }

    /// Detaches `target` from every row using the predecessors in `path`, then
    /// drops now-empty top rows.
    fn unlink(&mut self, target: Handle, path: &Path) -> T {
        debug_assert!(!target.is_head(), "`RawSkipList::unlink()` - cannot unlink the head!");

        for (level, pred) in path.iter().enumerate().take(self.level) {
            let (target_next, target_span) = {
                let node = self.nodes.get(target);
                if level < node.height() {
                    (node.forward(level), node.span(level))
                } else {
                    (Handle::HEAD, 0)
                }
            };
            let pred_node = self.nodes.get_mut(pred.node);
            let span = pred_node.span(level);
            if pred_node.forward(level) == target {
                // The two edges fuse, minus the removed node's own step.
                pred_node.link(level, target_next, span + target_span - 1);
            } else {
                pred_node.set_span(level, span - 1);
            }
        }

        let node = self.nodes.take(target);
        self.nodes.get_mut(node.forward(0)).set_back(node.back());

        while self.level > 1 && self.head().forward(self.level - 1).is_head() {
            self.level -= 1;

            #[cfg(feature = "tracing")]
            tracing::trace!(to = self.level, "skip list level lowered");
        }

        self.len -= 1;
        node.into_value()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(clippy::uninlined_format_args, clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    impl<T: Ord + core::fmt::Debug> RawSkipList<T> {
        /// Checks ordering, row nesting, span and ring sums, back links and
        /// level tightness. Panics listing every violation found.
        pub(crate) fn validate_invariants(&self) {
            let mut errors: Vec<String> = Vec::new();

            if !(1..=self.max_level()).contains(&self.level) {
                errors.push(alloc::format!("level {} outside [1, {}]", self.level, self.max_level()));
            }

            // Base row: ordering, positions, back links.
            let mut base: Vec<Handle> = Vec::new();
            let mut previous = Handle::HEAD;
            let mut current = self.head().forward(0);
            while !current.is_head() {
                if base.len() > self.len {
                    errors.push(alloc::format!("base row longer than len {}", self.len));
                    break;
                }
                let node = self.nodes.get(current);
                if node.back() != previous {
                    errors.push(alloc::format!("back link of {:?} is {:?}, expected {:?}", current, node.back(), previous));
                }
                if let Some(&before) = base.last()
                    && self.nodes.get(before).value() >= node.value()
                {
                    errors.push(alloc::format!(
                        "values out of order: {:?} then {:?}",
                        self.nodes.get(before).value(),
                        node.value()
                    ));
                }
                if node.height() > self.level {
                    errors.push(alloc::format!("node {:?} has height {} > level {}", current, node.height(), self.level));
                }
                base.push(current);
                previous = current;
                current = node.forward(0);
            }
            if self.head().back() != previous {
                errors.push(alloc::format!("head back link is {:?}, expected {:?}", self.head().back(), previous));
            }
            if base.len() != self.len {
                errors.push(alloc::format!("len mismatch: self.len={}, base row={}", self.len, base.len()));
            }
            if self.nodes.len() != self.len + 1 {
                errors.push(alloc::format!("arena holds {} nodes for len {}", self.nodes.len(), self.len));
            }

            let position_of = |handle: Handle| -> usize {
                if handle.is_head() {
                    base.len() + 1
                } else {
                    base.iter().position(|&h| h == handle).map_or(usize::MAX, |p| p + 1)
                }
            };

            // Upper rows: nesting, spans, ring sums.
            for level in 0..self.level {
                let mut on_row = 0usize;
                let mut ring = 0usize;
                let mut current = Handle::HEAD;
                let mut position = 0usize;
                loop {
                    let node = self.nodes.get(current);
                    let next = node.forward(level);
                    let next_position = position_of(next);
                    if next_position == usize::MAX || next_position <= position {
                        errors.push(alloc::format!("row {} links {:?} to {:?} out of order", level, current, next));
                        break;
                    }
                    if node.span(level) != next_position - position {
                        errors.push(alloc::format!(
                            "span mismatch at {:?} row {}: stored={}, actual={}",
                            current,
                            level,
                            node.span(level),
                            next_position - position
                        ));
                    }
                    ring += node.span(level);
                    if next.is_head() {
                        break;
                    }
                    if self.nodes.get(next).height() <= level {
                        errors.push(alloc::format!("row {} reaches {:?} whose height is too short", level, next));
                    }
                    on_row += 1;
                    current = next;
                    position = next_position;
                }
                if ring != self.len + 1 {
                    errors.push(alloc::format!("row {} ring sum {} != len + 1 = {}", level, ring, self.len + 1));
                }
                let expected = base.iter().filter(|&&h| self.nodes.get(h).height() > level).count();
                if on_row != expected {
                    errors.push(alloc::format!("row {} holds {} nodes, expected {}", level, on_row, expected));
                }
            }

            if self.len > 0 && self.head().forward(self.level - 1).is_head() {
                errors.push(alloc::format!("top row {} is empty", self.level - 1));
            }
            if self.len == 0 && self.level != 1 {
                errors.push(alloc::format!("empty list at level {}", self.level));
            }

            assert!(errors.is_empty(), "Skip list invariant violations:\n{}", errors.join("\n"));
        }

        fn values(&self) -> Vec<&T> {
            let mut values = Vec::new();
            let mut current = self.head().forward(0);
            while !current.is_head() {
                let node = self.nodes.get(current);
                values.push(node.value());
                current = node.forward(0);
            }
            values
        }

        /// Heights and spans of every occupied row, in base-row order.
        fn shape(&self) -> Vec<(Option<&T>, Vec<usize>)> {
            let mut shape = Vec::new();
            let head_spans = (0..self.level).map(|level| self.head().span(level)).collect();
            shape.push((None, head_spans));
            let mut current = self.head().forward(0);
            while !current.is_head() {
                let node = self.nodes.get(current);
                shape.push((Some(node.value()), (0..node.height()).map(|level| node.span(level)).collect()));
                current = node.forward(0);
            }
            shape
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i32),
        Remove(i32),
        RemoveAt(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0i32..1000).prop_map(Op::Insert),
            2 => (0i32..1000).prop_map(Op::Remove),
            1 => (0usize..600).prop_map(Op::RemoveAt),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn invariants_maintained_after_operations(
            seed in any::<u64>(),
            max_level in 1usize..12,
            ops in prop::collection::vec(op_strategy(), 0..400),
        ) {
            let mut list: RawSkipList<i32> = RawSkipList::new(max_level, seed, 0);
            let mut model: BTreeSet<i32> = BTreeSet::new();

            for op in ops {
                match op {
                    Op::Insert(value) => {
                        prop_assert_eq!(list.insert(value), model.insert(value));
                    }
                    Op::Remove(value) => {
                        prop_assert_eq!(list.remove(&value).is_some(), model.remove(&value));
                    }
                    Op::RemoveAt(rank) => {
                        let expected = model.iter().nth(rank).copied();
                        if let Some(value) = expected {
                            model.remove(&value);
                        }
                        prop_assert_eq!(list.remove_at(rank), expected);
                    }
                }
                list.validate_invariants();
                prop_assert_eq!(list.len(), model.len());
            }
        }

        #[test]
        fn search_by_rank_matches_sorted_order(
            seed in any::<u64>(),
            values in prop::collection::vec(0i32..500, 1..200),
        ) {
            let mut list: RawSkipList<i32> = RawSkipList::new(16, seed, values.len());
            for &value in &values {
                list.insert(value);
            }
            let expected: Vec<i32> = values.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();

            for (rank, value) in expected.iter().enumerate() {
                let handle = list.search_by_rank(rank).expect("rank in range");
                prop_assert_eq!(list.node(handle).value(), value);
                prop_assert_eq!(list.search(value), Some((handle, rank)));
            }
            prop_assert!(list.search_by_rank(expected.len()).is_none());
        }

        #[test]
        fn insert_then_remove_restores_shape(
            seed in any::<u64>(),
            values in prop::collection::vec(0i32..1000, 0..100),
            probe in 1000i32..2000,
        ) {
            let mut list: RawSkipList<i32> = RawSkipList::new(10, seed, 0);
            for value in values {
                list.insert(value);
            }
            let before: Vec<(Option<i32>, Vec<usize>)> =
                list.shape().into_iter().map(|(v, spans)| (v.copied(), spans)).collect();
            let level_before = list.level();

            prop_assert!(list.insert(probe));
            prop_assert_eq!(list.remove(&probe), Some(probe));
            list.validate_invariants();

            let after: Vec<(Option<i32>, Vec<usize>)> =
                list.shape().into_iter().map(|(v, spans)| (v.copied(), spans)).collect();
            prop_assert_eq!(before, after);
            prop_assert_eq!(list.level(), level_before);
        }
    }

    #[test]
    fn empty_list() {
        let list: RawSkipList<i32> = RawSkipList::new(4, 0, 0);
        list.validate_invariants();
        assert!(list.is_empty());
        assert_eq!(list.level(), 1);
        assert!(list.search(&0).is_none());
        assert!(list.search_by_rank(0).is_none());
        assert!(list.first().is_none());
        assert!(list.last().is_none());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut list: RawSkipList<i32> = RawSkipList::new(8, 3, 0);
        assert!(list.insert(42));
        assert!(!list.insert(42));
        assert_eq!(list.len(), 1);
        list.validate_invariants();
    }

    #[test]
    fn remove_missing_leaves_list_untouched() {
        let mut list: RawSkipList<i32> = RawSkipList::new(8, 3, 0);
        for value in [10, 20, 30] {
            list.insert(value);
        }
        assert!(list.remove(&25).is_none());
        assert!(list.remove_at(3).is_none());
        assert_eq!(list.values(), [&10, &20, &30]);
        list.validate_invariants();
    }

    #[test]
    fn single_element_removal_resets_level() {
        // Find a seed whose first draw is taller than one row.
        let seed = (0..u64::MAX)
            .find(|&seed| LevelGenerator::new(8, seed).random_level() > 1)
            .expect("some seed draws a tall tower");
        let mut list: RawSkipList<i32> = RawSkipList::new(8, seed, 0);
        list.insert(5);
        assert!(list.level() > 1);
        list.validate_invariants();

        assert_eq!(list.remove_at(0), Some(5));
        assert_eq!(list.level(), 1);
        list.validate_invariants();
    }

    #[test]
    fn single_row_degenerates_to_sorted_list() {
        let mut list: RawSkipList<i32> = RawSkipList::new(1, 11, 0);
        for value in [5, 1, 4, 2, 3] {
            list.insert(value);
        }
        list.validate_invariants();
        assert_eq!(list.level(), 1);
        assert_eq!(list.values(), [&1, &2, &3, &4, &5]);
        for rank in 0..5 {
            let node = list.node(list.search_by_rank(rank).expect("in range"));
            assert_eq!(node.height(), 1);
            assert_eq!(node.span(0), 1);
        }
    }

    #[test]
    fn back_links_walk_in_reverse() {
        let mut list: RawSkipList<i32> = RawSkipList::new(6, 5, 0);
        for value in (0..50).rev() {
            list.insert(value);
        }
        list.validate_invariants();

        let mut reversed = Vec::new();
        let mut current = list.last();
        while let Some(handle) = current {
            let node = list.node(handle);
            reversed.push(*node.value());
            let back = node.back();
            current = (!back.is_head()).then_some(back);
        }
        assert_eq!(reversed, (0..50).rev().collect::<Vec<_>>());
    }

    #[test]
    fn clear_resets_structure_and_reuses_arena() {
        let mut list: RawSkipList<i32> = RawSkipList::new(8, 13, 0);
        for value in 0..100 {
            list.insert(value);
        }
        list.clear();
        list.validate_invariants();
        assert_eq!(list.len(), 0);
        assert_eq!(list.level(), 1);
        assert!(list.search(&5).is_none());

        for value in 0..10 {
            assert!(list.insert(value));
        }
        list.validate_invariants();
        let expected: Vec<i32> = (0..10).collect();
        assert_eq!(list.values(), expected.iter().collect::<Vec<_>>());
    }

    #[test]
    fn drain_returns_sorted_values() {
        let mut list: RawSkipList<i32> = RawSkipList::new(8, 17, 0);
        for value in [9, 3, 7, 1, 5] {
            list.insert(value);
        }
        assert_eq!(list.drain_to_vec(), [1, 3, 5, 7, 9]);
        assert!(list.is_empty());
        list.validate_invariants();
    }

    #[test]
    fn descents_count_forward_steps() {
        let mut list: RawSkipList<i32> = RawSkipList::new(1, 0, 0);
        for value in 0..10 {
            list.insert(value);
        }
        // A single row is a plain list: inserting `v` steps over `v` nodes.
        assert_eq!(list.traversals(), (0..10).sum::<u64>());

        let before = list.traversals();
        assert_eq!(list.remove(&9), Some(9));
        assert_eq!(list.traversals() - before, 9);
    }

    #[test]
    fn lookups_leave_counter_untouched() {
        let mut list: RawSkipList<i32> = RawSkipList::new(1, 0, 0);
        for value in 0..10 {
            list.insert(value);
        }
        let before = list.traversals();
        assert!(list.search(&9).is_some());
        assert!(list.search_by_rank(9).is_some());
        assert_eq!(list.traversals(), before);
    }

    #[test]
    fn path_covers_occupied_rows_only() {
        let mut list: RawSkipList<i32> = RawSkipList::new(1 << 16, 29, 0);
        assert_eq!(list.descend_by_key(&0).0.len(), 1);

        for value in 0..200 {
            list.insert(value);
        }
        list.validate_invariants();
        assert!(list.level() < 64);
        assert_eq!(list.descend_by_key(&100).0.len(), list.level());
        assert_eq!(list.descend_by_rank(100).0.len(), list.level());

        for value in 0..200 {
            assert_eq!(list.remove(&value), Some(value));
        }
        list.validate_invariants();
        assert_eq!(list.level(), 1);
    }
}
