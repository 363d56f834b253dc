use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};

use fnv::FnvHashSet;

use super::tree::NodeId;

/// Canonical key of a tile configuration, used for duplicate suppression.
// TODO pack keys into a u64 for n <= 4 boards to avoid the per-child allocation
pub(crate) type Key = Box<[u8]>;

/// One frontier slot: the arena handle plus everything needed to keep the
/// membership set in sync and to order the priority variant.
#[derive(Debug)]
pub(crate) struct Entry {
    pub(crate) id: NodeId,
    pub(crate) key: Key,
    /// cost + heuristic; only the priority frontier looks at it.
    pub(crate) priority: u32,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }
}

/// The pending-expansion set. The three disciplines differ only in which
/// entry `remove_next` picks, so the search loop is written once against
/// this trait.
///
/// Every implementation mirrors insertions and removals into an fnv set so
/// `contains` stays O(1) and exactly in sync with the underlying container.
pub(crate) trait Frontier {
    /// Insert children in reverse generation order. The LIFO discipline
    /// needs this so that the observed expansion order stays up, down,
    /// left, right after popping.
    const REVERSE_EXPANSION: bool = false;

    /// Goal-test children as they are generated instead of waiting for
    /// them to be removed. Only the cost-guided discipline does this.
    const EAGER_GOAL_CHECK: bool = false;

    fn is_empty(&self) -> bool;
    fn insert(&mut self, entry: Entry);
    fn remove_next(&mut self) -> Option<Entry>;
    fn contains(&self, key: &[u8]) -> bool;
}

/// Strict first-in-first-out queue - breadth-first order.
#[derive(Debug, Default)]
pub(crate) struct FifoFrontier {
    queue: VecDeque<Entry>,
    members: FnvHashSet<Key>,
}

impl Frontier for FifoFrontier {
    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn insert(&mut self, entry: Entry) {
        self.members.insert(entry.key.clone());
        self.queue.push_back(entry);
    }

    fn remove_next(&mut self) -> Option<Entry> {
        let entry = self.queue.pop_front()?;
        self.members.remove(&entry.key);
        Some(entry)
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.members.contains(key)
    }
}

/// Strict last-in-first-out stack - depth-first order.
#[derive(Debug, Default)]
pub(crate) struct LifoFrontier {
    stack: Vec<Entry>,
    members: FnvHashSet<Key>,
}

impl Frontier for LifoFrontier {
    const REVERSE_EXPANSION: bool = true;

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn insert(&mut self, entry: Entry) {
        self.members.insert(entry.key.clone());
        self.stack.push(entry);
    }

    fn remove_next(&mut self) -> Option<Entry> {
        let entry = self.stack.pop()?;
        self.members.remove(&entry.key);
        Some(entry)
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.members.contains(key)
    }
}

/// Min-heap on cost + heuristic. Entries with equal priority come out in an
/// order the heap picks - deterministic for a fixed insertion sequence but
/// otherwise unspecified.
#[derive(Debug, Default)]
pub(crate) struct PriorityFrontier {
    heap: BinaryHeap<Reverse<Entry>>,
    members: FnvHashSet<Key>,
}

impl Frontier for PriorityFrontier {
    const EAGER_GOAL_CHECK: bool = true;

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn insert(&mut self, entry: Entry) {
        self.members.insert(entry.key.clone());
        self.heap.push(Reverse(entry));
    }

    fn remove_next(&mut self) -> Option<Entry> {
        let Reverse(entry) = self.heap.pop()?;
        self.members.remove(&entry.key);
        Some(entry)
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.members.contains(key)
    }
}
