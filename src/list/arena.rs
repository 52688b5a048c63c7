/// Stable handle to a node stored in an [`Arena`].
///
/// Handles carry a generation so a handle to a released slot never resolves
/// to whatever node later reuses that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Slot index of this node inside its arena.
    pub const fn index(self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    node: Option<Node<T>>,
}

/// Result of a delete splice: the chain's head afterwards and the node that
/// was taken out of it, if any.
///
/// The removed node is left allocated with both links cleared, so the caller
/// can either release it or splice it somewhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unlinked {
    pub head: Option<NodeId>,
    pub removed: Option<NodeId>,
}

/// Owner of every node of one or more doubly-linked chains.
#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    len: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    /// Create an empty arena.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live nodes.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the arena holds no live nodes.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocate an unlinked node holding `value`.
    pub fn alloc(&mut self, value: T) -> NodeId {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    /// Release a node and return its value.
    ///
    /// The node must already be out of every chain; its neighbours are not
    /// touched. Returns `None` for a stale or unknown handle.
    pub fn remove(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(node.value)
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// The value stored at `id`.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    /// Mutable access to the value stored at `id`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).map(|node| &mut node.value)
    }

    /// The node linked before `id`.
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.prev)
    }

    /// The node linked after `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.next)
    }

    /// Iterate a chain from `head` following `next` links.
    pub const fn iter(&self, head: Option<NodeId>) -> Chain<'_, T> {
        Chain {
            arena: self,
            at: head,
        }
    }

    /// Splice `node` immediately before `reference`.
    ///
    /// Without a reference the node starts a chain of its own and becomes
    /// the head. Returns the head of the resulting chain.
    pub fn insert_before(
        &mut self,
        node: NodeId,
        reference: Option<NodeId>,
        head: Option<NodeId>,
    ) -> Option<NodeId> {
        let prev = reference.and_then(|r| self.prev(r));
        self.link(prev, Some(node));
        self.link(Some(node), reference);
        if prev.is_none() { Some(node) } else { head }
    }

    /// Splice `node` immediately after `reference`.
    ///
    /// Without a reference the node is pushed in front of `head`. Returns the
    /// head of the resulting chain.
    pub fn insert_after(
        &mut self,
        node: NodeId,
        reference: Option<NodeId>,
        head: Option<NodeId>,
    ) -> Option<NodeId> {
        let next = match reference {
            Some(r) => self.next(r),
            None => head,
        };
        self.link(Some(node), next);
        self.link(reference, Some(node));
        if reference.is_none() { Some(node) } else { head }
    }

    /// Take the node before `node` out of the chain.
    ///
    /// No-op when `node` is absent or has no predecessor.
    pub fn delete_prev(&mut self, node: Option<NodeId>, head: Option<NodeId>) -> Unlinked {
        let unchanged = Unlinked {
            head,
            removed: None,
        };
        let Some(node) = node else {
            return unchanged;
        };
        let Some(removed) = self.prev(node) else {
            return unchanged;
        };
        let before = self.prev(removed);
        self.link(before, Some(node));
        self.clear_links(removed);
        Unlinked {
            head: if before.is_none() { Some(node) } else { head },
            removed: Some(removed),
        }
    }

    /// Take the node after `node` out of the chain, or the head itself when
    /// `node` is absent.
    pub fn delete_next(&mut self, node: Option<NodeId>, head: Option<NodeId>) -> Unlinked {
        let (removed, new_head) = match node {
            Some(node) => match self.next(node) {
                Some(removed) => (removed, head),
                None => {
                    return Unlinked {
                        head,
                        removed: None,
                    };
                }
            },
            None => match head {
                Some(removed) => (removed, self.next(removed)),
                None => {
                    return Unlinked {
                        head: None,
                        removed: None,
                    };
                }
            },
        };
        let after = self.next(removed);
        self.link(node, after);
        self.clear_links(removed);
        Unlinked {
            head: new_head,
            removed: Some(removed),
        }
    }

    /// Take `node` out of its chain by joining its neighbours directly.
    ///
    /// Returns the head of the chain `node` was in.
    pub fn unlink(&mut self, node: NodeId, head: Option<NodeId>) -> Option<NodeId> {
        let prev = self.prev(node);
        let next = self.next(node);
        self.link(prev, next);
        self.clear_links(node);
        if head == Some(node) { next } else { head }
    }

    /// Make `right` follow `left`.
    ///
    /// Either side may be absent: `link(Some(a), None)` terminates a chain
    /// at `a`, `link(None, Some(b))` makes `b` a chain start. Nodes formerly
    /// adjacent to `left` or `right` are not updated.
    pub fn link(&mut self, left: Option<NodeId>, right: Option<NodeId>) {
        if let Some(node) = left.and_then(|id| self.node_mut(id)) {
            node.next = right;
        }
        if let Some(node) = right.and_then(|id| self.node_mut(id)) {
            node.prev = left;
        }
    }

    fn clear_links(&mut self, id: NodeId) {
        if let Some(node) = self.node_mut(id) {
            node.prev = None;
            node.next = None;
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }
}

/// Iterator over one chain of an [`Arena`], yielding handles with values.
pub struct Chain<'a, T> {
    arena: &'a Arena<T>,
    at: Option<NodeId>,
}

impl<T> Clone for Chain<'_, T> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            at: self.at,
        }
    }
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.at?;
        let node = self.arena.node(id)?;
        self.at = node.next;
        Some((id, &node.value))
    }
}

impl<T> std::fmt::Debug for Chain<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain").field("at", &self.at).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(arena: &Arena<char>, head: Option<NodeId>) -> String {
        arena.iter(head).map(|(_, ch)| *ch).collect()
    }

    /// Walk the chain checking both link directions.
    fn assert_well_linked(arena: &Arena<char>, head: Option<NodeId>) {
        if let Some(head) = head {
            assert_eq!(arena.prev(head), None, "head must not have a predecessor");
        }
        let mut prev = None;
        for (id, _) in arena.iter(head) {
            assert_eq!(arena.prev(id), prev);
            if let Some(p) = prev {
                assert_eq!(arena.next(p), Some(id));
            }
            prev = Some(id);
        }
    }

    fn build(arena: &mut Arena<char>, s: &str) -> (Option<NodeId>, Vec<NodeId>) {
        let mut head = None;
        let mut ids = Vec::new();
        for ch in s.chars() {
            let id = arena.alloc(ch);
            head = arena.insert_after(id, ids.last().copied(), head);
            ids.push(id);
        }
        (head, ids)
    }

    // --- Allocation ---

    #[test]
    fn test_alloc_and_get() {
        let mut arena = Arena::new();
        let id = arena.alloc('x');
        assert_eq!(arena.get(id), Some(&'x'));
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.prev(id), None);
        assert_eq!(arena.next(id), None);
    }

    #[test]
    fn test_remove_invalidates_handle() {
        let mut arena = Arena::new();
        let id = arena.alloc('x');
        assert_eq!(arena.remove(id), Some('x'));
        assert!(!arena.contains(id));
        assert!(arena.is_empty());
        assert_eq!(arena.remove(id), None);
    }

    #[test]
    fn test_reused_slot_rejects_stale_handle() {
        let mut arena = Arena::new();
        let old = arena.alloc('a');
        arena.remove(old);
        let new = arena.alloc('b');
        assert_eq!(old.index(), new.index());
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get(new), Some(&'b'));
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut arena = Arena::new();
        let id = arena.alloc('a');
        if let Some(value) = arena.get_mut(id) {
            *value = 'z';
        }
        assert_eq!(arena.get(id), Some(&'z'));
    }

    // --- insert_before ---

    #[test]
    fn test_insert_before_head_becomes_new_head() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "bc");
        let a = arena.alloc('a');
        let head = arena.insert_before(a, Some(ids[0]), head);
        assert_eq!(head, Some(a));
        assert_eq!(text(&arena, head), "abc");
        assert_well_linked(&arena, head);
    }

    #[test]
    fn test_insert_before_middle_keeps_head() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "ac");
        let b = arena.alloc('b');
        let new_head = arena.insert_before(b, Some(ids[1]), head);
        assert_eq!(new_head, head);
        assert_eq!(text(&arena, new_head), "abc");
        assert_well_linked(&arena, new_head);
    }

    #[test]
    fn test_insert_before_without_reference_starts_chain() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let head = arena.insert_before(a, None, None);
        assert_eq!(head, Some(a));
        assert_eq!(arena.next(a), None);
    }

    // --- insert_after ---

    #[test]
    fn test_insert_after_tail() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "ab");
        let c = arena.alloc('c');
        let head = arena.insert_after(c, Some(ids[1]), head);
        assert_eq!(text(&arena, head), "abc");
        assert_well_linked(&arena, head);
    }

    #[test]
    fn test_insert_after_without_reference_pushes_front() {
        let mut arena = Arena::new();
        let (head, _) = build(&mut arena, "bc");
        let a = arena.alloc('a');
        let head = arena.insert_after(a, None, head);
        assert_eq!(head, Some(a));
        assert_eq!(text(&arena, head), "abc");
        assert_well_linked(&arena, head);
    }

    // --- delete_prev ---

    #[test]
    fn test_delete_prev_middle() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "abc");
        let out = arena.delete_prev(Some(ids[2]), head);
        assert_eq!(out.removed, Some(ids[1]));
        assert_eq!(out.head, head);
        assert_eq!(text(&arena, out.head), "ac");
        assert_well_linked(&arena, out.head);
    }

    #[test]
    fn test_delete_prev_of_second_moves_head() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "ab");
        let out = arena.delete_prev(Some(ids[1]), head);
        assert_eq!(out.head, Some(ids[1]));
        assert_eq!(text(&arena, out.head), "b");
        assert_well_linked(&arena, out.head);
    }

    #[test]
    fn test_delete_prev_clears_removed_links() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "abc");
        let out = arena.delete_prev(Some(ids[2]), head);
        let removed = out.removed.unwrap();
        assert_eq!(arena.prev(removed), None);
        assert_eq!(arena.next(removed), None);
    }

    #[test]
    fn test_delete_prev_at_head_is_noop() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "ab");
        let out = arena.delete_prev(Some(ids[0]), head);
        assert_eq!(out.removed, None);
        assert_eq!(text(&arena, out.head), "ab");
        let out = arena.delete_prev(None, head);
        assert_eq!(out.removed, None);
        assert_eq!(out.head, head);
    }

    // --- delete_next ---

    #[test]
    fn test_delete_next_middle() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "abc");
        let out = arena.delete_next(Some(ids[0]), head);
        assert_eq!(out.removed, Some(ids[1]));
        assert_eq!(text(&arena, out.head), "ac");
        assert_well_linked(&arena, out.head);
    }

    #[test]
    fn test_delete_next_at_tail_is_noop() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "ab");
        let out = arena.delete_next(Some(ids[1]), head);
        assert_eq!(out.removed, None);
        assert_eq!(text(&arena, out.head), "ab");
    }

    #[test]
    fn test_delete_next_without_node_removes_head() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "abc");
        let out = arena.delete_next(None, head);
        assert_eq!(out.removed, Some(ids[0]));
        assert_eq!(out.head, Some(ids[1]));
        assert_eq!(text(&arena, out.head), "bc");
        assert_well_linked(&arena, out.head);
    }

    #[test]
    fn test_delete_next_on_empty_chain() {
        let mut arena: Arena<char> = Arena::new();
        let out = arena.delete_next(None, None);
        assert_eq!(
            out,
            Unlinked {
                head: None,
                removed: None
            }
        );
    }

    // --- unlink / link ---

    #[test]
    fn test_unlink_head_returns_successor() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "abc");
        let head = arena.unlink(ids[0], head);
        assert_eq!(head, Some(ids[1]));
        assert_eq!(text(&arena, head), "bc");
        assert_well_linked(&arena, head);
    }

    #[test]
    fn test_unlink_middle_joins_neighbours() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "abc");
        let head = arena.unlink(ids[1], head);
        assert_eq!(text(&arena, head), "ac");
        assert_well_linked(&arena, head);
    }

    #[test]
    fn test_link_splits_chain() {
        let mut arena = Arena::new();
        let (head, ids) = build(&mut arena, "abcd");
        arena.link(Some(ids[1]), None);
        arena.link(None, Some(ids[2]));
        assert_eq!(text(&arena, head), "ab");
        assert_eq!(text(&arena, Some(ids[2])), "cd");
        assert_well_linked(&arena, head);
        assert_well_linked(&arena, Some(ids[2]));
    }

    #[test]
    fn test_chain_is_restartable() {
        let mut arena = Arena::new();
        let (head, _) = build(&mut arena, "xyz");
        let chain = arena.iter(head);
        let first: String = chain.clone().map(|(_, ch)| *ch).collect();
        let second: String = chain.map(|(_, ch)| *ch).collect();
        assert_eq!(first, second);
    }
}
