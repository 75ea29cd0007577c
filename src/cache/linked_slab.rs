/// Doubly linked list stored in a slab of slots.
///
/// Nodes are addressed by their slot index, which stays stable for as long as the node is linked.
/// Vacated slots are chained into a free list and reused by later pushes, so the slab never grows
/// beyond the largest number of nodes it held at once.
#[derive(Debug)]
pub(crate) struct LinkedSlab<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    free: Option<usize>,
    len: usize,
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

impl<T> LinkedSlab<T> {
    pub(crate) fn with_capacity(capacity: usize) -> LinkedSlab<T> {
        LinkedSlab {
            slots: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn get(&self, slot: usize) -> Option<&T> {
        self.node(slot).map(|node| &node.value)
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.node_mut(slot).map(|node| &mut node.value)
    }

    /// Links a new node in front of the current head and returns its slot.
    pub(crate) fn push_front(&mut self, value: T) -> usize {
        let node = Node {
            value,
            prev: None,
            next: self.head,
        };

        let slot = match self.free {
            Some(slot) => {
                if let Slot::Vacant { next_free } = self.slots[slot] {
                    self.free = next_free;
                }
                self.slots[slot] = Slot::Occupied(node);
                slot
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                self.slots.len() - 1
            }
        };

        match self.head {
            Some(old_head) => self.set_prev(old_head, Some(slot)),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
        self.len += 1;

        slot
    }

    /// Moves a linked node to the front. Vacant or unknown slots are ignored.
    pub(crate) fn move_to_front(&mut self, slot: usize) {
        if self.head == Some(slot) || self.node(slot).is_none() {
            return;
        }

        self.unlink(slot);

        // head       tail
        //  |          |
        // [A] <-> [B] <-> [C]      move_to_front(C)
        //
        // head       tail
        //  |          |
        // [C] <-> [A] <-> [B]
        let old_head = self.head;
        if let Some(node) = self.node_mut(slot) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.set_prev(old_head, Some(slot)),
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    /// Unlinks the node at `slot` and returns its value.
    ///
    /// If the slot is vacant or out of range, [None] is returned and nothing changes.
    pub(crate) fn remove(&mut self, slot: usize) -> Option<T> {
        self.node(slot)?;

        self.unlink(slot);

        let vacated = std::mem::replace(
            &mut self.slots[slot],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        self.free = Some(slot);
        self.len -= 1;

        match vacated {
            Slot::Occupied(node) => Some(node.value),
            Slot::Vacant { .. } => None,
        }
    }

    /// Unlinks the tail node and returns its value.
    ///
    /// If the list is empty, [None] is returned.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Iterates the linked values from head to tail.
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            slab: self,
            cursor: self.head,
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = match self.node(slot) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev) => self.set_next(prev, next),
            None => self.head = next,
        }
        match next {
            Some(next) => self.set_prev(next, prev),
            None => self.tail = prev,
        }
    }

    fn set_prev(&mut self, slot: usize, prev: Option<usize>) {
        if let Some(node) = self.node_mut(slot) {
            node.prev = prev;
        }
    }

    fn set_next(&mut self, slot: usize, next: Option<usize>) {
        if let Some(node) = self.node_mut(slot) {
            node.next = next;
        }
    }

    fn node(&self, slot: usize) -> Option<&Node<T>> {
        match self.slots.get(slot)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }

    fn node_mut(&mut self, slot: usize) -> Option<&mut Node<T>> {
        match self.slots.get_mut(slot)? {
            Slot::Occupied(node) => Some(node),
            Slot::Vacant { .. } => None,
        }
    }
}

pub(crate) struct Iter<'a, T> {
    slab: &'a LinkedSlab<T>,
    cursor: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.slab.node(self.cursor?)?;
        self.cursor = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use crate::cache::linked_slab::LinkedSlab;

    fn collect(slab: &LinkedSlab<&'static str>) -> Vec<&'static str> {
        slab.iter().copied().collect()
    }

    #[test]
    fn it_is_empty() {
        // given
        let mut slab = LinkedSlab::with_capacity(1);

        // when
        slab.push_front("first");
        slab.pop_back();

        // then
        assert!(slab.is_empty());
        assert_eq!(slab.len(), 0);
        assert_eq!(slab.head, None);
        assert_eq!(slab.tail, None);
    }

    #[test]
    fn it_pushes_to_the_front() {
        // given
        let mut slab = LinkedSlab::with_capacity(3);

        // when
        slab.push_front("first");
        slab.push_front("second");
        slab.push_front("third");

        // then
        assert_eq!(collect(&slab), vec!["third", "second", "first"]);
        assert_eq!(slab.len(), 3);
    }

    #[test]
    fn it_pops_from_the_back() {
        // given
        let mut slab = LinkedSlab::with_capacity(3);
        slab.push_front("first");
        slab.push_front("second");

        // when
        let popped = slab.pop_back();

        // then
        assert_eq!(popped, Some("first"));
        assert_eq!(collect(&slab), vec!["second"]);
        assert_eq!(slab.head, slab.tail);
    }

    #[test]
    fn it_returns_none_when_popping_an_empty_slab() {
        // given
        let mut slab: LinkedSlab<&str> = LinkedSlab::with_capacity(0);

        // when
        let popped = slab.pop_back();

        // then
        assert_eq!(popped, None);
        assert!(slab.is_empty());
    }

    #[test]
    fn it_moves_the_tail_to_the_front() {
        // given
        let mut slab = LinkedSlab::with_capacity(3);
        let first = slab.push_front("first");
        slab.push_front("second");
        slab.push_front("third");

        // when
        slab.move_to_front(first);

        // then
        assert_eq!(collect(&slab), vec!["first", "third", "second"]);
        assert_eq!(slab.pop_back(), Some("second"));
    }

    #[test]
    fn it_moves_a_middle_node_to_the_front() {
        // given
        let mut slab = LinkedSlab::with_capacity(3);
        slab.push_front("first");
        let second = slab.push_front("second");
        slab.push_front("third");

        // when
        slab.move_to_front(second);

        // then
        assert_eq!(collect(&slab), vec!["second", "third", "first"]);
    }

    #[test]
    fn it_ignores_moving_the_head_or_a_vacant_slot() {
        // given
        let mut slab = LinkedSlab::with_capacity(2);
        let first = slab.push_front("first");
        let second = slab.push_front("second");
        slab.remove(first);

        // when
        slab.move_to_front(second);
        slab.move_to_front(first);
        slab.move_to_front(42);

        // then
        assert_eq!(collect(&slab), vec!["second"]);
    }

    #[test]
    fn it_reuses_vacated_slots() {
        // given
        let mut slab = LinkedSlab::with_capacity(2);
        slab.push_front("first");
        slab.push_front("second");
        slab.pop_back();

        // when
        let slot = slab.push_front("third");

        // then
        assert_eq!(slot, 0);
        assert_eq!(slab.slots.len(), 2);
        assert_eq!(collect(&slab), vec!["third", "second"]);
    }

    #[test]
    fn it_returns_none_when_removing_a_vacant_slot() {
        // given
        let mut slab = LinkedSlab::with_capacity(1);
        let slot = slab.push_front("first");
        slab.remove(slot);

        // when
        let removed = slab.remove(slot);

        // then
        assert_eq!(removed, None);
        assert_eq!(slab.len(), 0);
    }

    #[test]
    fn it_gives_mutable_access_by_slot() {
        // given
        let mut slab = LinkedSlab::with_capacity(1);
        let slot = slab.push_front(String::from("hello"));

        // when
        if let Some(value) = slab.get_mut(slot) {
            value.push_str(" world");
        }

        // then
        assert_eq!(slab.get(slot).map(String::as_str), Some("hello world"));
    }
}
