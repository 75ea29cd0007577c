use crate::cache::RandomState;
use crate::cache::entry::Entry;
use crate::cache::linked_slab::LinkedSlab;
use crate::cache::stats::{Counters, Stats};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;

/// Outcome of [`Store::set`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Insertion<K, V> {
    /// The key was resident. Its value was replaced and it became the most recently used entry.
    Updated,
    /// The key was new. If the insert overflowed the capacity, the least recently used entry was
    /// evicted and is handed back.
    Inserted { evicted: Option<(K, V)> },
}

/// Recency list plus key index. Not synchronized, the cache wraps it in a mutex.
#[derive(Debug)]
pub(crate) struct Store<K, V, S = RandomState> {
    capacity: NonZeroUsize,
    index: HashMap<K, usize, S>,
    order: LinkedSlab<Entry<K, V>>,
    counters: Counters,
}

impl<K, V, S> Store<K, V, S> {
    pub(crate) fn with_capacity_and_hasher(capacity: NonZeroUsize, hash_builder: S) -> Self {
        Self {
            capacity,
            index: HashMap::with_capacity_and_hasher(capacity.get(), hash_builder),
            order: LinkedSlab::with_capacity(capacity.get()),
            counters: Counters::default(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity.get()
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys from most to least recently used.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(Entry::key)
    }

    /// Renders the recency list as `[k=v, ...]`, most recently used first.
    pub(crate) fn render(&self, describe: fn(&K, &V) -> String) -> String {
        let entries: Vec<String> = self
            .order
            .iter()
            .map(|entry| describe(entry.key(), entry.value()))
            .collect();

        format!("[{}]", entries.join(", "))
    }

    pub(crate) fn take_stats(&mut self) -> Stats {
        self.counters.take()
    }
}

impl<K, V, S> Store<K, V, S>
where
    K: Clone + Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn set(&mut self, key: K, value: V) -> Insertion<K, V> {
        if let Some(&slot) = self.index.get(&key) {
            if let Some(entry) = self.order.get_mut(slot) {
                entry.replace_value(value);
            }
            self.order.move_to_front(slot);

            return Insertion::Updated;
        }

        let slot = self.order.push_front(Entry::new(key.clone(), value));
        self.index.insert(key, slot);

        let evicted = if self.order.len() > self.capacity.get() {
            self.evict()
        } else {
            None
        };

        Insertion::Inserted { evicted }
    }

    /// Looks up a value without touching the recency order.
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let value = self
            .index
            .get(key)
            .and_then(|slot| self.order.get(*slot))
            .map(Entry::value);

        self.counters.record_lookup(value.is_some());

        value
    }

    /// Looks up a value and makes it the most recently used entry.
    pub(crate) fn get_and_promote<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.index.get(key).copied();
        self.counters.record_lookup(slot.is_some());

        let slot = slot?;
        self.order.move_to_front(slot);
        self.order.get(slot).map(Entry::value)
    }

    /// Removes the least recently used entry from both the list and the index.
    fn evict(&mut self) -> Option<(K, V)> {
        let entry = self.order.pop_back()?;
        self.index.remove(entry.key());
        self.counters.record_eviction();

        Some(entry.into_parts())
    }
}
