use crate::Error;
use crate::Stats;
use options::{Options, ReadPolicy};
use parking_lot::Mutex;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;
use store::{Insertion, Store};
use tracing::{debug, trace, warn};

mod entry;
mod linked_slab;
pub(crate) mod options;
pub(crate) mod stats;
mod store;

pub(crate) type RandomState = ahash::RandomState;

/// Thread-safe, fixed-capacity cache with least recently used eviction.
///
/// Entries are kept in a recency list, most recently used first. Writing a key moves it to the
/// front; once a write pushes the cache past its capacity, the entry at the back is evicted. By
/// default reads do not count as a use, see [`ReadPolicy`].
///
/// A single mutex guards the whole cache for the duration of every operation, including eviction
/// and the [`crate::EvictionNotifier`] call. Wrap the cache in a [`std::sync::Arc`] to share it
/// between threads. Both reads and writes only require shared references to the cache.
pub struct Cache<K, V, S = RandomState> {
    store: Mutex<Store<K, V, S>>,
    options: Options<K, V>,
}

impl<K, V> Cache<K, V, RandomState>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache that holds at most `capacity` entries.
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Cache<K, V, RandomState>, Error> {
        Cache::new(capacity, Options::default())
    }

    /// Creates an empty cache that holds at most `capacity` entries, configured by `options`.
    ///
    /// Returns [`Error::ZeroCapacity`] if `capacity` is zero.
    pub fn new(
        capacity: usize,
        options: Options<K, V>,
    ) -> Result<Cache<K, V, RandomState>, Error> {
        Cache::with_options_and_hasher(capacity, options, Default::default())
    }
}

impl<K, V, S> Cache<K, V, S>
where
    K: Clone + Eq + Hash,
    V: Clone,
    S: BuildHasher,
{
    /// Creates an empty cache like [`Cache::new`], using `hash_builder` to hash the keys.
    pub fn with_options_and_hasher(
        capacity: usize,
        options: Options<K, V>,
        hash_builder: S,
    ) -> Result<Cache<K, V, S>, Error> {
        let Some(capacity) = NonZeroUsize::new(capacity) else {
            warn!(capacity, "rejecting cache without capacity");
            return Err(Error::ZeroCapacity);
        };

        Ok(Self {
            store: Mutex::new(Store::with_capacity_and_hasher(capacity, hash_builder)),
            options,
        })
    }

    /// Inserts a key-value pair and makes it the most recently used entry.
    ///
    /// Returns `true` if the key was not present. If the insert pushes the cache past its
    /// capacity, the least recently used entry is evicted and handed to the eviction notifier
    /// before this method returns.
    ///
    /// Returns `false` if the key was present. Its value is replaced and no entry is evicted.
    pub fn set(&self, key: K, value: V) -> bool {
        let mut store = self.store.lock();

        let inserted = match store.set(key, value) {
            Insertion::Updated => false,
            Insertion::Inserted { evicted } => {
                if let Some((key, value)) = evicted {
                    trace!(
                        len = store.len(),
                        capacity = store.capacity(),
                        "evicted least recently used entry"
                    );

                    if let Some(notifier) = &self.options.notifier {
                        notifier.on_evict(key, value);
                    }
                }
                true
            }
        };

        if let Some(describe) = self.options.describe {
            debug!(inserted, order = %store.render(describe), "entry set");
        }

        inserted
    }

    /// Returns the value corresponding to the key.
    ///
    /// With the default [`ReadPolicy::Peek`] the recency order is left untouched, hit or miss.
    ///
    /// This method clones the value when returning the item. Consider wrapping your values in
    /// [`std::sync::Arc`] if cloning is too expensive for you use-case.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut store = self.store.lock();

        let value = match self.options.read_policy {
            ReadPolicy::Peek => store.get(key),
            ReadPolicy::Promote => store.get_and_promote(key),
        };

        value.cloned()
    }

    /// Returns the resident keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.store.lock().keys().cloned().collect()
    }
}

impl<K, V, S> Cache<K, V, S> {
    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    /// Returns the counters collected since the last call and resets them.
    pub fn stats(&self) -> Stats {
        self.store.lock().take_stats()
    }
}

impl<K, V, S> fmt::Debug for Cache<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.store.lock();
        f.debug_struct("Cache")
            .field("capacity", &store.capacity())
            .field("len", &store.len())
            .field("options", &self.options)
            .finish()
    }
}
