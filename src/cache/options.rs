use std::fmt;

/// Observer that is told about every entry the cache evicts.
///
/// The notifier runs synchronously while the cache lock is held, so it blocks all other cache
/// operations until it returns. It must not call back into the cache that invoked it: the lock is
/// not reentrant and doing so deadlocks.
///
/// Any `Fn(K, V) + Send + Sync` closure is a notifier.
pub trait EvictionNotifier<K, V>: Send + Sync {
    fn on_evict(&self, key: K, value: V);
}

impl<K, V, F> EvictionNotifier<K, V> for F
where
    F: Fn(K, V) + Send + Sync,
{
    fn on_evict(&self, key: K, value: V) {
        self(key, value)
    }
}

/// Whether reads count as a use for eviction purposes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum ReadPolicy {
    /// [`crate::Cache::get`] leaves the recency order untouched. Only writes promote an entry.
    #[default]
    Peek,
    /// [`crate::Cache::get`] promotes a hit to most recently used, like a textbook LRU.
    Promote,
}

/// Construction options for a [`crate::Cache`].
///
/// ```rust
/// use plain_lru::{Cache, Options, ReadPolicy};
///
/// let options = Options::<&str, u32>::default()
///     .read_policy(ReadPolicy::Promote)
///     .eviction_notifier(|key: &str, value: u32| println!("evicted {key}={value}"));
///
/// let cache = Cache::new(2, options).unwrap();
/// assert!(cache.set("a", 1));
/// ```
pub struct Options<K, V> {
    pub(crate) describe: Option<fn(&K, &V) -> String>,
    pub(crate) notifier: Option<Box<dyn EvictionNotifier<K, V>>>,
    pub(crate) read_policy: ReadPolicy,
}

impl<K, V> Default for Options<K, V> {
    fn default() -> Self {
        Self {
            describe: None,
            notifier: None,
            read_policy: ReadPolicy::default(),
        }
    }
}

impl<K, V> Options<K, V> {
    /// Calls `notifier` with the key and value of every evicted entry.
    pub fn eviction_notifier<N>(mut self, notifier: N) -> Self
    where
        N: EvictionNotifier<K, V> + 'static,
    {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn read_policy(mut self, read_policy: ReadPolicy) -> Self {
        self.read_policy = read_policy;
        self
    }
}

impl<K, V> Options<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    /// Emits a `debug` event with the full recency order after every write.
    ///
    /// This walks the whole cache on each write and is meant for debugging only.
    pub fn enable_diagnostic_logging(mut self) -> Self {
        self.describe = Some(|key: &K, value: &V| format!("{key:?}={value:?}"));
        self
    }
}

impl<K, V> fmt::Debug for Options<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("diagnostic_logging", &self.describe.is_some())
            .field("eviction_notifier", &self.notifier.is_some())
            .field("read_policy", &self.read_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn it_defaults_to_peek_without_notifier_or_logging() {
        // when
        let options: Options<String, u32> = Options::default();

        // then
        assert_eq!(options.read_policy, ReadPolicy::Peek);
        assert!(options.notifier.is_none());
        assert!(options.describe.is_none());
    }

    #[test]
    fn it_wraps_closures_as_notifiers() {
        // given
        let evicted = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&evicted);
        let options: Options<String, u32> = Options::default().eviction_notifier(
            move |key: String, value: u32| sink.lock().unwrap().push((key, value)),
        );

        // when
        if let Some(notifier) = &options.notifier {
            notifier.on_evict(String::from("a"), 1);
        }

        // then
        assert_eq!(*evicted.lock().unwrap(), vec![(String::from("a"), 1)]);
    }

    #[test]
    fn it_describes_entries_with_debug_formatting() {
        // given
        let options: Options<&str, u32> = Options::default().enable_diagnostic_logging();

        // when
        let described = options.describe.map(|describe| describe(&"a", &1));

        // then
        assert_eq!(described.as_deref(), Some("\"a\"=1"));
    }

    #[test]
    fn it_prints_flags_in_debug_output() {
        // given
        let options: Options<&str, u32> = Options::default().read_policy(ReadPolicy::Promote);

        // when
        let debug = format!("{options:?}");

        // then
        assert_eq!(
            debug,
            "Options { diagnostic_logging: false, eviction_notifier: false, read_policy: Promote }"
        );
    }
}
