/// A resident key-value pair. Its slot in the recency list is tracked by the store's index.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    pub(crate) fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}
