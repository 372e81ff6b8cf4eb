/// A cached value tagged with the key it was computed from.
///
/// `get_or_compute` recomputes when the cache was invalidated or the key
/// changed; otherwise it hands back the stored value.
#[derive(Debug, Clone)]
pub struct Memoized<K, V> {
    entry: Option<(K, V)>,
}

impl<K: PartialEq, V> Memoized<K, V> {
    pub fn new() -> Self {
        Self { entry: None }
    }

    /// Drop the cached value so the next access recomputes.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_fresh(&self, key: &K) -> bool {
        matches!(&self.entry, Some((k, _)) if k == key)
    }

    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if !self.is_fresh(&key) {
            self.entry = None;
        }
        let (_, value) = self.entry.get_or_insert_with(|| (key, compute()));
        value
    }
}

impl<K: PartialEq, V> Default for Memoized<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
