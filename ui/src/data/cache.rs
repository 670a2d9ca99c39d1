//! In-memory response cache keyed by request URL.
//!
//! Entries live for the whole session unless an [`EvictionPolicy`] says
//! otherwise. Insertion order is kept so bounded policies drop the oldest
//! entry first.

use std::rc::Rc;

use indexmap::IndexMap;

use super::model::LoadedDataset;

/// Decides how many of the oldest entries to drop after an insert.
pub trait EvictionPolicy {
    fn overflow(&self, len: usize) -> usize;
}

/// Default policy: the cache only grows.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverEvict;

impl EvictionPolicy for NeverEvict {
    fn overflow(&self, _len: usize) -> usize {
        0
    }
}

/// Keeps at most `n` entries.
#[derive(Debug, Clone, Copy)]
pub struct MaxEntries(pub usize);

impl EvictionPolicy for MaxEntries {
    fn overflow(&self, len: usize) -> usize {
        len.saturating_sub(self.0)
    }
}

pub struct ResponseCache {
    entries: IndexMap<String, Rc<LoadedDataset>>,
    policy: Box<dyn EvictionPolicy>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::with_policy(NeverEvict)
    }

    pub fn with_policy(policy: impl EvictionPolicy + 'static) -> Self {
        Self {
            entries: IndexMap::new(),
            policy: Box::new(policy),
        }
    }

    pub fn get(&self, url: &str) -> Option<Rc<LoadedDataset>> {
        self.entries.get(url).cloned()
    }

    /// Stores the entry unless the URL is already cached; the first resolved
    /// response for a URL is the one that is kept.
    pub fn insert(&mut self, url: &str, entry: Rc<LoadedDataset>) -> Rc<LoadedDataset> {
        if let Some(existing) = self.entries.get(url) {
            return existing.clone();
        }
        self.entries.insert(url.to_string(), entry.clone());

        let overflow = self.policy.overflow(self.entries.len());
        for _ in 0..overflow {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                tracing::debug!(url = %evicted, "evicted cached dataset");
            }
        }
        entry
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("urls", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;

    fn entry(title: &str) -> Rc<LoadedDataset> {
        Rc::new(LoadedDataset::new(Dataset {
            title: title.into(),
            ..Dataset::default()
        }))
    }

    #[test]
    fn default_cache_never_evicts() {
        let mut cache = ResponseCache::new();
        for i in 0..50 {
            cache.insert(&format!("https://example.test/{i}.json"), entry("x"));
        }
        assert_eq!(cache.len(), 50);
    }

    #[test]
    fn first_entry_for_url_is_kept() {
        let mut cache = ResponseCache::new();
        cache.insert("a", entry("first"));
        let kept = cache.insert("a", entry("second"));
        assert_eq!(kept.raw.title, "first");
        assert_eq!(cache.get("a").unwrap().raw.title, "first");
    }

    #[test]
    fn bounded_policy_drops_oldest() {
        let mut cache = ResponseCache::with_policy(MaxEntries(2));
        cache.insert("a", entry("a"));
        cache.insert("b", entry("b"));
        cache.insert("c", entry("c"));
        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }
}
