//! Per-run topic → event description memo.
//!
//! Constructed at the start of a scan and dropped with it; nothing is shared
//! between runs.

use std::collections::HashMap;
use std::sync::Arc;

use chainlogs_core::abi::EventAbi;

/// What the cache knows about one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEntry {
    /// The registry returned a description.
    Resolved(Arc<EventAbi>),
    /// The registry had no candidate. Only stored under `MissPolicy::Remember`.
    Missing,
}

/// Topic hash (lowercase hex) → cache entry.
#[derive(Debug, Default)]
pub struct TopicCache {
    entries: HashMap<String, CacheEntry>,
}

impl TopicCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalised cache key for a topic hash.
    pub fn key(topic: &str) -> String {
        topic.to_ascii_lowercase()
    }

    pub fn get(&self, topic: &str) -> Option<&CacheEntry> {
        self.entries.get(&Self::key(topic))
    }

    /// Remember a resolved description; returns the shared handle.
    pub fn insert_resolved(&mut self, topic: &str, abi: EventAbi) -> Arc<EventAbi> {
        let abi = Arc::new(abi);
        self.entries
            .insert(Self::key(topic), CacheEntry::Resolved(Arc::clone(&abi)));
        abi
    }

    pub fn insert_missing(&mut self, topic: &str) {
        self.entries.insert(Self::key(topic), CacheEntry::Missing);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of topics cached as resolved.
    pub fn resolved_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| matches!(e, CacheEntry::Resolved(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abi(name: &str) -> EventAbi {
        EventAbi {
            name: name.into(),
            inputs: vec![],
            anonymous: false,
        }
    }

    #[test]
    fn keys_are_case_insensitive() {
        let mut cache = TopicCache::new();
        cache.insert_resolved("0xDDF252AD", abi("Transfer"));
        assert!(matches!(cache.get("0xddf252ad"), Some(CacheEntry::Resolved(_))));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn resolved_and_missing_counted_separately() {
        let mut cache = TopicCache::new();
        cache.insert_resolved("0x01", abi("A"));
        cache.insert_missing("0x02");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.resolved_count(), 1);
        assert_eq!(cache.get("0x02"), Some(&CacheEntry::Missing));
    }
}
