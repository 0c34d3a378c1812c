//! `SignatureResolver`: pull-through cache over a `SignatureSource`.

use std::sync::Arc;

use chainlogs_core::{abi::EventAbi, error::TransportError, source::SignatureSource};
use thiserror::Error;

use crate::cache::{CacheEntry, TopicCache};

/// Errors from the resolver. An unknown topic is not one of them.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("signature lookup for topic {topic} failed: {source}")]
    Lookup {
        topic: String,
        #[source]
        source: TransportError,
    },
}

/// What to do when the registry has no candidate for a topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissPolicy {
    /// Do not cache the miss; the next occurrence queries the registry again.
    #[default]
    Requery,
    /// Cache the miss: once absent, always absent for this run.
    Remember,
}

/// Resolves topic hashes to event descriptions, at most one registry
/// request per distinct topic (per miss under `MissPolicy::Requery`).
///
/// Owned by a single sequential scan, so `resolve` takes `&mut self` and no
/// locking is involved.
pub struct SignatureResolver<S> {
    source: S,
    cache: TopicCache,
    policy: MissPolicy,
    lookups: u64,
}

impl<S: SignatureSource> SignatureResolver<S> {
    /// Create a resolver with an empty cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: TopicCache::new(),
            policy: MissPolicy::default(),
            lookups: 0,
        }
    }

    pub fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolve `topic`, returning `None` if the registry knows no event for it.
    ///
    /// With several candidates the first one in registry order wins; no
    /// attempt is made to match them against the log's shape.
    pub async fn resolve(&mut self, topic: &str) -> Result<Option<Arc<EventAbi>>, ResolveError> {
        match self.cache.get(topic) {
            Some(CacheEntry::Resolved(abi)) => return Ok(Some(Arc::clone(abi))),
            Some(CacheEntry::Missing) => return Ok(None),
            None => {}
        }

        self.lookups += 1;
        let candidates = self
            .source
            .lookup_event(topic)
            .await
            .map_err(|source| ResolveError::Lookup {
                topic: topic.to_string(),
                source,
            })?;

        if candidates.len() > 1 {
            tracing::debug!(
                topic,
                candidates = candidates.len(),
                "multiple signatures for topic, taking the first"
            );
        }

        match candidates.into_iter().next() {
            Some(record) => {
                tracing::debug!(topic, event = %record.abi.name, "resolved signature");
                Ok(Some(self.cache.insert_resolved(topic, record.abi)))
            }
            None => {
                tracing::warn!(topic, "No signature found for topic");
                if self.policy == MissPolicy::Remember {
                    self.cache.insert_missing(topic);
                }
                Ok(None)
            }
        }
    }

    /// Registry requests issued so far.
    pub fn lookups(&self) -> u64 {
        self.lookups
    }

    pub fn cache(&self) -> &TopicCache {
        &self.cache
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
