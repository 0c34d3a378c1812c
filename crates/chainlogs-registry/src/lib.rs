//! # chainlogs-registry
//!
//! Resolves a log's discriminator topic to the event description needed to
//! decode it.
//!
//! ## Layers
//! 1. **`TopicCache`**: per-run memo of topic → description
//! 2. **`SignatureResolver`**: pull-through cache over any `SignatureSource`
//! 3. **`SigRegistryClient`**: HTTP `SignatureSource` for the public
//!    signature registry (feature `remote`)

pub mod cache;
#[cfg(feature = "remote")]
pub mod remote;
pub mod resolver;

pub use cache::{CacheEntry, TopicCache};
pub use resolver::{MissPolicy, ResolveError, SignatureResolver};

#[cfg(feature = "remote")]
pub use remote::{SigRegistryClient, DEFAULT_REGISTRY_URL};
