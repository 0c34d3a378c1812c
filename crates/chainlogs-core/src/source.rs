//! The two external endpoints the pipeline consumes, as async traits.
//!
//! HTTP implementations live in `chainlogs-node` and `chainlogs-registry`;
//! tests plug in in-memory sources.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::abi::SignatureRecord;
use crate::error::TransportError;
use crate::event::RawLog;

/// Chronological ordering of a log query. The walk is always newest-first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Desc,
}

/// One page of a log query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
    pub order: Order,
}

impl PageRequest {
    /// Newest-first page at `offset`.
    pub fn desc(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit,
            order: Order::Desc,
        }
    }
}

/// A ledger node able to list the event logs of one address.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Fetch one page. An empty page marks the end of history.
    async fn fetch_page(
        &self,
        address: &str,
        page: &PageRequest,
    ) -> Result<Vec<RawLog>, TransportError>;

    /// Endpoint identifier (URL or name), for diagnostics.
    fn url(&self) -> &str;
}

/// A registry mapping topic hashes back to event descriptions.
#[async_trait]
pub trait SignatureSource: Send + Sync {
    /// All candidate event descriptions for `topic`, registry order.
    async fn lookup_event(&self, topic: &str) -> Result<Vec<SignatureRecord>, TransportError>;

    /// Endpoint identifier (URL or name), for diagnostics.
    fn url(&self) -> &str;
}

#[async_trait]
impl<'a, T: LogSource + ?Sized> LogSource for &'a T {
    async fn fetch_page(
        &self,
        address: &str,
        page: &PageRequest,
    ) -> Result<Vec<RawLog>, TransportError> {
        (**self).fetch_page(address, page).await
    }

    fn url(&self) -> &str {
        (**self).url()
    }
}

#[async_trait]
impl<T: LogSource + ?Sized> LogSource for std::sync::Arc<T> {
    async fn fetch_page(
        &self,
        address: &str,
        page: &PageRequest,
    ) -> Result<Vec<RawLog>, TransportError> {
        (**self).fetch_page(address, page).await
    }

    fn url(&self) -> &str {
        (**self).url()
    }
}

#[async_trait]
impl<'a, T: SignatureSource + ?Sized> SignatureSource for &'a T {
    async fn lookup_event(&self, topic: &str) -> Result<Vec<SignatureRecord>, TransportError> {
        (**self).lookup_event(topic).await
    }

    fn url(&self) -> &str {
        (**self).url()
    }
}

#[async_trait]
impl<T: SignatureSource + ?Sized> SignatureSource for std::sync::Arc<T> {
    async fn lookup_event(&self, topic: &str) -> Result<Vec<SignatureRecord>, TransportError> {
        (**self).lookup_event(topic).await
    }

    fn url(&self) -> &str {
        (**self).url()
    }
}
