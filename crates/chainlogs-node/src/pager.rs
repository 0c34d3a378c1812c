//! `LogPager`: a lazy, newest-first walk over an address's log history.
//!
//! Each query asks for `page_size` entries at the current offset. Every entry
//! of a page is handed out, in the order received, before the next query is
//! issued. The offset advances by `page_size` after every successful fetch,
//! whatever the page held. The walk ends at the first empty page; there is no
//! other stop condition unless a page cap is configured.

use chainlogs_core::{
    error::TransportError,
    event::RawLog,
    source::{LogSource, PageRequest},
};
use futures::stream::{self, Stream, TryStreamExt};
use thiserror::Error;

/// Entries requested per query.
pub const DEFAULT_PAGE_SIZE: u64 = 100;

/// Errors from the pager.
#[derive(Debug, Error)]
pub enum PagerError {
    #[error("log query at offset {offset} failed: {source}")]
    Fetch {
        offset: u64,
        #[source]
        source: TransportError,
    },
}

/// Single-use cursor over the logs of one address.
pub struct LogPager<S> {
    source: S,
    address: String,
    page_size: u64,
    max_pages: Option<u64>,
    offset: u64,
    pages_fetched: u64,
    done: bool,
}

impl<S: LogSource> LogPager<S> {
    /// Create a pager starting at offset 0. The address is passed through
    /// unvalidated; the node rejects malformed ones.
    pub fn new(source: S, address: impl Into<String>) -> Self {
        Self {
            source,
            address: address.into(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: None,
            offset: 0,
            pages_fetched: 0,
            done: false,
        }
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Stop after `max_pages` queries even if the node keeps returning data.
    /// `None` (the default) walks until the first empty page.
    pub fn with_max_pages(mut self, max_pages: Option<u64>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch the next page. `Ok(None)` once history is exhausted.
    ///
    /// A failed fetch ends the walk; the pager does not retry.
    pub async fn next_page(&mut self) -> Result<Option<Vec<RawLog>>, PagerError> {
        if self.done {
            return Ok(None);
        }
        if let Some(cap) = self.max_pages {
            if self.pages_fetched >= cap {
                tracing::warn!(
                    address = %self.address,
                    pages = self.pages_fetched,
                    "page cap reached before an empty page, stopping"
                );
                self.done = true;
                return Ok(None);
            }
        }

        let request = PageRequest::desc(self.offset, self.page_size);
        let page = match self.source.fetch_page(&self.address, &request).await {
            Ok(page) => page,
            Err(source) => {
                self.done = true;
                return Err(PagerError::Fetch {
                    offset: self.offset,
                    source,
                });
            }
        };

        tracing::debug!(
            address = %self.address,
            offset = self.offset,
            entries = page.len(),
            "fetched log page"
        );

        self.pages_fetched += 1;
        self.offset += self.page_size;

        if page.is_empty() {
            self.done = true;
            return Ok(None);
        }
        Ok(Some(page))
    }

    /// Lazily yield every entry, page after page.
    ///
    /// The stream ends after the empty page or after the first error.
    pub fn entries(&mut self) -> impl Stream<Item = Result<RawLog, PagerError>> + '_ {
        stream::try_unfold(self, |pager| async move {
            let next = pager.next_page().await?;
            Ok::<_, PagerError>(next.map(|page| {
                let entries = stream::iter(page.into_iter().map(Ok::<RawLog, PagerError>));
                (entries, pager)
            }))
        })
        .try_flatten()
    }

    /// Offset the next query will use.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Queries that returned successfully, the final empty one included.
    pub fn pages_fetched(&self) -> u64 {
        self.pages_fetched
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}
