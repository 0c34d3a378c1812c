//! chainlogs-node: walks an address's event-log history one page at a time.
//!
//! - [`LogPager`]: newest-first paging over any `LogSource`, stops at the
//!   first empty page
//! - [`ThorNodeClient`]: `LogSource` for a VeChainThor node's
//!   `POST /logs/event` endpoint

pub mod client;
pub mod pager;

pub use client::{ThorNodeClient, DEFAULT_NODE_URL};
pub use pager::{LogPager, PagerError, DEFAULT_PAGE_SIZE};
