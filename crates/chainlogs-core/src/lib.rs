//! # chainlogs-core
//!
//! Core types, traits, and errors shared across all ChainLogs crates.
//! The pager, the signature resolver, the decoder and the scan loop are all
//! built on top of the interfaces defined here.

pub mod abi;
pub mod error;
pub mod event;
pub mod source;
pub mod types;

pub use abi::{EventAbi, EventParam, SignatureRecord};
pub use error::{DecodeError, TransportError};
pub use event::{DecodedEvent, DecodedField, LogMeta, RawLog};
pub use source::{LogSource, Order, PageRequest, SignatureSource};
pub use types::{FieldValue, ParamType};
