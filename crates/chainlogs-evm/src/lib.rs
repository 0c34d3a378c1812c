//! # chainlogs-evm
//!
//! Decodes raw event logs against an event description.
//!
//! ## Implementation notes
//! - Uses `alloy-core` dynamic ABI for the word-level decoding
//! - topics[0] → event discriminator (skipped for anonymous events)
//! - topics[1..] → indexed parameters, one 32-byte word each
//! - `data` → non-indexed parameters, ABI-encoded as a parameter sequence

pub mod decoder;
pub mod encoder;
pub mod normalizer;

pub use decoder::EventDecoder;
pub use encoder::EventEncoder;
