//! Codec module - statement decoding for query payloads.
//!
//! This module provides codecs for decoding statements before execution:
//!
//! - [`PlainCodec`] - Pass-through for plain-text statements (zero-copy)
//! - [`Base64Codec`] - Base64-encoded statements (STANDARD alphabet)
//!
//! # Design
//!
//! Codecs are implemented as marker structs with static methods rather than trait objects.
//! The request-level encoding flag selects which codec the dispatcher applies.
//!
//! # Example
//!
//! ```
//! use sqltunnel::codec::{Base64Codec, PlainCodec};
//!
//! assert_eq!(PlainCodec::decode("SELECT 1"), "SELECT 1");
//! assert_eq!(Base64Codec::decode("U0VMRUNUIDE=").unwrap(), "SELECT 1");
//! ```

mod base64;
mod plain;

pub use self::base64::Base64Codec;
pub use plain::PlainCodec;
