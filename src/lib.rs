//! # sqltunnel
//!
//! Server side of a binary SQL tunnel protocol backed by SQLite.
//!
//! A remote database client issues SQL over a transport it does not
//! directly control (typically an HTTP tunnel). The transport hands this
//! crate the action code and query payload, and gets back a single
//! opaque response buffer in the protocol's fixed wire format.
//!
//! ## Architecture
//!
//! - **Protocol** ([`protocol`]): 16-byte response header, length-framed
//!   blocks, result-set/connection-info/error payload builders
//! - **Codecs** ([`codec`]): plain and base64 statement decoding
//! - **Engine** ([`engine`]): the embedded SQLite collaborator
//! - **Dispatch** ([`process`]): opens the database, interprets the
//!   action code, executes the statement batch, assembles the response
//!
//! ## Example
//!
//! ```no_run
//! use sqltunnel::process;
//!
//! let response = process("/data/app.db", "Q", "SELECT 1", false).unwrap();
//! // `response` is the complete wire buffer for the transport to relay.
//! ```

pub mod codec;
pub mod engine;
pub mod error;
pub mod protocol;
pub mod value;

mod dispatch;

pub use dispatch::{process, ACTION_CONNECTION_INFO, ACTION_QUERY, UNSUPPORTED_ACTION_MESSAGE};
pub use error::TunnelError;
pub use value::Value;
