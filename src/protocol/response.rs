//! Response payload builders.
//!
//! Everything after the fixed header is built here: the connection-info
//! payload, per-statement result-set segments, and the single-block
//! error response. Builders append to a shared `BytesMut`; the complete
//! response is frozen once and handed to the transport as one buffer.

use bytes::{Bytes, BytesMut};

use super::block::put_block;
use super::wire::{put_padding, put_u32, Header, HEADER_SIZE};
use crate::error::Result;
use crate::value::{Value, TYPE_TAG_NULL};

/// Result-set header size in bytes (five u32 fields + 12 padding).
pub const RESULT_SET_HEADER_SIZE: usize = 32;

/// Wire byte for a null value: no block, no type tag follows.
pub const NULL_VALUE_MARKER: u8 = 0xFF;

/// Continuation flag: more result-set segments follow.
pub const CONTINUATION_MORE: u8 = 0x01;

/// Continuation flag: this was the last segment.
pub const CONTINUATION_LAST: u8 = 0x00;

/// Append the connection-info payload.
///
/// The protocol reports three distinct version identifiers; SQLite
/// exposes a single version string, so all three carry the same value.
pub fn put_connection_info(buf: &mut BytesMut, version: &str) -> Result<()> {
    for _ in 0..3 {
        put_block(buf, version.as_bytes())?;
    }
    Ok(())
}

/// Append a per-statement result-set header.
///
/// Errno 0 means the statement succeeded; nonzero marks this statement
/// as failed independently of the top-level response header.
pub fn put_result_set_header(
    buf: &mut BytesMut,
    errno: u32,
    affected_rows: u32,
    insert_id: u32,
    num_fields: u32,
    num_rows: u32,
) {
    put_u32(buf, errno);
    put_u32(buf, affected_rows);
    put_u32(buf, insert_id);
    put_u32(buf, num_fields);
    put_u32(buf, num_rows);
    put_padding(buf, 12);
}

/// Append one field descriptor per column.
///
/// The engine exposes no static column types, so the declared type code
/// is fixed to null/unknown and the alias block is always empty.
pub fn put_fields_header(buf: &mut BytesMut, names: &[String]) -> Result<()> {
    for name in names {
        put_block(buf, name.as_bytes())?;
        put_block(buf, b"")?;
        put_u32(buf, TYPE_TAG_NULL);
        put_u32(buf, 0);
        put_u32(buf, 0);
    }
    Ok(())
}

/// Append the row payload: values in row order, columns in field order.
///
/// A null value is the single marker byte. Any other value is its
/// display form as a block followed by the 4-byte tag of its kind; the
/// tag is informational for the remote client, not an encoding selector.
pub fn put_row_data(buf: &mut BytesMut, rows: &[Vec<Value>]) -> Result<()> {
    for row in rows {
        for value in row {
            match value.wire_bytes() {
                None => buf.extend_from_slice(&[NULL_VALUE_MARKER]),
                Some(bytes) => {
                    put_block(buf, &bytes)?;
                    put_u32(buf, value.type_tag());
                }
            }
        }
    }
    Ok(())
}

/// Build a complete error response: header + one message block.
///
/// Used for connection failures and for unsupported actions.
pub fn error_response(errno: u32, errmsg: &str) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + errmsg.len() + 5);
    buf.extend_from_slice(&Header::new(errno).encode());
    put_block(&mut buf, errmsg.as_bytes())?;
    Ok(buf.freeze())
}
