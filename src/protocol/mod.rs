//! Protocol module - wire format, block framing, and response builders.
//!
//! This module implements the binary response format:
//! - 16-byte header encoding/decoding
//! - Length-framed byte strings (blocks)
//! - Result-set, connection-info, and error payload builders

mod block;
mod response;
mod wire;

pub use block::{decode_block, put_block, BLOCK_LONG_FORM, BLOCK_SHORT_LIMIT};
pub use response::{
    error_response, put_connection_info, put_fields_header, put_result_set_header, put_row_data,
    CONTINUATION_LAST, CONTINUATION_MORE, NULL_VALUE_MARKER, RESULT_SET_HEADER_SIZE,
};
pub use wire::{
    put_padding, put_u16, put_u32, u32_field, Header, HEADER_MAGIC, HEADER_SIZE, PROTOCOL_VERSION,
    STATEMENT_ERRNO, TUNNEL_ERRNO,
};
