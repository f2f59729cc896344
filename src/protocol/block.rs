//! Length-framed byte strings ("blocks").
//!
//! Every variable-length field in the protocol is a block. Short values
//! (length < 254) carry a single length byte; longer values escape to a
//! marker byte followed by a 4-byte Big Endian length:
//!
//! ```text
//! short: [len u8] [payload ...]                  len in 0..=253
//! long:  [0xFE] [len u32 BE] [payload ...]       len >= 254
//! ```
//!
//! The encoding form is chosen solely by length; a lead byte of `0xFF`
//! is protocol-undefined and rejected by the decoder.

use bytes::{Bytes, BytesMut};

use super::wire::put_u32;
use crate::error::{Result, TunnelError};

/// Marker byte escaping to the long (4-byte length) form.
pub const BLOCK_LONG_FORM: u8 = 0xFE;

/// Smallest length that requires the long form.
pub const BLOCK_SHORT_LIMIT: usize = 254;

/// Append a block to the buffer.
///
/// Total over any byte sequence whose length fits in a `u32`; longer
/// input fails rather than truncating the length field.
///
/// # Example
///
/// ```
/// use bytes::BytesMut;
/// use sqltunnel::protocol::put_block;
///
/// let mut buf = BytesMut::new();
/// put_block(&mut buf, b"hello").unwrap();
/// assert_eq!(&buf[..], b"\x05hello");
/// ```
pub fn put_block(buf: &mut BytesMut, payload: &[u8]) -> Result<()> {
    if payload.len() < BLOCK_SHORT_LIMIT {
        buf.extend_from_slice(&[payload.len() as u8]);
    } else {
        let len = u32::try_from(payload.len()).map_err(|_| {
            TunnelError::Protocol(format!("block length {} exceeds u32 range", payload.len()))
        })?;
        buf.extend_from_slice(&[BLOCK_LONG_FORM]);
        put_u32(buf, len);
    }
    buf.extend_from_slice(payload);
    Ok(())
}

/// Decode a block from the front of `buf`.
///
/// Returns the payload and the total number of bytes consumed
/// (framing included).
///
/// # Errors
///
/// Fails on an empty buffer, a `0xFF` lead byte, or input shorter than
/// the declared length.
pub fn decode_block(buf: &[u8]) -> Result<(Bytes, usize)> {
    let (&lead, rest) = buf
        .split_first()
        .ok_or_else(|| TunnelError::Protocol("empty input while decoding block".to_string()))?;

    let (len, framing) = match lead {
        0xFF => {
            return Err(TunnelError::Protocol(
                "0xFF is not a valid block lead byte".to_string(),
            ));
        }
        BLOCK_LONG_FORM => {
            if rest.len() < 4 {
                return Err(TunnelError::Protocol(
                    "truncated block length field".to_string(),
                ));
            }
            let len = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
            (len, 5)
        }
        short => (short as usize, 1),
    };

    let payload = buf
        .get(framing..framing + len)
        .ok_or_else(|| TunnelError::Protocol(format!("truncated block payload: need {} bytes", len)))?;

    Ok((Bytes::copy_from_slice(payload), framing + len))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(payload: &[u8]) -> (Bytes, usize) {
        let mut buf = BytesMut::new();
        put_block(&mut buf, payload).unwrap();
        decode_block(&buf).unwrap()
    }

    #[test]
    fn test_short_block_roundtrip() {
        let (payload, consumed) = roundtrip(b"hello");
        assert_eq!(&payload[..], b"hello");
        assert_eq!(consumed, 6);
    }

    #[test]
    fn test_empty_block() {
        let mut buf = BytesMut::new();
        put_block(&mut buf, b"").unwrap();
        assert_eq!(&buf[..], &[0x00]);

        let (payload, consumed) = decode_block(&buf).unwrap();
        assert!(payload.is_empty());
        assert_eq!(consumed, 1);
    }

    #[test]
    fn test_form_boundary_at_254() {
        // 253 bytes: still the short form
        let mut buf = BytesMut::new();
        put_block(&mut buf, &vec![0xAB; 253]).unwrap();
        assert_eq!(buf[0], 253);
        assert_eq!(buf.len(), 1 + 253);

        // 254 bytes: escapes to the long form
        let mut buf = BytesMut::new();
        put_block(&mut buf, &vec![0xAB; 254]).unwrap();
        assert_eq!(buf[0], BLOCK_LONG_FORM);
        assert_eq!(&buf[1..5], &254u32.to_be_bytes());
        assert_eq!(buf.len(), 5 + 254);
    }

    #[test]
    fn test_long_block_roundtrip() {
        let data = vec![0x5A; 70_000];
        let (payload, consumed) = roundtrip(&data);
        assert_eq!(&payload[..], &data[..]);
        assert_eq!(consumed, 5 + 70_000);
    }

    #[test]
    fn test_all_byte_values_preserved() {
        let all_bytes: Vec<u8> = (0..=255).collect();
        let (payload, _) = roundtrip(&all_bytes);
        assert_eq!(&payload[..], &all_bytes[..]);
    }

    #[test]
    fn test_decode_trailing_bytes_ignored() {
        let mut buf = BytesMut::new();
        put_block(&mut buf, b"ab").unwrap();
        buf.extend_from_slice(b"junk");

        let (payload, consumed) = decode_block(&buf).unwrap();
        assert_eq!(&payload[..], b"ab");
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_decode_empty_input() {
        let result = decode_block(&[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("empty input"));
    }

    #[test]
    fn test_decode_invalid_lead_byte() {
        let result = decode_block(&[0xFF, 0x01, 0x02]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("0xFF"));
    }

    #[test]
    fn test_decode_truncated_length_field() {
        let result = decode_block(&[BLOCK_LONG_FORM, 0x00, 0x01]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("truncated"));
    }

    #[test]
    fn test_decode_truncated_payload() {
        // Claims 10 bytes, provides 3
        let result = decode_block(&[10, b'a', b'b', b'c']);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("truncated"));
    }
}
