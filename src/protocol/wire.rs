//! Wire primitives and the fixed response header.
//!
//! Implements the 16-byte header format:
//! ```text
//! ┌──────────┬──────────┬──────────┬──────────┐
//! │ Magic    │ Version  │ Errno    │ Padding  │
//! │ 4 bytes  │ 2 bytes  │ 4 bytes  │ 6 bytes  │
//! │ uint32 BE│ uint16 BE│ uint32 BE│ zeros    │
//! └──────────┴──────────┴──────────┴──────────┘
//! ```
//!
//! All multi-byte integers are Big Endian. Magic and version are fixed
//! protocol constants and must be reproduced bit-exactly.

use bytes::BytesMut;

use crate::error::{Result, TunnelError};

/// Header size in bytes (fixed, exactly 16).
pub const HEADER_SIZE: usize = 16;

/// Magic constant identifying the protocol.
pub const HEADER_MAGIC: u32 = 1111;

/// Fixed protocol version.
pub const PROTOCOL_VERSION: u16 = 202;

/// Errno for top-level failures: connection errors and unsupported actions.
pub const TUNNEL_ERRNO: u32 = 202;

/// Errno for a single failed statement inside a query batch.
pub const STATEMENT_ERRNO: u32 = 1;

/// Append a 32-bit unsigned integer in Big Endian order.
#[inline]
pub fn put_u32(buf: &mut BytesMut, v: u32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Append a 16-bit unsigned integer in Big Endian order.
#[inline]
pub fn put_u16(buf: &mut BytesMut, v: u16) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Append `n` zero bytes.
#[inline]
pub fn put_padding(buf: &mut BytesMut, n: usize) {
    buf.resize(buf.len() + n, 0);
}

/// Convert a native count or id into a `u32` wire field.
///
/// The wire format has no wider integer fields, so anything outside
/// `0..=u32::MAX` must fail loudly rather than truncate or wrap.
pub fn u32_field<T>(v: T) -> Result<u32>
where
    T: TryInto<u32> + std::fmt::Display + Copy,
{
    v.try_into()
        .map_err(|_| TunnelError::Protocol(format!("value {} out of range for a u32 wire field", v)))
}

/// The fixed response header.
///
/// Only the errno varies; magic, version, and padding are constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Magic constant (always [`HEADER_MAGIC`] on the wire).
    pub magic: u32,
    /// Protocol version (always [`PROTOCOL_VERSION`] on the wire).
    pub version: u16,
    /// Top-level error code: 0 = success.
    pub errno: u32,
}

impl Header {
    /// Create a new header with the fixed magic and version.
    pub fn new(errno: u32) -> Self {
        Self {
            magic: HEADER_MAGIC,
            version: PROTOCOL_VERSION,
            errno,
        }
    }

    /// Encode header to bytes (Big Endian).
    ///
    /// # Example
    ///
    /// ```
    /// use sqltunnel::protocol::Header;
    ///
    /// let bytes = Header::new(0).encode();
    /// assert_eq!(bytes.len(), 16);
    /// ```
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        self.encode_into(&mut buf);
        buf
    }

    /// Encode header into an existing buffer.
    ///
    /// # Panics
    ///
    /// Panics if buffer is smaller than `HEADER_SIZE` (16 bytes).
    pub fn encode_into(&self, buf: &mut [u8]) {
        debug_assert!(buf.len() >= HEADER_SIZE);
        buf[0..4].copy_from_slice(&self.magic.to_be_bytes());
        buf[4..6].copy_from_slice(&self.version.to_be_bytes());
        buf[6..10].copy_from_slice(&self.errno.to_be_bytes());
        buf[10..HEADER_SIZE].fill(0);
    }

    /// Decode header from bytes (Big Endian).
    ///
    /// Returns `None` if buffer is too short.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < HEADER_SIZE {
            return None;
        }
        Some(Self {
            magic: u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]),
            version: u16::from_be_bytes([buf[4], buf[5]]),
            errno: u32::from_be_bytes([buf[6], buf[7], buf[8], buf[9]]),
        })
    }

    /// Validate the header for protocol compliance.
    ///
    /// Checks the magic constant and protocol version.
    pub fn validate(&self) -> Result<()> {
        if self.magic != HEADER_MAGIC {
            return Err(TunnelError::Protocol(format!(
                "bad header magic {} (expected {})",
                self.magic, HEADER_MAGIC
            )));
        }

        if self.version != PROTOCOL_VERSION {
            return Err(TunnelError::Protocol(format!(
                "unknown protocol version {} (expected {})",
                self.version, PROTOCOL_VERSION
            )));
        }

        Ok(())
    }

    /// Check if this header signals a top-level error.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.errno != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_encode_decode_roundtrip() {
        let original = Header::new(202);
        let encoded = original.encode();
        let decoded = Header::decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn test_header_big_endian_byte_order() {
        let header = Header::new(0x01020304);
        let bytes = header.encode();

        // Magic: 1111 = 0x0457 in BE
        assert_eq!(&bytes[0..4], &[0x00, 0x00, 0x04, 0x57]);

        // Version: 202 = 0xCA in BE
        assert_eq!(&bytes[4..6], &[0x00, 0xCA]);

        // Errno: 0x01020304 in BE
        assert_eq!(&bytes[6..10], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_header_size_is_exactly_16() {
        assert_eq!(HEADER_SIZE, 16);
        assert_eq!(Header::new(0).encode().len(), 16);
    }

    #[test]
    fn test_header_padding_is_zero() {
        let bytes = Header::new(u32::MAX).encode();
        assert!(bytes[10..16].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_too_short_buffer() {
        let buf = [0u8; 15]; // One byte short
        assert!(Header::decode(&buf).is_none());
    }

    #[test]
    fn test_validate_accepts_own_encoding() {
        let decoded = Header::decode(&Header::new(7).encode()).unwrap();
        assert!(decoded.validate().is_ok());
        assert_eq!(decoded.errno, 7);
    }

    #[test]
    fn test_validate_bad_magic_rejected() {
        let mut bytes = Header::new(0).encode();
        bytes[3] = 0x58; // Corrupt the magic
        let result = Header::decode(&bytes).unwrap().validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("magic"));
    }

    #[test]
    fn test_validate_bad_version_rejected() {
        let mut bytes = Header::new(0).encode();
        bytes[5] = 0xCB;
        let result = Header::decode(&bytes).unwrap().validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("version"));
    }

    #[test]
    fn test_is_error() {
        assert!(!Header::new(0).is_error());
        assert!(Header::new(TUNNEL_ERRNO).is_error());
    }

    #[test]
    fn test_put_u32_big_endian() {
        let mut buf = BytesMut::new();
        put_u32(&mut buf, 0x08090A0B);
        assert_eq!(&buf[..], &[0x08, 0x09, 0x0A, 0x0B]);
    }

    #[test]
    fn test_put_u16_big_endian() {
        let mut buf = BytesMut::new();
        put_u16(&mut buf, 0x0102);
        assert_eq!(&buf[..], &[0x01, 0x02]);
    }

    #[test]
    fn test_put_padding() {
        let mut buf = BytesMut::new();
        buf.extend_from_slice(b"x");
        put_padding(&mut buf, 12);
        assert_eq!(buf.len(), 13);
        assert!(buf[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_u32_field_in_range() {
        assert_eq!(u32_field(0i64).unwrap(), 0);
        assert_eq!(u32_field(u32::MAX as i64).unwrap(), u32::MAX);
        assert_eq!(u32_field(42usize).unwrap(), 42);
    }

    #[test]
    fn test_u32_field_out_of_range() {
        assert!(u32_field(-1i64).is_err());
        assert!(u32_field(u32::MAX as i64 + 1).is_err());

        let err = u32_field(-5i64).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
