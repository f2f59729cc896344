//! Base64 codec for encoded statements.
//!
//! Clients tunnelling through carriers that mangle raw SQL can flag the
//! request as base64-encoded; each statement is then decoded with the
//! STANDARD alphabet before execution. The decoded bytes must be valid
//! UTF-8.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::Result;

/// Codec for base64-encoded statements.
pub struct Base64Codec;

impl Base64Codec {
    /// Decode a base64-encoded statement to SQL text.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid base64 or the decoded
    /// bytes are not valid UTF-8.
    pub fn decode(statement: &str) -> Result<String> {
        let raw = STANDARD.decode(statement)?;
        Ok(String::from_utf8(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TunnelError;

    #[test]
    fn test_decode_valid_statement() {
        // "SELECT 1"
        assert_eq!(Base64Codec::decode("U0VMRUNUIDE=").unwrap(), "SELECT 1");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(Base64Codec::decode("").unwrap(), "");
    }

    #[test]
    fn test_decode_invalid_base64() {
        let result = Base64Codec::decode("not base64!!!");
        assert!(matches!(result, Err(TunnelError::Base64(_))));
    }

    #[test]
    fn test_decode_invalid_utf8() {
        // 0xFF 0xFE is not UTF-8
        let encoded = STANDARD.encode([0xFF, 0xFE]);
        let result = Base64Codec::decode(&encoded);
        assert!(matches!(result, Err(TunnelError::Utf8(_))));
    }
}
