//! Plain codec - pass-through for unencoded statements.

/// Codec for statements that arrive as plain text.
///
/// This is the simplest codec - the statement is executed as-is.
pub struct PlainCodec;

impl PlainCodec {
    /// Decode a plain-text statement (zero-copy, returns the input).
    #[inline]
    pub fn decode(statement: &str) -> &str {
        statement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_passes_through() {
        assert_eq!(PlainCodec::decode("SELECT 1"), "SELECT 1");
        assert_eq!(PlainCodec::decode(""), "");
    }

    #[test]
    fn test_decode_zero_copy() {
        let statement = "UPDATE t SET a = 1";
        let decoded = PlainCodec::decode(statement);
        assert_eq!(decoded.as_ptr(), statement.as_ptr());
    }
}
