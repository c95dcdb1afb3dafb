//! Base58 byte-to-text encoding (Bitcoin alphabet).
//!
//! The full encoding is reversible. [`truncated`] is not: it keeps only a
//! prefix of the encoding, so codes built from it must be resolved through
//! the store.

use snip_core::CoreError;

/// Length of a truncated base58 code unless configured otherwise.
pub const DEFAULT_TRUNCATED_LENGTH: usize = 12;

/// Encodes `bytes` as base58.
pub fn encode<T: AsRef<[u8]>>(bytes: T) -> String {
    bs58::encode(bytes).into_string()
}

/// Decodes a full (untruncated) base58 string back into bytes.
pub fn decode(code: &str) -> Result<Vec<u8>, CoreError> {
    bs58::decode(code)
        .into_vec()
        .map_err(|e| CoreError::InvalidCode(format!("'{code}' is not base58: {e}")))
}

/// Encodes `bytes` as base58 and keeps at most the first `len` characters.
pub fn truncated<T: AsRef<[u8]>>(bytes: T, len: usize) -> String {
    let mut encoded = encode(bytes);
    // base58 output is ASCII, so byte and character positions agree
    encoded.truncate(len);
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encodes_known_vectors() {
        assert_eq!(encode(b"hello world"), "StV1DL6CwTryKyV");
        assert_eq!(encode([0u8, 0, 1]), "112");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn decodes_url() {
        let code = encode("https://a.com");
        assert_eq!(decode(&code).unwrap(), b"https://a.com");
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        // 0, O, I and l are excluded from the base58 alphabet
        assert!(matches!(decode("abc0"), Err(CoreError::InvalidCode(_))));
        assert!(matches!(decode("OIl"), Err(CoreError::InvalidCode(_))));
    }

    #[test]
    fn truncation_keeps_prefix() {
        let full = encode("https://example.com/some/long/path");
        let short = truncated("https://example.com/some/long/path", 12);
        assert_eq!(short.len(), 12);
        assert!(full.starts_with(&short));
        assert_eq!(truncated(b"a", 12), encode(b"a"));
    }

    #[test]
    fn truncation_loses_information() {
        // same prefix and length, so the leading digits agree
        let a = truncated("https://example.com/aaaa", 12);
        let b = truncated("https://example.com/aaab", 12);
        assert_eq!(a, b);
    }

    proptest! {
        /// The untruncated encoding is lossless for arbitrary bytes.
        #[test]
        fn bytes_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            prop_assert_eq!(decode(&encode(&bytes)).unwrap(), bytes);
        }
    }
}
