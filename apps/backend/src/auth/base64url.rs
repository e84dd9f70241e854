//! URL-safe base64 without padding, as used by every token segment.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

pub use base64::DecodeError;

/// Emits no `=`; accepts input with or without trailing padding.
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as unpadded base64url.
pub fn encode(input: impl AsRef<[u8]>) -> String {
    ENGINE.encode(input)
}

/// Decode base64url, restoring any omitted padding.
///
/// Non-canonical trailing bits are rejected, so every string this accepts
/// (minus padding) re-encodes to itself.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    ENGINE.decode(input)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{decode, encode};

    #[test]
    fn test_encode_uses_url_safe_alphabet_without_padding() {
        // 0xfb 0xff maps to "+/8=" in the standard alphabet
        assert_eq!(encode([0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"a"), "YQ");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn test_header_encoding_is_stable() {
        assert_eq!(
            encode(br#"{"alg":"HS256","typ":"JWT"}"#),
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"
        );
    }

    #[test]
    fn test_decode_tolerates_missing_and_present_padding() {
        assert_eq!(decode("YQ").unwrap(), b"a");
        assert_eq!(decode("YQ==").unwrap(), b"a");
        assert_eq!(decode("YWI").unwrap(), b"ab");
        assert_eq!(decode("YWI=").unwrap(), b"ab");
    }

    #[test]
    fn test_decode_rejects_standard_alphabet_and_garbage() {
        assert!(decode("+/8").is_err());
        assert!(decode("not base64!").is_err());
        assert!(decode("A").is_err());
    }

    #[test]
    fn test_decode_rejects_non_canonical_trailing_bits() {
        // "YR" decodes to 'a' only if trailing bits are ignored
        assert!(decode("YR").is_err());
    }

    proptest! {
        #[test]
        fn prop_encode_decode_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let encoded = encode(&bytes);
            prop_assert!(!encoded.contains('='));
            prop_assert_eq!(decode(&encoded).unwrap(), bytes);
        }

        #[test]
        fn prop_accepted_strings_reencode_identically(s in "[A-Za-z0-9_-]{0,64}") {
            if let Ok(bytes) = decode(&s) {
                prop_assert_eq!(encode(bytes), s);
            }
        }
    }
}
