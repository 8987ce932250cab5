/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! URL-safe base64 without padding, as embedded in tokens.

use crate::error::SigningError;
use zeroize::Zeroizing;

/// Encodes `bytes` with the RFC 4648 URL-safe alphabet and no `=` padding.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    base64_simd::URL_SAFE_NO_PAD.encode_to_string(bytes.as_ref())
}

/// Decodes a URL-safe base64 private key.
///
/// Padding is optional: tokens are always emitted unpadded, but keys are
/// frequently stored with it. Surrounding whitespace is ignored. Padded input
/// must be a whole number of 4-character groups ending in at most two `=`.
pub fn decode_key(encoded: &str) -> Result<Zeroizing<Vec<u8>>, SigningError> {
    let unpadded = strip_padding(encoded.trim())?;
    base64_simd::URL_SAFE_NO_PAD
        .decode_to_vec(unpadded.as_bytes())
        .map(Zeroizing::new)
        .map_err(SigningError::invalid_key_encoding)
}

fn strip_padding(encoded: &str) -> Result<&str, SigningError> {
    let unpadded = encoded.trim_end_matches('=');
    let padding = encoded.len() - unpadded.len();
    if padding == 0 {
        return Ok(unpadded);
    }
    if padding > 2 || encoded.len() % 4 != 0 {
        return Err(SigningError::invalid_key_encoding(format!(
            "unexpected padding: {padding} `=` after {} characters",
            unpadded.len()
        )));
    }
    Ok(unpadded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use proptest::prelude::*;

    #[test]
    fn encode_strips_padding() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg");
        assert_eq!(encode(b"fo"), "Zm8");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode([0xfb, 0xff]), "-_8");
    }

    #[test]
    fn decode_tolerates_padding() {
        assert_eq!(decode_key("Zg==").unwrap().as_slice(), b"f");
        assert_eq!(decode_key("Zg").unwrap().as_slice(), b"f");
        assert_eq!(decode_key(" Zm8=\n").unwrap().as_slice(), b"fo");
    }

    #[test]
    fn decode_rejects_excess_padding() {
        for input in ["Zg========", "Zg=", "Zm8==", "Zm9v====", "==="] {
            let err = decode_key(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidKeyEncoding, "{input:?}");
        }
        assert_eq!(decode_key("Zm9v").unwrap().as_slice(), b"foo");
    }

    #[test]
    fn decode_rejects_standard_alphabet() {
        let err = decode_key("+/8").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKeyEncoding);
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_key("not a key!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidKeyEncoding);
    }

    #[test]
    fn full_byte_range_round_trips() {
        let all: Vec<u8> = (0..=255).collect();
        let encoded = encode(&all);
        assert!(!encoded.contains('='));
        assert_eq!(decode_key(&encoded).unwrap().as_slice(), all.as_slice());
    }

    proptest! {
        #[test]
        fn encode_never_pads(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
            let encoded = encode(&bytes);
            prop_assert!(!encoded.contains('='));
            prop_assert!(!encoded.contains('+'));
            prop_assert!(!encoded.contains('/'));
        }

        #[test]
        fn decode_inverts_encode(bytes in proptest::collection::vec(any::<u8>(), 0..300)) {
            let encoded = encode(&bytes);
            let padding = "=".repeat((4 - encoded.len() % 4) % 4);
            let padded = format!("{encoded}{padding}");
            let decoded = decode_key(&encoded).unwrap();
            prop_assert_eq!(decoded.as_slice(), bytes.as_slice());
            let decoded_padded = decode_key(&padded).unwrap();
            prop_assert_eq!(decoded_padded.as_slice(), bytes.as_slice());
        }
    }
}
