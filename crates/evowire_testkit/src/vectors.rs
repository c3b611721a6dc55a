//! Cross-implementation wire test vectors.
//!
//! These vectors pin the frame format byte-for-byte so any other
//! implementation of the protocol can verify identical behavior.

use serde::{Deserialize, Serialize};

/// A test vector that can be shared across implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Input stream bytes (hex-encoded).
    pub input_hex: String,
    /// Expected re-encoded bytes (hex-encoded), when decoding succeeds.
    pub expected_hex: String,
    /// Expected error substring (if this input must fail).
    pub expected_error: Option<String>,
}

/// Frame encoding test vectors.
#[must_use]
pub fn frame_vectors() -> Vec<TestVector> {
    vec![
        TestVector {
            id: "frame_null".into(),
            description: "Null frame".into(),
            input_hex: "0100000000".into(),
            expected_hex: "0100000000".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_bool_false".into(),
            description: "Bool frame, false".into(),
            input_hex: "020100000000".into(),
            expected_hex: "020100000000".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_bool_true".into(),
            description: "Bool frame, true".into(),
            input_hex: "020100000001".into(),
            expected_hex: "020100000001".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_int_10".into(),
            description: "Int frame, 10 as i64 LE".into(),
            input_hex: "03080000000a00000000000000".into(),
            expected_hex: "03080000000a00000000000000".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_int_neg1".into(),
            description: "Int frame, -1 as i64 LE".into(),
            input_hex: "0308000000ffffffffffffffff".into(),
            expected_hex: "0308000000ffffffffffffffff".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_text_praveen".into(),
            description: "Text frame, \"praveen\"".into(),
            input_hex: "04070000007072617665656e".into(),
            expected_hex: "04070000007072617665656e".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_text_empty".into(),
            description: "Text frame, empty string".into(),
            input_hex: "0400000000".into(),
            expected_hex: "0400000000".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_bytes".into(),
            description: "Bytes frame, cafe".into(),
            input_hex: "0502000000cafe".into(),
            expected_hex: "0502000000cafe".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_skip_start".into(),
            description: "Skip-start sentinel, zero payload".into(),
            input_hex: "1000000000".into(),
            expected_hex: "1000000000".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_skip_end".into(),
            description: "Skip-end sentinel, zero payload".into(),
            input_hex: "1100000000".into(),
            expected_hex: "1100000000".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_empty_block".into(),
            description: "Empty skip block followed by Int 5".into(),
            input_hex: "1000000000110000000003080000000500000000000000".into(),
            expected_hex: "1000000000110000000003080000000500000000000000".into(),
            expected_error: None,
        },
        TestVector {
            id: "frame_sentinel_with_payload".into(),
            description: "Skip-start claiming one payload byte".into(),
            input_hex: "100100000000".into(),
            expected_hex: String::new(),
            expected_error: Some("invalid frame".into()),
        },
        TestVector {
            id: "frame_truncated_header".into(),
            description: "Int frame cut inside the length field".into(),
            input_hex: "0308".into(),
            expected_hex: String::new(),
            expected_error: Some("unexpected end".into()),
        },
        TestVector {
            id: "frame_truncated_payload".into(),
            description: "Int frame cut inside the payload".into(),
            input_hex: "03080000000a00".into(),
            expected_hex: String::new(),
            expected_error: Some("unexpected end".into()),
        },
        TestVector {
            id: "frame_oversized_claim".into(),
            description: "Bytes frame claiming 4 GiB of payload".into(),
            input_hex: "05ffffffff".into(),
            expected_hex: String::new(),
            expected_error: Some("too large".into()),
        },
    ]
}

/// Hex-encodes bytes, lowercase.
#[must_use]
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Hex-decodes a lowercase hex string.
///
/// # Panics
///
/// Panics on odd-length or non-hex input; vectors are authored by hand.
#[must_use]
pub fn hex_decode(hex: &str) -> Vec<u8> {
    assert!(hex.len() % 2 == 0, "odd-length hex string");
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("invalid hex"))
        .collect()
}
