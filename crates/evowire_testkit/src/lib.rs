//! # evowire Testkit
//!
//! Test utilities for evowire.
//!
//! This crate provides:
//! - Sample evolvable records at three schema versions
//! - Stream-building fixtures (memory and temp-file)
//! - Property-based test generators using proptest
//! - Cross-implementation wire test vectors
//!
//! ## Usage
//!
//! ```rust
//! use evowire_testkit::prelude::*;
//!
//! let bytes = encoded_bytes(&TestRecordV1::sample());
//! let decoded: TestRecordV0 = decode_from_bytes(bytes).unwrap();
//! assert_eq!(decoded, TestRecordV0::sample());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::{
        decode_from_bytes, encode_to_memory, encode_to_temp_file, encoded_bytes, TestRecordV0,
        TestRecordV1, TestRecordV2,
    };
    pub use crate::generators::{
        payload_sequence_strategy, record_v1_strategy, record_v2_strategy, value_strategy,
        PropTestConfig,
    };
    pub use crate::vectors::{frame_vectors, hex_decode, hex_encode, TestVector};
}
