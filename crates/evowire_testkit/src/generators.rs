//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random payload values and sample
//! records that maintain required invariants.

use crate::fixtures::{TestRecordV1, TestRecordV2};
use evowire_codec::Value;
use proptest::prelude::*;

/// Strategy for generating any payload value.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Integer),
        ".{0,32}".prop_map(Value::Text),
        prop::collection::vec(any::<u8>(), 0..128).prop_map(Value::Bytes),
    ]
}

/// Strategy for generating a sequence of payload values, e.g. the contents
/// of a skip block.
pub fn payload_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(value_strategy(), 0..max_len)
}

/// Strategy for generating version-1 records.
pub fn record_v1_strategy() -> impl Strategy<Value = TestRecordV1> {
    (any::<i64>(), prop::option::of(".{0,16}"), ".{0,16}").prop_map(|(number, extra, name)| {
        TestRecordV1 {
            number,
            extra,
            name,
        }
    })
}

/// Strategy for generating version-2 records.
pub fn record_v2_strategy() -> impl Strategy<Value = TestRecordV2> {
    (
        any::<i64>(),
        prop::option::of(".{0,16}"),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<i64>()),
        ".{0,16}",
    )
        .prop_map(|(number, extra, active, weight, name)| TestRecordV2 {
            number,
            extra,
            active,
            weight,
            name,
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
