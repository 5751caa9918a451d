//! Proptest strategies for index workloads.
//!
//! Keys come from deliberately small alphabets so that random sequences
//! hit the interesting cases: secondary-key collisions, moves onto an
//! occupied slot, and the empty secondary key.

use proptest::prelude::*;

/// Primary keys: `pk` followed by one or two digits.
pub fn primary_key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::string::string_regex("pk[0-9]{1,2}")
        .expect("Invalid regex")
        .prop_map(String::into_bytes)
}

/// Secondary keys over `a..=c`, up to three bytes, empty included.
pub fn secondary_key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(b'a'..=b'c', 0..=3)
}

/// Arbitrary raw keys, for store-level tests.
pub fn raw_key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..16)
}

/// A change to a record in a [`TestBucket`](crate::TestBucket).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOp {
    /// Create or replace a record.
    Save {
        /// Primary key
        pk: Vec<u8>,
        /// New value; doubles as the secondary key
        value: Vec<u8>,
    },
    /// Delete a record if it exists.
    Delete {
        /// Primary key
        pk: Vec<u8>,
    },
}

/// Strategy for a single record change.
pub fn update_op_strategy() -> impl Strategy<Value = UpdateOp> {
    prop_oneof![
        3 => (primary_key_strategy(), secondary_key_strategy())
            .prop_map(|(pk, value)| UpdateOp::Save { pk, value }),
        1 => primary_key_strategy().prop_map(|pk| UpdateOp::Delete { pk }),
    ]
}

/// Strategy for a sequence of record changes.
pub fn update_ops_strategy(min_ops: usize, max_ops: usize) -> impl Strategy<Value = Vec<UpdateOp>> {
    prop::collection::vec(update_op_strategy(), min_ops..max_ops)
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
