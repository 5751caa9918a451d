//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use rand::Rng;
use weft_index::SimpleObject;
use weft_store::{MemStore, SetDeleter};
use weft_testkit::TestBucket;

/// Generate random bytes of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Primary key of the `n`th generated record, zero padded so keys sort
/// in generation order.
pub fn primary_key(n: usize) -> Vec<u8> {
    format!("pk{n:08}").into_bytes()
}

/// Generate `count` objects with distinct values of `value_size` bytes.
///
/// Each value starts with the record number, so values never collide on
/// a unique index.
pub fn generate_objects(count: usize, value_size: usize) -> Vec<SimpleObject> {
    (0..count)
        .map(|n| {
            let mut value = format!("{n:08}").into_bytes();
            value.extend(random_data(value_size.saturating_sub(value.len())));
            SimpleObject::new(primary_key(n), value)
        })
        .collect()
}

/// Saves every object into `bucket`.
pub fn fill_bucket(bucket: &mut TestBucket, objects: &[SimpleObject]) {
    for obj in objects {
        bucket.save(obj).expect("generated values are distinct");
    }
}

/// A store holding `count` random entries.
pub fn filled_store(count: usize, value_size: usize) -> MemStore {
    let mut store = MemStore::new();
    for n in 0..count {
        store
            .set(&primary_key(n), &random_data(value_size))
            .expect("in-memory write");
    }
    store
}
