//! Non-atomic batch for in-memory stores.

use crate::error::{StoreError, StoreResult};
use crate::traits::{Batch, SetDeleter};
use tracing::trace;

/// A queued write.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Set { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl Op {
    fn apply(&self, out: &mut dyn SetDeleter) -> StoreResult<()> {
        match self {
            Op::Set { key, value } => out.set(key, value),
            Op::Delete { key } => out.delete(key),
        }
    }
}

/// A batch that queues operations and replays them one by one on
/// [`write`](Batch::write).
///
/// Only suitable for transient stores. If an operation fails part-way,
/// the earlier operations stay applied and the error reports how many
/// went through.
///
/// **Never use this for a store that must survive a crash mid-write.**
pub struct NonAtomicBatch<'a> {
    out: &'a mut dyn SetDeleter,
    ops: Vec<Op>,
}

impl<'a> NonAtomicBatch<'a> {
    /// Creates an empty batch targeting `out`.
    pub fn new(out: &'a mut dyn SetDeleter) -> Self {
        Self {
            out,
            ops: Vec::new(),
        }
    }
}

impl SetDeleter for NonAtomicBatch<'_> {
    fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.ops.push(Op::Set {
            key: key.to_vec(),
            value: value.to_vec(),
        });
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.ops.push(Op::Delete { key: key.to_vec() });
        Ok(())
    }
}

impl Batch for NonAtomicBatch<'_> {
    fn write(&mut self) -> StoreResult<()> {
        let ops = std::mem::take(&mut self.ops);
        trace!(ops = ops.len(), "writing non-atomic batch");

        for (applied, op) in ops.iter().enumerate() {
            if let Err(err) = op.apply(&mut *self.out) {
                return Err(StoreError::BatchFailed {
                    applied,
                    source: Box::new(err),
                });
            }
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.ops.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    /// Records writes and fails on a chosen key.
    #[derive(Default)]
    struct Recorder {
        data: BTreeMap<Vec<u8>, Vec<u8>>,
        fail_on: Option<Vec<u8>>,
    }

    impl SetDeleter for Recorder {
        fn set(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
            if self.fail_on.as_deref() == Some(key) {
                return Err(StoreError::Closed);
            }
            self.data.insert(key.to_vec(), value.to_vec());
            Ok(())
        }

        fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
            self.data.remove(key);
            Ok(())
        }
    }

    #[test]
    fn nothing_happens_until_write() {
        let mut rec = Recorder::default();
        {
            let mut batch = NonAtomicBatch::new(&mut rec);
            batch.set(b"a", b"1").unwrap();
            assert_eq!(batch.len(), 1);
        }
        assert!(rec.data.is_empty());
    }

    #[test]
    fn write_applies_in_order_and_resets() {
        let mut rec = Recorder::default();
        {
            let mut batch = NonAtomicBatch::new(&mut rec);
            batch.set(b"a", b"1").unwrap();
            batch.set(b"b", b"2").unwrap();
            batch.delete(b"a").unwrap();
            batch.set(b"b", b"3").unwrap();
            batch.write().unwrap();
            assert!(batch.is_empty());

            // reusable after a write
            batch.set(b"c", b"4").unwrap();
            batch.write().unwrap();
        }
        assert_eq!(rec.data.get(b"a".as_slice()), None);
        assert_eq!(rec.data.get(b"b".as_slice()), Some(&b"3".to_vec()));
        assert_eq!(rec.data.get(b"c".as_slice()), Some(&b"4".to_vec()));
    }

    #[test]
    fn failure_leaves_partial_effects() {
        let mut rec = Recorder {
            fail_on: Some(b"bad".to_vec()),
            ..Recorder::default()
        };
        let err = {
            let mut batch = NonAtomicBatch::new(&mut rec);
            batch.set(b"a", b"1").unwrap();
            batch.set(b"bad", b"2").unwrap();
            batch.set(b"c", b"3").unwrap();
            let err = batch.write().unwrap_err();
            assert!(batch.is_empty());
            err
        };
        assert!(matches!(err, StoreError::BatchFailed { applied: 1, .. }));
        assert!(rec.data.contains_key(b"a".as_slice()));
        assert!(!rec.data.contains_key(b"c".as_slice()));
    }
}
