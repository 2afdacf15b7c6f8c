// SPDX-License-Identifier: MIT

//! Record identity generation
//!
//! Every persisted row carries an opaque string identity assigned at
//! insert time. Deployments use random UUIDs; tests swap in the
//! sequential generator so identities in assertions are stable.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of fresh row identities
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// UUIDv4 identities
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic `prefix-N` identities for tests. Clones share the
/// counter, so one generator can serve several stores.
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("id")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}
