//! User identifiers and the strategies that mint them.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{IdStrategy, SEQUENTIAL_ID_PREFIX};

/// Opaque user identifier, assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strategy for minting fresh identifiers.
///
/// Implementations must never return the same value twice for the
/// lifetime of the generator.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> UserId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> UserId {
        UserId(Uuid::new_v4().to_string())
    }
}

/// `user_<n>` from a process-wide counter.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> UserId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        UserId(format!("{}{}", SEQUENTIAL_ID_PREFIX, n))
    }
}

/// Build the generator selected by configuration.
pub fn id_generator_for(strategy: IdStrategy) -> Box<dyn IdGenerator> {
    match strategy {
        IdStrategy::Uuid => Box::new(UuidIdGenerator),
        IdStrategy::Sequential => Box::new(SequentialIdGenerator::new()),
    }
}
