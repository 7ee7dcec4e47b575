//! Domain identifiers (strongly-typed IDs).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a Task. Assigned by the store, never client-supplied,
/// and immutable once assigned.
///
/// Serialized transparently, so the wire/disk shape stays a plain positive
/// integer (`{"id": 1, ...}`).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
