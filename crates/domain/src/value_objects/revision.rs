//! Version token for optimistic concurrency on shared table state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic revision of a persisted snapshot (turn order, fog grid).
///
/// Stores reject a write whose expected revision no longer matches what is
/// stored, so two DM sessions racing on the same field cannot silently
/// overwrite each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Revision(u64);

impl Revision {
    /// Revision of a freshly created snapshot.
    pub const INITIAL: Revision = Revision(1);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    /// The revision that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Whether `other` supersedes this revision.
    pub fn is_superseded_by(self, other: Revision) -> bool {
        other.0 > self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}
