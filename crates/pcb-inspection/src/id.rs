//! Node identity used for the non-owning parent back-reference.

use std::fmt;
use uuid::Uuid;

/// Identity of a single node in an inspection tree.
///
/// Assigned when a node is constructed or deserialized and never
/// externalized. Parent links store the parent's `ObjectId`, so a child
/// never owns (or keeps alive) the node above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Generate a fresh identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ObjectId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
