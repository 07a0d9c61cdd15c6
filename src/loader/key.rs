use std::fmt;

use crate::model::EntityId;

/// One requested foreign-key value.
///
/// Keys compare and hash by the wrapped ID, which is what makes them usable
/// both for deduplicating a batch and for looking results up afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchKey(EntityId);

impl BatchKey {
    pub const fn new(id: EntityId) -> Self {
        Self(id)
    }

    pub const fn id(self) -> EntityId {
        self.0
    }
}

impl From<EntityId> for BatchKey {
    fn from(id: EntityId) -> Self {
        Self(id)
    }
}

impl fmt::Display for BatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
