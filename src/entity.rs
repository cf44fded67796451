//! Opaque entity references.
//!
//! The engine never owns or interprets the people, organizations, or things
//! that rules talk about; it only stores and compares references to them.
//! An [`EntityId`] is an opaque identity token compared by identity, and an
//! [`EntitySet`] is an ordered collection of such tokens used as the payload
//! of set-valued timelines.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, stable entity reference.
///
/// Once created, an `EntityId` never changes. Two references are equal only
/// if they denote the same identity.
///
/// # Examples
///
/// ```
/// use tempora::EntityId;
///
/// let alice = EntityId::new();
/// let bob = EntityId::new();
/// assert_ne!(alice, bob);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Creates a new random entity reference.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an entity reference from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Creates a nil (all zeros) reference, for sentinels and tests.
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns true if this is the nil reference.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EntityId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<EntityId> for Uuid {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// An ordered set of entity references, the payload of set-valued timelines.
pub type EntitySet = BTreeSet<EntityId>;

/// Builds an [`EntitySet`] from a list of references.
#[must_use]
pub fn entity_set(members: impl IntoIterator<Item = EntityId>) -> EntitySet {
    members.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id_identity() {
        let id1 = EntityId::new();
        let id2 = EntityId::new();
        assert_ne!(id1, id2);
        assert_eq!(id1, id1);
        assert!(!id1.is_nil());
    }

    #[test]
    fn test_entity_id_nil() {
        assert!(EntityId::nil().is_nil());
    }

    #[test]
    fn test_entity_id_from_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = EntityId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(Uuid::from(id), uuid);
    }

    #[test]
    fn test_entity_id_display() {
        let display = format!("{}", EntityId::new());
        assert!(display.contains('-'));
    }

    #[test]
    fn test_entity_set_deduplicates() {
        let a = EntityId::new();
        let b = EntityId::new();
        let set = entity_set([a, b, a]);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
        assert!(set.contains(&b));
    }

    #[test]
    fn test_entity_id_serialization() {
        let id = EntityId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
